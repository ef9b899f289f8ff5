use async_trait::async_trait;
use chrono::Utc;
use log::warn;
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::constants::RATE_API_BASE_URL;
use crate::rates::rates_errors::RateError;
use crate::rates::rates_model::ExchangeRateTable;
use crate::rates::rates_traits::RateProviderTrait;

#[derive(Deserialize, Debug)]
struct OpenErApiResponse {
    result: String,
    rates: HashMap<String, f64>,
}

/// Default rate source: the open.er-api.com free endpoint.
pub struct OpenErApiProvider {
    client: Client,
    base_url: String,
}

impl OpenErApiProvider {
    pub fn new() -> Self {
        OpenErApiProvider {
            client: Client::new(),
            base_url: RATE_API_BASE_URL.to_string(),
        }
    }

    /// Provider pointed at a different endpoint, for tests and mirrors.
    pub fn with_base_url(base_url: String) -> Self {
        OpenErApiProvider {
            client: Client::new(),
            base_url,
        }
    }
}

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProviderTrait for OpenErApiProvider {
    fn name(&self) -> &'static str {
        "OPEN_ER_API"
    }

    async fn fetch_latest(&self, base: &str) -> Result<ExchangeRateTable, RateError> {
        let url = format!("{}/{}", self.base_url, base);

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .json::<OpenErApiResponse>()
            .await?;

        if response.result != "success" {
            return Err(RateError::FetchFailed(format!(
                "provider returned result '{}'",
                response.result
            )));
        }

        let mut rates = HashMap::with_capacity(response.rates.len());
        for (code, rate) in response.rates {
            match Decimal::from_f64(rate) {
                Some(rate) if rate > Decimal::ZERO => {
                    rates.insert(code, rate);
                }
                _ => {
                    warn!("dropping unusable rate {} for '{}'", rate, code);
                }
            }
        }

        ExchangeRateTable::new(base, rates, Utc::now())
    }
}
