use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::rates_errors::RateError;

/// A snapshot of exchange rates, all expressed relative to one base (pivot)
/// currency chosen at fetch time.
///
/// Tables are immutable once built and replaced atomically on refresh, never
/// merged in place. The base currency always carries a unit rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateTable {
    base: String,
    rates: HashMap<String, Decimal>,
    fetched_at: DateTime<Utc>,
}

impl ExchangeRateTable {
    /// Builds a validated table. Every rate must be positive.
    pub fn new(
        base: &str,
        mut rates: HashMap<String, Decimal>,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, RateError> {
        for (code, rate) in &rates {
            if *rate <= Decimal::ZERO {
                return Err(RateError::InvalidRate {
                    code: code.clone(),
                    rate: *rate,
                });
            }
        }
        rates.insert(base.to_string(), Decimal::ONE);

        Ok(ExchangeRateTable {
            base: base.to_string(),
            rates,
            fetched_at,
        })
    }

    /// A table holding only the pivot's unit rate. Lets the engine run
    /// before the first successful fetch; every foreign lookup is a miss.
    pub fn empty(base: &str) -> Self {
        ExchangeRateTable {
            base: base.to_string(),
            rates: HashMap::from([(base.to_string(), Decimal::ONE)]),
            fetched_at: Utc::now(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
