use async_trait::async_trait;

use super::rates_errors::RateError;
use super::rates_model::ExchangeRateTable;

/// Contract for an external exchange-rate source. Retry and timeout policy
/// belong to the implementation; the engine only ever sees a whole table or
/// an error.
#[async_trait]
pub trait RateProviderTrait: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches the latest rates expressed relative to `base`.
    async fn fetch_latest(&self, base: &str) -> Result<ExchangeRateTable, RateError>;
}
