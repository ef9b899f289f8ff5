use rust_decimal::Decimal;
use thiserror::Error;

/// Failures around fetching and holding exchange-rate tables. Fetch
/// failures are never fatal to the engine: the previous table stays in use.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("rate fetch failed: {0}")]
    FetchFailed(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid rate {rate} for '{code}': rates must be positive")]
    InvalidRate { code: String, rate: Decimal },

    #[error("rate cache lock poisoned: {0}")]
    CacheError(String),
}
