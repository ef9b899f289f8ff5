use thiserror::Error;

use crate::rates::RateError;
use crate::registry::RegistryError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the conversion engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Registry data load failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Exchange rate operation failed: {0}")]
    Rates(#[from] RateError),

    #[error("Amount parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Local-to-span failure: a matched numeric token could not be normalized.
/// Never aborts the fragment it occurred in.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("'{0}' is not a valid decimal amount")]
    InvalidAmount(String),

    #[error("negative amounts are not prices: '{0}'")]
    NegativeAmount(String),

    #[error("empty amount token")]
    EmptyAmount,
}

/// Fatal-to-engine states.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine is inert: no currency registry has been loaded")]
    NotInitialized,

    #[error("invalid pattern built from registry: {0}")]
    InvalidPattern(String),

    #[error("engine state lock poisoned: {0}")]
    LockPoisoned(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("storage backend failed: {0}")]
    Storage(String),

    #[error("persisted settings are malformed: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Malformed(err.to_string())
    }
}
