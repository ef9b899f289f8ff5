use log::{debug, warn};
use std::sync::{Arc, RwLock};

use super::rates_errors::RateError;
use super::rates_model::ExchangeRateTable;
use super::rates_traits::RateProviderTrait;
use crate::errors::Result;

/// Holds the current exchange-rate table and refreshes it from a provider.
///
/// Refresh is an atomic swap: a fetched table replaces the held one whole,
/// and a failed fetch leaves the previous table and its timestamp untouched
/// (stale-but-available). No caller ever observes a partially updated table.
#[derive(Clone)]
pub struct RateService {
    provider: Arc<dyn RateProviderTrait>,
    table: Arc<RwLock<Option<ExchangeRateTable>>>,
}

impl RateService {
    pub fn new(provider: Arc<dyn RateProviderTrait>) -> Self {
        RateService {
            provider,
            table: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetches a fresh table. Returns `Ok(true)` when the table was
    /// replaced, `Ok(false)` when the fetch failed and the previous table
    /// (possibly none) remains in use.
    pub async fn refresh(&self, base: &str) -> Result<bool> {
        match self.provider.fetch_latest(base).await {
            Ok(table) => {
                debug!(
                    "exchange rates refreshed from {} ({} entries, base {})",
                    self.provider.name(),
                    table.len(),
                    base
                );
                self.swap(Some(table))?;
                Ok(true)
            }
            Err(e) => {
                warn!(
                    "rate refresh from {} failed: {}. Keeping previous table.",
                    self.provider.name(),
                    e
                );
                Ok(false)
            }
        }
    }

    /// The table currently in use, if any fetch or injection has happened.
    pub fn current(&self) -> Result<Option<ExchangeRateTable>> {
        let table = self
            .table
            .read()
            .map_err(|e| RateError::CacheError(e.to_string()))?;
        Ok(table.clone())
    }

    /// Installs a table directly, e.g. one restored from a fallback cache.
    pub fn set_table(&self, table: ExchangeRateTable) -> Result<()> {
        self.swap(Some(table))
    }

    fn swap(&self, next: Option<ExchangeRateTable>) -> Result<()> {
        let mut table = self
            .table
            .write()
            .map_err(|e| RateError::CacheError(e.to_string()))?;
        *table = next;
        Ok(())
    }
}
