use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::{Result, SettingsError};

/// Contract for the external key-value settings store. The concrete backend
/// (browser sync storage, a file, a database) lives outside this crate.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
    async fn set_setting(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory repository for tests and embedding.
#[derive(Default)]
pub struct MemorySettingsRepository {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepositoryTrait for MemorySettingsRepository {
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
