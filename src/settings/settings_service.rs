use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::settings_model::ConversionConfig;
use super::settings_repository::SettingsRepositoryTrait;
use crate::constants::{SETTINGS_CONFIG_KEY, SETTINGS_PRESETS_KEY};
use crate::errors::{Result, SettingsError};

/// Loads and persists the conversion configuration and the user-defined fee
/// presets. The configuration is always read and written as one value, so a
/// settings update can never be observed half-applied.
pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService { repository }
    }

    /// The persisted configuration, or the defaults when nothing is stored.
    pub async fn load_config(&self) -> Result<ConversionConfig> {
        match self.repository.get_setting(SETTINGS_CONFIG_KEY).await? {
            Some(raw) => {
                let config: ConversionConfig =
                    serde_json::from_str(&raw).map_err(SettingsError::from)?;
                Ok(config)
            }
            None => {
                debug!("no persisted conversion config, using defaults");
                Ok(ConversionConfig::default())
            }
        }
    }

    pub async fn save_config(&self, config: &ConversionConfig) -> Result<()> {
        let raw = serde_json::to_string(config).map_err(SettingsError::from)?;
        self.repository.set_setting(SETTINGS_CONFIG_KEY, &raw).await
    }

    pub async fn load_presets(&self) -> Result<HashMap<String, Decimal>> {
        match self.repository.get_setting(SETTINGS_PRESETS_KEY).await? {
            Some(raw) => {
                let presets = serde_json::from_str(&raw).map_err(SettingsError::from)?;
                Ok(presets)
            }
            None => Ok(HashMap::new()),
        }
    }

    pub async fn save_presets(&self, presets: &HashMap<String, Decimal>) -> Result<()> {
        let raw = serde_json::to_string(presets).map_err(SettingsError::from)?;
        self.repository.set_setting(SETTINGS_PRESETS_KEY, &raw).await
    }

    /// Adds or replaces one named preset and returns the updated set.
    pub async fn add_preset(&self, name: &str, percent: Decimal) -> Result<HashMap<String, Decimal>> {
        if name.trim().is_empty() {
            return Err(SettingsError::Malformed("preset name is empty".to_string()).into());
        }
        if percent.is_sign_negative() {
            return Err(
                SettingsError::Malformed(format!("negative preset fee {}", percent)).into(),
            );
        }
        let mut presets = self.load_presets().await?;
        presets.insert(name.to_string(), percent);
        self.save_presets(&presets).await?;
        Ok(presets)
    }

    pub async fn remove_preset(&self, name: &str) -> Result<HashMap<String, Decimal>> {
        let mut presets = self.load_presets().await?;
        presets.remove(name);
        self.save_presets(&presets).await?;
        Ok(presets)
    }
}
