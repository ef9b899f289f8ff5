use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TARGET_CURRENCY, NO_FEE_SELECTOR};

/// How the source currency of a span is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceMode {
    /// Detect the source currency from the match content.
    Auto,
    /// Every span is treated as this currency, regardless of content.
    Fixed(String),
}

impl From<String> for SourceMode {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("auto") {
            SourceMode::Auto
        } else {
            SourceMode::Fixed(value)
        }
    }
}

impl From<SourceMode> for String {
    fn from(mode: SourceMode) -> Self {
        match mode {
            SourceMode::Auto => "auto".to_string(),
            SourceMode::Fixed(code) => code,
        }
    }
}

/// The whole engine configuration. Updates always replace the entire value
/// atomically; fields are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionConfig {
    pub is_active: bool,
    pub from_currency: SourceMode,
    pub to_currency: String,
    /// Issuer name, a preset name, or "custom".
    pub card_issuer: String,
    pub custom_fee: Decimal,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            is_active: false,
            from_currency: SourceMode::Auto,
            to_currency: DEFAULT_TARGET_CURRENCY.to_string(),
            card_issuer: NO_FEE_SELECTOR.to_string(),
            custom_fee: Decimal::ZERO,
        }
    }
}

impl ConversionConfig {
    pub fn fee_config(&self) -> FeeConfig {
        FeeConfig {
            selector: self.card_issuer.clone(),
            custom_percent: self.custom_fee,
        }
    }
}

/// The slice of configuration the rate converter needs for fee resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeConfig {
    pub selector: String,
    pub custom_percent: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn source_mode_round_trips_through_strings() {
        assert_eq!(SourceMode::from("auto".to_string()), SourceMode::Auto);
        assert_eq!(SourceMode::from("Auto".to_string()), SourceMode::Auto);
        assert_eq!(
            SourceMode::from("EUR".to_string()),
            SourceMode::Fixed("EUR".to_string())
        );
        assert_eq!(String::from(SourceMode::Auto), "auto");
    }

    #[test]
    fn config_deserializes_from_camel_case() {
        let json = r#"{
            "isActive": true,
            "fromCurrency": "auto",
            "toCurrency": "JPY",
            "cardIssuer": "visa",
            "customFee": 1.5
        }"#;
        let config: ConversionConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_active);
        assert_eq!(config.from_currency, SourceMode::Auto);
        assert_eq!(config.to_currency, "JPY");
        assert_eq!(config.custom_fee, dec!(1.5));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ConversionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ConversionConfig::default());
    }
}
