use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::registry_errors::RegistryError;
use super::registry_model::CurrencyRegistry;

/// Symbol table shipped with the engine, mirroring the extension defaults.
/// Object order matters: it is the resolver's priority order.
pub const DEFAULT_SYMBOLS_JSON: &str = r#"{
  "$": "USD",
  "€": "EUR",
  "£": "GBP",
  "¥": "JPY",
  "₩": "KRW",
  "CA$": "CAD",
  "A$": "AUD",
  "HK$": "HKD",
  "₹": "INR"
}"#;

/// Default card-issuer surcharge percentages.
pub const DEFAULT_FEES_JSON: &str = r#"{
  "issuers": {
    "none": 0,
    "visa": 2.5,
    "mastercard": 2.7,
    "amex": 3.0,
    "jcb": 1.8,
    "rakuten": 2.0
  }
}"#;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FeeDocument {
    issuers: HashMap<String, Decimal>,
    #[serde(default)]
    target_overrides: HashMap<String, HashMap<String, Decimal>>,
    #[serde(default)]
    presets: HashMap<String, Decimal>,
}

/// Loads a registry from two JSON documents: a symbol-to-code object and a
/// fee document. Any malformed input fails the whole load; detection must
/// not proceed against a partially loaded registry.
pub fn load(symbols_doc: &str, fees_doc: &str) -> Result<CurrencyRegistry, RegistryError> {
    let symbols = parse_symbol_table(symbols_doc)?;
    if symbols.is_empty() {
        return Err(RegistryError::EmptySymbolTable);
    }

    let fees: FeeDocument = serde_json::from_str(fees_doc)
        .map_err(|e| RegistryError::MalformedFees(e.to_string()))?;

    for (issuer, pct) in &fees.issuers {
        if pct.is_sign_negative() {
            return Err(RegistryError::InvalidEntry(format!(
                "negative fee {} for issuer '{}'",
                pct, issuer
            )));
        }
    }

    Ok(CurrencyRegistry::new(
        symbols,
        fees.issuers,
        fees.target_overrides,
        fees.presets,
    ))
}

/// Loads the bundled default tables.
pub fn load_bundled() -> Result<CurrencyRegistry, RegistryError> {
    load(DEFAULT_SYMBOLS_JSON, DEFAULT_FEES_JSON)
}

fn parse_symbol_table(doc: &str) -> Result<Vec<(String, String)>, RegistryError> {
    let value: Value =
        serde_json::from_str(doc).map_err(|e| RegistryError::MalformedSymbols(e.to_string()))?;

    // serde_json's preserve_order feature keeps document order here.
    let object = value
        .as_object()
        .ok_or_else(|| RegistryError::MalformedSymbols("expected a JSON object".to_string()))?;

    let mut symbols = Vec::with_capacity(object.len());
    for (symbol, code) in object {
        let code = code.as_str().ok_or_else(|| {
            RegistryError::InvalidEntry(format!("code for symbol '{}' is not a string", symbol))
        })?;
        if symbol.trim().is_empty() || code.trim().is_empty() {
            return Err(RegistryError::InvalidEntry(format!(
                "empty symbol or code in entry '{}' -> '{}'",
                symbol, code
            )));
        }
        symbols.push((symbol.clone(), code.to_string()));
    }
    Ok(symbols)
}
