use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::constants::PIVOT_CURRENCY;

/// Immutable lookup tables driving detection and fee resolution.
///
/// The symbol table keeps its source-document insertion order; that order is
/// the resolver's priority order when a match contains more than one known
/// symbol. The reverse code-to-symbol map is derived at load time (first
/// symbol for a code wins) and always carries an entry for the pivot
/// currency, falling back to the code itself when the source table has no
/// symbol for it.
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    symbols: Vec<(String, String)>,
    code_symbols: HashMap<String, String>,
    fee_defaults: HashMap<String, Decimal>,
    fee_overrides: HashMap<String, HashMap<String, Decimal>>,
    fee_presets: HashMap<String, Decimal>,
}

impl CurrencyRegistry {
    pub(crate) fn new(
        symbols: Vec<(String, String)>,
        fee_defaults: HashMap<String, Decimal>,
        fee_overrides: HashMap<String, HashMap<String, Decimal>>,
        fee_presets: HashMap<String, Decimal>,
    ) -> Self {
        let mut code_symbols: HashMap<String, String> = HashMap::new();
        for (symbol, code) in &symbols {
            code_symbols
                .entry(code.clone())
                .or_insert_with(|| symbol.clone());
        }
        code_symbols
            .entry(PIVOT_CURRENCY.to_string())
            .or_insert_with(|| PIVOT_CURRENCY.to_string());

        CurrencyRegistry {
            symbols,
            code_symbols,
            fee_defaults,
            fee_overrides,
            fee_presets,
        }
    }

    /// Symbol table entries in resolution-priority order.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &str)> {
        self.symbols.iter().map(|(s, c)| (s.as_str(), c.as_str()))
    }

    /// Known currency codes, deduplicated, in symbol-table order.
    pub fn codes(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for (_, code) in &self.symbols {
            if !seen.contains(&code.as_str()) {
                seen.push(code.as_str());
            }
        }
        seen
    }

    /// Display symbol for a code. The pivot currency always resolves.
    pub fn symbol_for(&self, code: &str) -> Option<&str> {
        self.code_symbols.get(code).map(String::as_str)
    }

    pub fn fee_default(&self, issuer: &str) -> Option<Decimal> {
        self.fee_defaults.get(issuer).copied()
    }

    /// Per-target-currency surcharge override for an issuer.
    pub fn fee_override(&self, issuer: &str, target_code: &str) -> Option<Decimal> {
        self.fee_overrides
            .get(issuer)
            .and_then(|by_target| by_target.get(target_code))
            .copied()
    }

    pub fn fee_preset(&self, name: &str) -> Option<Decimal> {
        self.fee_presets.get(name).copied()
    }

    pub fn fee_presets(&self) -> &HashMap<String, Decimal> {
        &self.fee_presets
    }

    /// New registry with the named presets replaced wholesale. Registry
    /// values are never mutated in place; callers swap the whole value.
    pub fn with_presets(&self, presets: HashMap<String, Decimal>) -> Self {
        let mut next = self.clone();
        next.fee_presets = presets;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn registry() -> CurrencyRegistry {
        CurrencyRegistry::new(
            vec![
                ("$".to_string(), "USD".to_string()),
                ("US$".to_string(), "USD".to_string()),
                ("€".to_string(), "EUR".to_string()),
            ],
            HashMap::from([("visa".to_string(), dec!(2.5))]),
            HashMap::from([(
                "visa".to_string(),
                HashMap::from([("JPY".to_string(), dec!(2.2))]),
            )]),
            HashMap::new(),
        )
    }

    #[test]
    fn derives_first_symbol_per_code() {
        let reg = registry();
        assert_eq!(reg.symbol_for("USD"), Some("$"));
        assert_eq!(reg.symbol_for("EUR"), Some("€"));
    }

    #[test]
    fn pivot_symbol_always_present() {
        let reg = CurrencyRegistry::new(
            vec![("€".to_string(), "EUR".to_string())],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
        );
        assert_eq!(reg.symbol_for("USD"), Some("USD"));
    }

    #[test]
    fn codes_are_deduplicated_in_order() {
        let reg = registry();
        assert_eq!(reg.codes(), vec!["USD", "EUR"]);
    }

    #[test]
    fn fee_lookup_paths() {
        let reg = registry();
        assert_eq!(reg.fee_default("visa"), Some(dec!(2.5)));
        assert_eq!(reg.fee_override("visa", "JPY"), Some(dec!(2.2)));
        assert_eq!(reg.fee_override("visa", "EUR"), None);
        assert_eq!(reg.fee_preset("travel"), None);
    }

    #[test]
    fn with_presets_replaces_wholesale() {
        let reg = registry();
        let next = reg.with_presets(HashMap::from([("travel".to_string(), dec!(1.5))]));
        assert_eq!(next.fee_preset("travel"), Some(dec!(1.5)));
        assert_eq!(reg.fee_preset("travel"), None);
    }
}
