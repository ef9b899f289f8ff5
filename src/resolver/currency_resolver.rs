use crate::constants::PIVOT_CURRENCY;
use crate::registry::CurrencyRegistry;
use crate::settings::{ConversionConfig, SourceMode};

/// Determines which currency a matched span denotes.
///
/// A fixed source mode wins unconditionally and ignores the match content.
/// Auto-detection case-normalizes the match and tests, in order: known
/// symbols (registry insertion order, first hit wins), known codes, then the
/// literal pivot code. Symbols outrank codes because a symbol is a stronger
/// signal than a bare 3-letter substring. A match containing identifiers of
/// two different currencies resolves to whichever is hit first; that
/// ordering is the documented behavior, not an accident.
///
/// Returns `None` when nothing is recognized; the caller leaves that span
/// unconverted.
pub fn resolve(
    match_text: &str,
    config: &ConversionConfig,
    registry: &CurrencyRegistry,
) -> Option<String> {
    if let SourceMode::Fixed(code) = &config.from_currency {
        return Some(code.clone());
    }

    let normalized = match_text.to_uppercase();

    for (symbol, code) in registry.symbols() {
        if normalized.contains(&symbol.to_uppercase()) {
            return Some(code.to_string());
        }
    }

    for code in registry.codes() {
        if normalized.contains(&code.to_uppercase()) {
            return Some(code.to_string());
        }
    }

    if normalized.contains(PIVOT_CURRENCY) {
        return Some(PIVOT_CURRENCY.to_string());
    }

    None
}
