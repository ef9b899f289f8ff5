use regex::Regex;

use crate::constants::PIVOT_CURRENCY;
use crate::errors::EngineError;
use crate::registry::CurrencyRegistry;

/// One matched (identifier, amount) occurrence within a fragment's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub matched_text: String,
    pub raw_amount: String,
}

/// Composite pattern recognizing a currency identifier adjacent to a number,
/// in either order.
///
/// The numeric token is intentionally permissive: one or more digit groups
/// optionally separated by a single space, comma or period, so "1,234",
/// "1.234,56" and "1 234" all match as one token. Disambiguation is the
/// normalizer's job. Symbols are embedded literally (escaped); codes carry
/// word boundaries so a code never matches inside a longer word.
#[derive(Debug, Clone)]
pub struct IdentifierPattern {
    regex: Regex,
}

const NUMBER_TOKEN: &str = r"\d+(?:[\s.,]\d+)*";

impl IdentifierPattern {
    /// Compiles the registry into a single matching pattern. Rebuilt only
    /// when the registry changes; immutable and reusable across scans.
    pub fn build(registry: &CurrencyRegistry) -> Result<Self, EngineError> {
        let mut alternatives: Vec<String> = Vec::new();

        for (symbol, _) in registry.symbols() {
            alternatives.push(regex::escape(symbol));
        }

        let mut codes = registry.codes();
        if !codes.contains(&PIVOT_CURRENCY) {
            codes.push(PIVOT_CURRENCY);
        }
        for code in codes {
            alternatives.push(format!(r"\b{}\b", regex::escape(code)));
        }

        let identifiers = alternatives.join("|");
        let pattern = format!(
            r"(?:{ids})\s*(?P<amt_a>{num})|(?P<amt_b>{num})\s*(?:{ids})",
            ids = identifiers,
            num = NUMBER_TOKEN,
        );

        let regex = Regex::new(&pattern).map_err(|e| EngineError::InvalidPattern(e.to_string()))?;
        Ok(IdentifierPattern { regex })
    }

    /// All non-overlapping spans in document order, with byte offsets into
    /// the scanned text.
    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let amount = caps.name("amt_a").or_else(|| caps.name("amt_b"))?;
                Some(MatchSpan {
                    start: whole.start(),
                    end: whole.end(),
                    matched_text: whole.as_str().to_string(),
                    raw_amount: amount.as_str().to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    fn pattern() -> IdentifierPattern {
        IdentifierPattern::build(&registry::load_bundled().unwrap()).unwrap()
    }

    #[test]
    fn symbol_before_number() {
        let spans = pattern().find_spans("This item costs $10.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].matched_text, "$10");
        assert_eq!(spans[0].raw_amount, "10");
    }

    #[test]
    fn number_before_symbol() {
        let spans = pattern().find_spans("The total is 50.00 €");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].matched_text, "50.00 €");
        assert_eq!(spans[0].raw_amount, "50.00");
    }

    #[test]
    fn code_adjacency_with_boundaries() {
        let spans = pattern().find_spans("about 25 USD in cash");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].matched_text, "25 USD");

        // A code embedded in a longer word is not an identifier.
        assert!(pattern().find_spans("the USDX index rose 3 points").is_empty());
    }

    #[test]
    fn grouped_numbers_match_as_one_token() {
        for (text, amount) in [
            ("price ¥1,500 today", "1,500"),
            ("costs €1.234,56 total", "1.234,56"),
            ("around 1 234 USD", "1 234"),
        ] {
            let spans = pattern().find_spans(text);
            assert_eq!(spans.len(), 1, "no single span in {:?}", text);
            assert_eq!(spans[0].raw_amount, amount);
        }
    }

    #[test]
    fn dollar_symbol_is_escaped_not_an_anchor() {
        let spans = pattern().find_spans("pay $99.99 now");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].raw_amount, "99.99");
    }

    #[test]
    fn multiple_spans_in_document_order() {
        let spans = pattern().find_spans("First item is $10, second is €20.");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].matched_text, "$10");
        assert_eq!(spans[1].matched_text, "€20");
        assert!(spans[0].end <= spans[1].start);
    }

    #[test]
    fn bare_numbers_do_not_match() {
        assert!(pattern()
            .find_spans("Order 54321 for item #88 arrives today.")
            .is_empty());
    }
}
