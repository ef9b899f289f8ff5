use log::debug;
use std::collections::HashMap;

use super::annotator_model::{Annotation, FragmentId, ReplacementSpan};
use super::fragment_store::FragmentStore;
use crate::amount;
use crate::converter;
use crate::pattern::IdentifierPattern;
use crate::rates::ExchangeRateTable;
use crate::registry::CurrencyRegistry;
use crate::resolver;
use crate::settings::ConversionConfig;

/// Orchestrates detection, resolution, normalization and conversion over a
/// text fragment, and owns the restoration records.
///
/// Per-fragment state machine: Unannotated -> Annotated -> Unannotated. A
/// fragment in the Annotated state is returned unchanged until it is
/// restored; annotating already-annotated text would re-match the inserted
/// conversions and compound them.
#[derive(Debug, Default)]
pub struct TextAnnotator {
    store: FragmentStore,
}

impl TextAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites every convertible span of `text`, recording the original so
    /// it can be restored. Span-level failures (unresolvable currency,
    /// unparsable amount) skip that span only; a missing rate renders the
    /// span with an "N/A" marker.
    pub fn annotate(
        &mut self,
        fragment_id: FragmentId,
        text: &str,
        pattern: &IdentifierPattern,
        config: &ConversionConfig,
        registry: &CurrencyRegistry,
        rates: &ExchangeRateTable,
    ) -> Annotation {
        if self.store.contains(fragment_id) {
            return Annotation::unchanged(text);
        }

        let fees = config.fee_config();
        let mut replacements: Vec<ReplacementSpan> = Vec::new();

        for span in pattern.find_spans(text) {
            let source_code = match resolver::resolve(&span.matched_text, config, registry) {
                Some(code) => code,
                None => {
                    debug!("{}: no currency resolved for '{}'", fragment_id, span.matched_text);
                    continue;
                }
            };

            // No-op policy: a span already in the target currency is left alone.
            if source_code == config.to_currency {
                continue;
            }

            let amount = match amount::parse(&span.raw_amount) {
                Ok(amount) => amount,
                Err(e) => {
                    debug!("{}: skipping span '{}': {}", fragment_id, span.matched_text, e);
                    continue;
                }
            };

            let display = converter::convert(
                amount,
                &source_code,
                &config.to_currency,
                rates,
                &fees,
                registry,
            );

            replacements.push(ReplacementSpan {
                start: span.start,
                end: span.end,
                replacement: format!("{} ({})", span.matched_text, display),
                original: span.matched_text,
            });
        }

        if replacements.is_empty() {
            return Annotation::unchanged(text);
        }

        // All replacements are applied against the original text in one
        // pass, so inserted text is never re-scanned and offsets never shift.
        let mut rewritten = String::with_capacity(text.len() + replacements.len() * 16);
        let mut cursor = 0;
        for rep in &replacements {
            rewritten.push_str(&text[cursor..rep.start]);
            rewritten.push_str(&rep.replacement);
            cursor = rep.end;
        }
        rewritten.push_str(&text[cursor..]);

        self.store.insert_original(fragment_id, text.to_string());

        Annotation {
            text: rewritten,
            changed: true,
        }
    }

    /// Returns the original text and forgets the fragment. Restoring an
    /// un-annotated fragment is a no-op, not an error.
    pub fn restore(&mut self, fragment_id: FragmentId) -> Option<String> {
        self.store.take(fragment_id)
    }

    /// Restores everything; used when conversion is globally disabled.
    pub fn restore_all(&mut self) -> HashMap<FragmentId, String> {
        self.store.drain_all()
    }

    pub fn is_annotated(&self, fragment_id: FragmentId) -> bool {
        self.store.contains(fragment_id)
    }

    pub fn annotated_count(&self) -> usize {
        self.store.len()
    }
}
