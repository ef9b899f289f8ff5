use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::engine_traits::FragmentSource;
use crate::annotator::{Annotation, FragmentId, TextAnnotator};
use crate::constants::PIVOT_CURRENCY;
use crate::errors::{EngineError, Result};
use crate::pattern::IdentifierPattern;
use crate::rates::ExchangeRateTable;
use crate::registry::CurrencyRegistry;
use crate::settings::ConversionConfig;

/// Everything one scan needs, bundled as an immutable value.
///
/// There is no global mutable state: updates build a fresh context and swap
/// it whole. A scan that started against one context finishes against it;
/// nothing is ever patched in place underneath it.
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub config: ConversionConfig,
    pub registry: Arc<CurrencyRegistry>,
    pub pattern: Arc<IdentifierPattern>,
    pub rates: Arc<ExchangeRateTable>,
}

impl EngineContext {
    /// Compiles the pattern from the registry. Only registry changes need
    /// this; config and rate swaps carry the compiled pattern forward.
    fn build(
        config: ConversionConfig,
        registry: Arc<CurrencyRegistry>,
        rates: Arc<ExchangeRateTable>,
    ) -> Result<Self> {
        let pattern = Arc::new(IdentifierPattern::build(&registry)?);
        Ok(EngineContext {
            config,
            registry,
            pattern,
            rates,
        })
    }
}

/// The detection-and-conversion engine.
///
/// Inert until `initialize` succeeds: without a loaded registry no pattern
/// exists and every scan fails with `EngineError::NotInitialized` rather
/// than silently matching nothing. Invocation is synchronous per scan
/// request; callers serialize overlapping scan triggers.
pub struct ConversionEngine {
    context: Arc<RwLock<Option<Arc<EngineContext>>>>,
    annotator: Arc<RwLock<TextAnnotator>>,
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionEngine {
    pub fn new() -> Self {
        ConversionEngine {
            context: Arc::new(RwLock::new(None)),
            annotator: Arc::new(RwLock::new(TextAnnotator::new())),
        }
    }

    /// Arms the engine with a loaded registry, a configuration and an
    /// optional initial rate table (pivot-only when `None`, so unknown
    /// currencies render "N/A" until the first refresh lands).
    pub fn initialize(
        &self,
        registry: CurrencyRegistry,
        config: ConversionConfig,
        rates: Option<ExchangeRateTable>,
    ) -> Result<()> {
        let rates = rates.unwrap_or_else(|| ExchangeRateTable::empty(PIVOT_CURRENCY));
        let context = EngineContext::build(config, Arc::new(registry), Arc::new(rates))?;
        info!(
            "engine initialized: target {}, {} rate entries",
            context.config.to_currency,
            context.rates.len()
        );
        self.swap_context(context)
    }

    pub fn is_initialized(&self) -> bool {
        self.context
            .read()
            .map(|ctx| ctx.is_some())
            .unwrap_or(false)
    }

    fn current_context(&self) -> Result<Arc<EngineContext>> {
        let guard = self
            .context
            .read()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))?;
        guard.clone().ok_or_else(|| EngineError::NotInitialized.into())
    }

    fn swap_context(&self, next: EngineContext) -> Result<()> {
        let mut guard = self
            .context
            .write()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))?;
        *guard = Some(Arc::new(next));
        Ok(())
    }

    /// Replaces the whole configuration atomically and restores every
    /// annotated fragment, returning the originals keyed by identity.
    /// Existing annotations were produced under the old config, so the
    /// caller writes the originals back and, while still active, rescans.
    /// After a disable, further scans are no-ops until re-enabled.
    pub fn update_config(
        &self,
        config: ConversionConfig,
    ) -> Result<HashMap<FragmentId, String>> {
        let active = config.is_active;

        let current = self.current_context()?;
        let next = EngineContext {
            config,
            registry: Arc::clone(&current.registry),
            pattern: Arc::clone(&current.pattern),
            rates: Arc::clone(&current.rates),
        };
        self.swap_context(next)?;

        debug!(
            "config replaced (active: {}); restoring annotated fragments",
            active
        );
        self.restore_all()
    }

    /// Installs a freshly fetched rate table. The registry, pattern and
    /// config carry over unchanged.
    pub fn update_rates(&self, rates: ExchangeRateTable) -> Result<()> {
        let current = self.current_context()?;
        let next = EngineContext {
            config: current.config.clone(),
            registry: Arc::clone(&current.registry),
            pattern: Arc::clone(&current.pattern),
            rates: Arc::new(rates),
        };
        self.swap_context(next)
    }

    /// Replaces the user-defined fee presets. The registry changes, so the
    /// pattern is rebuilt along with the context.
    pub fn update_fee_presets(&self, presets: HashMap<String, Decimal>) -> Result<()> {
        let current = self.current_context()?;
        let registry = current.registry.with_presets(presets);
        let next = EngineContext::build(
            current.config.clone(),
            Arc::new(registry),
            Arc::clone(&current.rates),
        )?;
        self.swap_context(next)
    }

    /// Scans one fragment. The active flag is checked against the context
    /// in force at application time, so results of a scan triggered before
    /// a disable are discarded rather than applied.
    pub fn scan_fragment(&self, fragment_id: FragmentId, text: &str) -> Result<Annotation> {
        let ctx = self.current_context()?;

        if !ctx.config.is_active {
            return Ok(Annotation::unchanged(text));
        }

        let mut annotator = self
            .annotator
            .write()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))?;

        Ok(annotator.annotate(
            fragment_id,
            text,
            &ctx.pattern,
            &ctx.config,
            &ctx.registry,
            &ctx.rates,
        ))
    }

    /// Drives one full pass over a fragment supplier and returns the
    /// fragments that changed, with their rewritten text.
    pub fn scan_source(
        &self,
        source: &mut dyn FragmentSource,
    ) -> Result<Vec<(FragmentId, String)>> {
        let fragments: Vec<(FragmentId, String)> = source.fragments().collect();
        let mut changed = Vec::new();

        for (id, text) in fragments {
            let annotation = self.scan_fragment(id, &text)?;
            if annotation.changed {
                changed.push((id, annotation.text));
            }
        }

        debug!("scan pass rewrote {} fragment(s)", changed.len());
        Ok(changed)
    }

    /// Original text of one fragment, if it is currently annotated.
    pub fn restore_fragment(&self, fragment_id: FragmentId) -> Result<Option<String>> {
        let mut annotator = self
            .annotator
            .write()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))?;
        Ok(annotator.restore(fragment_id))
    }

    /// Originals of every annotated fragment; clears the store.
    pub fn restore_all(&self) -> Result<HashMap<FragmentId, String>> {
        let mut annotator = self
            .annotator
            .write()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))?;
        Ok(annotator.restore_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::engine_traits::VecFragmentSource;
    use crate::errors::Error;
    use crate::registry;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn rates(entries: &[(&str, rust_decimal::Decimal)]) -> ExchangeRateTable {
        ExchangeRateTable::new(
            "USD",
            entries
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
            Utc::now(),
        )
        .unwrap()
    }

    fn active_config(target: &str) -> ConversionConfig {
        ConversionConfig {
            is_active: true,
            to_currency: target.to_string(),
            ..ConversionConfig::default()
        }
    }

    fn engine(target: &str) -> ConversionEngine {
        let engine = ConversionEngine::new();
        engine
            .initialize(
                registry::load_bundled().unwrap(),
                active_config(target),
                Some(rates(&[("JPY", dec!(150)), ("EUR", dec!(0.9))])),
            )
            .unwrap();
        engine
    }

    #[test]
    fn inert_until_initialized() {
        let engine = ConversionEngine::new();
        assert!(!engine.is_initialized());
        assert!(matches!(
            engine.scan_fragment(FragmentId(1), "costs $10"),
            Err(Error::Engine(EngineError::NotInitialized))
        ));
    }

    #[test]
    fn scans_and_rewrites_fragments() {
        let engine = engine("JPY");
        let annotation = engine
            .scan_fragment(FragmentId(1), "This item costs $10.")
            .unwrap();
        assert!(annotation.changed);
        assert_eq!(annotation.text, "This item costs $10 (¥1,500).");
    }

    #[test]
    fn inactive_config_discards_scan_results() {
        let engine = engine("JPY");
        let mut config = active_config("JPY");
        config.is_active = false;
        engine.update_config(config).unwrap();

        let annotation = engine.scan_fragment(FragmentId(1), "costs $10").unwrap();
        assert!(!annotation.changed);
        assert_eq!(annotation.text, "costs $10");
    }

    #[test]
    fn disable_restores_all_fragments() {
        let engine = engine("JPY");
        engine.scan_fragment(FragmentId(1), "price $1").unwrap();
        engine.scan_fragment(FragmentId(2), "price $2").unwrap();

        let mut config = active_config("JPY");
        config.is_active = false;
        let restored = engine.update_config(config).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored[&FragmentId(1)], "price $1");
        assert_eq!(restored[&FragmentId(2)], "price $2");
    }

    #[test]
    fn rate_update_swaps_the_whole_table() {
        let engine = engine("JPY");
        let first = engine.scan_fragment(FragmentId(1), "costs $10").unwrap();
        assert_eq!(first.text, "costs $10 (¥1,500)");

        engine.update_rates(rates(&[("JPY", dec!(120))])).unwrap();

        // The annotated fragment must be restored before re-annotation.
        let original = engine.restore_fragment(FragmentId(1)).unwrap().unwrap();
        let second = engine.scan_fragment(FragmentId(1), &original).unwrap();
        assert_eq!(second.text, "costs $10 (¥1,200)");
    }

    #[test]
    fn config_change_restores_fragments_for_rescan() {
        let engine = engine("JPY");
        let annotated = engine.scan_fragment(FragmentId(1), "costs $10").unwrap();
        assert_eq!(annotated.text, "costs $10 (¥1,500)");

        // A settings change hands the originals back; rescanning them picks
        // up the new target.
        let restored = engine.update_config(active_config("EUR")).unwrap();
        assert_eq!(restored[&FragmentId(1)], "costs $10");

        let again = engine
            .scan_fragment(FragmentId(1), &restored[&FragmentId(1)])
            .unwrap();
        assert_eq!(again.text, "costs $10 (€9)");
    }

    #[test]
    fn registry_preserving_updates_reuse_the_compiled_pattern() {
        let engine = engine("JPY");
        let before = engine.current_context().unwrap();

        engine.update_rates(rates(&[("JPY", dec!(120))])).unwrap();
        engine.update_config(active_config("EUR")).unwrap();
        let after = engine.current_context().unwrap();
        assert!(Arc::ptr_eq(&before.pattern, &after.pattern));

        // Presets swap the registry, so that update does recompile.
        engine
            .update_fee_presets(HashMap::from([("travel".to_string(), dec!(10))]))
            .unwrap();
        let rebuilt = engine.current_context().unwrap();
        assert!(!Arc::ptr_eq(&before.pattern, &rebuilt.pattern));
    }

    #[test]
    fn fee_presets_take_effect_via_selector() {
        let engine = engine("JPY");
        engine
            .update_fee_presets(HashMap::from([("travel".to_string(), dec!(10))]))
            .unwrap();

        let mut config = active_config("JPY");
        config.card_issuer = "travel".to_string();
        engine.update_config(config).unwrap();

        let annotation = engine.scan_fragment(FragmentId(1), "costs $10").unwrap();
        assert_eq!(annotation.text, "costs $10 (¥1,650)");
    }

    #[test]
    fn scan_source_reports_only_changed_fragments() {
        let engine = engine("JPY");
        let mut source = VecFragmentSource::new(vec![
            (FragmentId(1), "costs $10 today".to_string()),
            (FragmentId(2), "nothing to convert".to_string()),
        ]);

        let changed = engine.scan_source(&mut source).unwrap();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].0, FragmentId(1));
        assert_eq!(changed[0].1, "costs $10 (¥1,500) today");

        for (id, text) in changed {
            source.apply(id, text);
        }

        // A second pass over the rewritten page is a no-op.
        let changed = engine.scan_source(&mut source).unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn initializes_without_rates_to_pivot_only_table() {
        let engine = ConversionEngine::new();
        engine
            .initialize(registry::load_bundled().unwrap(), active_config("JPY"), None)
            .unwrap();
        let annotation = engine.scan_fragment(FragmentId(1), "costs $10").unwrap();
        assert_eq!(annotation.text, "costs $10 (N/A)");
    }
}
