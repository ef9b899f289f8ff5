pub mod amount;
pub mod annotator;
pub mod constants;
pub mod converter;
pub mod engine;
pub mod errors;
pub mod pattern;
pub mod rates;
pub mod registry;
pub mod resolver;
pub mod settings;

pub use annotator::{Annotation, FragmentId};
pub use engine::{ConversionEngine, EngineContext, FragmentSource};
pub use errors::{Error, Result};
pub use rates::{ExchangeRateTable, RateService};
pub use registry::CurrencyRegistry;
pub use settings::{ConversionConfig, SettingsService, SourceMode};
