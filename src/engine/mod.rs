pub mod conversion_engine;
pub mod engine_traits;

pub use conversion_engine::{ConversionEngine, EngineContext};
pub use engine_traits::{FragmentSource, VecFragmentSource};
