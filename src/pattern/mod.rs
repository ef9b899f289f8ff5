pub mod pattern_builder;

pub use pattern_builder::{IdentifierPattern, MatchSpan};
