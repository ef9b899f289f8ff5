pub mod amount_normalizer;

pub use amount_normalizer::parse;
