pub mod currency_resolver;

pub use currency_resolver::resolve;
