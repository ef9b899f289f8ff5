pub mod rate_converter;

pub use rate_converter::{convert, UNAVAILABLE};
