pub mod registry_errors;
pub mod registry_model;
pub mod registry_service;

pub use registry_errors::RegistryError;
pub use registry_model::CurrencyRegistry;
pub use registry_service::{load, load_bundled};
