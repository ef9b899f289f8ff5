pub mod providers;
pub mod rates_errors;
pub mod rates_model;
pub mod rates_service;
pub mod rates_traits;

pub use rates_errors::RateError;
pub use rates_model::ExchangeRateTable;
pub use rates_service::RateService;
pub use rates_traits::RateProviderTrait;
