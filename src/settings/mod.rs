pub mod settings_model;
pub mod settings_repository;
pub mod settings_service;

pub use settings_model::{ConversionConfig, FeeConfig, SourceMode};
pub use settings_repository::{MemorySettingsRepository, SettingsRepositoryTrait};
pub use settings_service::SettingsService;
