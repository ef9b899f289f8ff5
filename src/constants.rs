/// Pivot currency all exchange rates are expressed against
pub const PIVOT_CURRENCY: &str = "USD";

/// Default target currency for conversions
pub const DEFAULT_TARGET_CURRENCY: &str = "JPY";

/// Fee selector meaning "use the configured custom fee percent"
pub const CUSTOM_FEE_SELECTOR: &str = "custom";

/// Fee selector meaning "no surcharge"
pub const NO_FEE_SELECTOR: &str = "none";

/// Base URL of the default exchange-rate provider
pub const RATE_API_BASE_URL: &str = "https://open.er-api.com/v6/latest";

/// Storage key for the persisted conversion settings
pub const SETTINGS_CONFIG_KEY: &str = "conversionConfig";

/// Storage key for user-defined fee presets
pub const SETTINGS_PRESETS_KEY: &str = "feePresets";
