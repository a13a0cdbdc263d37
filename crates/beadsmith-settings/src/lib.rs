//! Beadsmith Settings Crate
//!
//! Handles engine configuration: loading, validation and persistence.

pub mod config;
pub mod error;

pub use config::{
    Config, DiscountTierSetting, HistorySettings, PatternSettings, PlacementSettings,
    PricingSettings, ProjectionSettings, ViewportSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
