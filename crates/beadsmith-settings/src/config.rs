//! Configuration and settings management for Beadsmith
//!
//! Provides configuration file handling and validation for the placement
//! engine. Supports JSON and TOML file formats; the default location is in the
//! platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Placement (offset bound, snapping)
//! - Projection (closest-point sample counts per input device)
//! - Viewport (zoom bounds and step)
//! - History (undo depth)
//! - Patterns (preview cap)
//! - Pricing (volume discount tiers)

use beadsmith_core::constants::{
    HISTORY_DEPTH, MAX_SCALE, MIN_SCALE, OFFSET_BOUND_MM, PATTERN_PREVIEW_CAP,
    PROJECTION_SAMPLES_COARSE, PROJECTION_SAMPLES_FINE, SNAP_STEP, ZOOM_STEP,
};
use beadsmith_core::BasisPoints;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Application directory under the platform config directory.
const APP_DIR: &str = "beadsmith";

/// Default config file name.
const CONFIG_FILE: &str = "config.toml";

/// Charm placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Largest perpendicular charm offset, in millimeters
    pub offset_bound_mm: f64,
    /// Snap `t` to a grid while placing
    pub snap_enabled: bool,
    /// Grid step used when snapping
    pub snap_step: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            offset_bound_mm: OFFSET_BOUND_MM,
            snap_enabled: false,
            snap_step: SNAP_STEP,
        }
    }
}

/// Pointer projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Samples for mouse and pen input
    pub fine_samples: usize,
    /// Samples for touch input
    pub coarse_samples: usize,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            fine_samples: PROJECTION_SAMPLES_FINE,
            coarse_samples: PROJECTION_SAMPLES_COARSE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Undo steps kept per design
    pub depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            depth: HISTORY_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSettings {
    /// Beads produced by one generated pattern, at most
    pub preview_cap: u32,
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self {
            preview_cap: PATTERN_PREVIEW_CAP,
        }
    }
}

/// One volume discount tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTierSetting {
    /// Item count from which the tier applies
    pub min_items: u32,
    /// Discount rate in basis points
    pub rate_bps: BasisPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub tiers: Vec<DiscountTierSetting>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            tiers: vec![
                DiscountTierSetting {
                    min_items: 5,
                    rate_bps: BasisPoints::from_percent(5),
                },
                DiscountTierSetting {
                    min_items: 10,
                    rate_bps: BasisPoints::from_percent(10),
                },
            ],
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub placement: PlacementSettings,
    pub projection: ProjectionSettings,
    pub viewport: ViewportSettings,
    pub history: HistorySettings,
    pub patterns: PatternSettings,
    pub pricing: PricingSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into()),
    }
}

fn out_of_range(key: &str, value: impl ToString) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/beadsmith/config.toml`).
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, or the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a `.json` or `.toml` file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError(e.to_string()))?;

        Ok(())
    }

    /// Validate all configuration values
    pub fn validate(&self) -> SettingsResult<()> {
        let placement = &self.placement;
        if !placement.offset_bound_mm.is_finite() || placement.offset_bound_mm < 0.0 {
            return Err(out_of_range("placement.offset_bound_mm", placement.offset_bound_mm));
        }
        if !placement.snap_step.is_finite() || placement.snap_step <= 0.0 || placement.snap_step > 1.0 {
            return Err(out_of_range("placement.snap_step", placement.snap_step));
        }

        if self.projection.fine_samples < 2 {
            return Err(out_of_range("projection.fine_samples", self.projection.fine_samples));
        }
        if self.projection.coarse_samples < 2 {
            return Err(out_of_range("projection.coarse_samples", self.projection.coarse_samples));
        }

        let viewport = &self.viewport;
        if !viewport.min_scale.is_finite() || viewport.min_scale <= 0.0 {
            return Err(out_of_range("viewport.min_scale", viewport.min_scale));
        }
        if !viewport.max_scale.is_finite() || viewport.max_scale < viewport.min_scale {
            return Err(SettingsError::invalid(
                "viewport.max_scale",
                "must be finite and >= min_scale",
            ));
        }
        if !viewport.zoom_step.is_finite() || viewport.zoom_step <= 0.0 {
            return Err(out_of_range("viewport.zoom_step", viewport.zoom_step));
        }

        if self.history.depth == 0 {
            return Err(SettingsError::invalid("history.depth", "must be > 0"));
        }

        for (i, tier) in self.pricing.tiers.iter().enumerate() {
            if tier.rate_bps.0 > 10_000 {
                return Err(out_of_range(&format!("pricing.tiers[{}].rate_bps", i), tier.rate_bps.0));
            }
        }
        let mut thresholds: Vec<u32> = self.pricing.tiers.iter().map(|t| t.min_items).collect();
        thresholds.sort_unstable();
        if thresholds.windows(2).any(|w| w[0] == w[1]) {
            return Err(SettingsError::invalid(
                "pricing.tiers",
                "tier thresholds must be unique",
            ));
        }

        Ok(())
    }
}
