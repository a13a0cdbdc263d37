//! # Beadsmith
//!
//! Interactive charm and bead bracelet design engine:
//! - Charms hang at continuous positions along a chain curve
//! - Beads fill discrete, mutually exclusive slots on a strand
//! - Per-item capacity and stock limits are enforced on every placement
//! - Undo/redo, pattern generation and volume-discounted pricing
//!
//! ## Architecture
//!
//! Beadsmith is organized as a workspace with multiple crates:
//!
//! 1. **beadsmith-core** - Catalog data, money helpers, error types, constants
//! 2. **beadsmith-designer** - Geometry, projection, stores, history, patterns, pricing, sessions
//! 3. **beadsmith-settings** - Engine configuration files
//! 4. **beadsmith** - This crate: logging setup, config wiring and the CLI

pub use beadsmith_core::data;
pub use beadsmith_designer as designer;

pub use beadsmith_core::{
    format_minor, BasisPoints, Catalog, CatalogItem, Error, ItemId, ItemKind, PlacementError,
    Result,
};

pub use beadsmith_designer::{
    BeadSession, ChainSession, DesignExport, DiscountTier, PatternKind, PriceBreakdown,
    PricingRules, SessionOptions,
};

pub use beadsmith_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Builds session options from a validated configuration.
pub fn session_options(config: &Config) -> SessionOptions {
    let tiers = config
        .pricing
        .tiers
        .iter()
        .map(|tier| DiscountTier::new(tier.min_items, tier.rate_bps))
        .collect();

    SessionOptions {
        offset_bound_mm: config.placement.offset_bound_mm,
        snap_step: config
            .placement
            .snap_enabled
            .then_some(config.placement.snap_step),
        fine_samples: config.projection.fine_samples,
        coarse_samples: config.projection.coarse_samples,
        history_depth: config.history.depth,
        pattern_cap: config.patterns.preview_cap,
        pricing: PricingRules::new(tiers),
        min_scale: config.viewport.min_scale,
        max_scale: config.viewport.max_scale,
        zoom_step: config.viewport.zoom_step,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support (default `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
