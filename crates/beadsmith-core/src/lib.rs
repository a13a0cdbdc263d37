//! # Beadsmith Core
//!
//! Core types and utilities shared by the Beadsmith crates.
//! Provides the error model, the read-only catalog data, minor currency
//! unit helpers, and default tuning constants.

pub mod constants;
pub mod data;
pub mod error;
pub mod money;

pub use data::{Catalog, CatalogItem, ItemId, ItemKind, ItemSize, ItemVisual};

pub use error::{CatalogError, Error, GeometryError, PlacementError, Result};

pub use money::{format_minor, BasisPoints};
