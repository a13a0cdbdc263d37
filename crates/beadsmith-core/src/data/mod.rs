//! Data models supplied to the design engine
//!
//! This module provides:
//! - The read-only charm and bead catalog
//! - Item identifiers, sizes, and resolved visuals

pub mod catalog;

pub use catalog::{Catalog, CatalogItem, ItemId, ItemKind, ItemSize, ItemVisual};
