//! Error handling for Beadsmith
//!
//! Provides the error types shared by every layer of the design engine:
//! - Placement errors (capacity and stock rejections)
//! - Geometry errors (malformed path data, recovered internally)
//! - Catalog errors (loading the read-only catalog feed)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Placement error type
///
/// Reported to the caller when a store mutation is rejected. The store is left
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Adding would push the item's placed quantity past its limit
    #[error("Capacity exceeded for '{item_id}': at most {limit} per design")]
    CapacityExceeded {
        /// The catalog item that hit its cap.
        item_id: String,
        /// The effective per-design limit for the item.
        limit: u32,
    },

    /// The catalog item has no stock left
    #[error("'{item_id}' is out of stock")]
    OutOfStock {
        /// The catalog item with zero stock.
        item_id: String,
    },

    /// The catalog does not contain the referenced item
    #[error("Unknown catalog item '{item_id}'")]
    UnknownItem {
        /// The id that could not be resolved.
        item_id: String,
    },

    /// Slot index outside the bracelet's slot range
    #[error("Slot {position} is outside 0..{slot_count}")]
    SlotOutOfRange {
        /// The requested slot index.
        position: u32,
        /// Number of slots on the layout.
        slot_count: u32,
    },

    /// Quantity must be at least one
    #[error("Invalid quantity {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: u32,
    },
}

impl PlacementError {
    /// True for the rejections a shopper can act on (cap or stock reached).
    pub fn is_capacity_error(&self) -> bool {
        matches!(
            self,
            PlacementError::CapacityExceeded { .. } | PlacementError::OutOfStock { .. }
        )
    }
}

/// Geometry sampling error type
///
/// Raised while flattening a path layout. Never surfaced to callers of the
/// sampler: it is logged and replaced by linear fallback positioning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The curve produced fewer than two points
    #[error("Path has too few points ({count})")]
    TooFewPoints {
        /// Number of points produced.
        count: usize,
    },

    /// The curve has zero length
    #[error("Path has degenerate length {length}")]
    DegenerateLength {
        /// The measured length in design units.
        length: f64,
    },

    /// A coordinate or length was NaN or infinite
    #[error("Path contains non-finite coordinates")]
    NonFinite,
}

/// Catalog error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two items share the same id
    #[error("Duplicate catalog item '{item_id}'")]
    DuplicateItem {
        /// The repeated id.
        item_id: String,
    },

    /// An item carries a nonsensical physical size
    #[error("Invalid size for '{item_id}': {reason}")]
    InvalidSize {
        /// The offending item.
        item_id: String,
        /// Why the size was rejected.
        reason: String,
    },
}

/// Main error type for Beadsmith
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Placement error
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a placement error
    pub fn is_placement_error(&self) -> bool {
        matches!(self, Error::Placement(_))
    }

    /// Check if this is a catalog error
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Error::Catalog(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
