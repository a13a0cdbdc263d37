//! # Beadsmith Designer
//!
//! Placement engine for charm-and-bead jewelry designs. Charms hang at
//! continuous positions along a chain; beads fill discrete slots on a strand.
//! The engine maps pointer input onto the product, enforces per-item
//! capacity, keeps undo history, generates bead patterns and prices the
//! result in integer minor currency units.
//!
//! ## Core Components
//!
//! ### Geometry
//! - **Layouts**: Chain curves (`PathLayout`) and bead strands (`SlotLayout`)
//! - **Sampler**: Arc-length parameterised points and tangents along a curve
//! - **Projector**: Pointer position to `(t, offset)` on a chain
//! - **Viewport**: Zoom toward the cursor and pan
//!
//! ### Design State
//! - **Stores**: Capacity-checked placement records for chains and strands
//! - **History**: Bounded snapshot undo/redo
//! - **Patterns**: Alternating, gradient, random and symmetrical bead fills
//! - **Pricing**: Volume-discounted totals
//!
//! ### Sessions
//! - **Sessions**: One design being edited, with drag capture and input routing
//! - **Export**: JSON design snapshots for persistence or checkout
//!
//! ## Architecture
//!
//! ```text
//! Session (single mutator)
//!   ├── Store (placements)  ── History (snapshots)
//!   ├── Projector / PatternGenerator
//!   ├── Viewport
//!   └── PricingRules
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use beadsmith_designer::{BeadSession, PatternKind, SessionOptions, SlotLayout};
//!
//! let mut session = BeadSession::new(
//!     "bracelet", 1800, catalog, SlotLayout::new(180.0, 4.0, 1.0), SessionOptions::default(),
//! );
//! session.apply_pattern(PatternKind::Gradient)?;
//! let breakdown = session.price();
//! ```

pub mod geometry;
pub mod history;
pub mod input;
pub mod layout;
pub mod model;
pub mod patterns;
pub mod pricing;
pub mod projector;
pub mod serialization;
pub mod session;
pub mod store;
pub mod viewport;

pub use geometry::{clamp_unit, point_at, tangent_at, PathSampler};
pub use history::HistoryManager;
pub use input::{InputEvent, InputOutcome, InputPhase, PointerKind, ZoomEvent};
pub use layout::{PathCommand, PathCurve, PathLayout, SlotLayout};
pub use model::{DesignMode, DesignState, Placement, PlacementId, Point, SlotPlacement};
pub use patterns::{PatternGenerator, PatternKind};
pub use pricing::{price, DiscountTier, PriceBreakdown, PricingRules};
pub use projector::{project, PathProjector, Projection, ProjectionOptions};
pub use serialization::{DesignExport, DesignMetadata, ImportError};
pub use session::{BeadSession, ChainSession, DesignSession, SessionOptions};
pub use store::{ChainStore, PlacementStore, SlotStore};
pub use viewport::Viewport;
