//! Default tuning values shared by the engine and the settings crate.

/// Maximum perpendicular charm offset from the chain, in millimeters.
pub const OFFSET_BOUND_MM: f64 = 20.0;

/// Grid step for `t` when placement snapping is enabled.
pub const SNAP_STEP: f64 = 0.1;

/// Closest-point samples for mouse and pen input.
pub const PROJECTION_SAMPLES_FINE: usize = 200;

/// Closest-point samples for touch input.
pub const PROJECTION_SAMPLES_COARSE: usize = 50;

/// Lower zoom bound of the design viewport.
pub const MIN_SCALE: f64 = 0.5;

/// Upper zoom bound of the design viewport.
pub const MAX_SCALE: f64 = 3.0;

/// Scale increment applied by a single zoom in/out step.
pub const ZOOM_STEP: f64 = 0.1;

/// Undo and redo stack depth.
pub const HISTORY_DEPTH: usize = 20;

/// Number of beads produced by a pattern preview, regardless of slot count.
pub const PATTERN_PREVIEW_CAP: u32 = 12;

/// Gap between neighbouring beads, in millimeters.
pub const BEAD_SPACING_MM: f64 = 1.0;

/// Tolerance used when flattening curved path commands, in design units.
pub const FLATTEN_TOLERANCE: f64 = 0.05;

/// Number of segments used to sample explicit parametric curves.
pub const CURVE_SEGMENTS: usize = 256;

/// Basis-point denominator (10_000 bps = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;
