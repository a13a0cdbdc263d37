//! Physical layouts of the two bracelet kinds.
//!
//! A [`PathLayout`] describes a chain as a continuous curve in design space
//! together with its real length. A [`SlotLayout`] describes a bead string as a
//! row of equally sized, equally spaced slots.

use serde::{Deserialize, Serialize};

use beadsmith_core::constants::BEAD_SPACING_MM;

use crate::model::Point;

/// One drawing command of a path outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        cx: f64,
        cy: f64,
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    Close,
}

/// The curve a chain follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PathCurve {
    /// Ordered drawing commands, flattened on load.
    Commands { commands: Vec<PathCommand> },
    /// Closed ellipse sampled parametrically, starting at the top.
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    /// Explicit sample points joined by straight segments.
    Polyline { points: Vec<Point> },
}

impl PathCurve {
    /// Builds a command curve from an SVG-like list.
    pub fn commands(commands: Vec<PathCommand>) -> Self {
        PathCurve::Commands { commands }
    }

    /// Straight horizontal segment from `(x0, y)` to `(x1, y)`.
    pub fn line(x0: f64, x1: f64, y: f64) -> Self {
        PathCurve::Commands {
            commands: vec![
                PathCommand::MoveTo { x: x0, y },
                PathCommand::LineTo { x: x1, y },
            ],
        }
    }
}

/// Chain or bracelet outline with its real-world length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathLayout {
    /// Physical length of the chain, in millimeters.
    pub length_mm: f64,
    /// Design-space width, used for linear fallback positioning.
    pub width: f64,
    pub curve: PathCurve,
}

impl PathLayout {
    pub fn new(length_mm: f64, width: f64, curve: PathCurve) -> Self {
        debug_assert!(
            length_mm.is_finite() && length_mm > 0.0,
            "length_mm must be positive and finite, got {length_mm}"
        );
        Self {
            length_mm,
            width,
            curve,
        }
    }

    /// A U-shaped necklace-style chain hanging between two points.
    pub fn hanging_chain(length_mm: f64, width: f64, sag: f64) -> Self {
        let curve = PathCurve::commands(vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::CubicTo {
                c1x: 0.0,
                c1y: sag,
                c2x: width,
                c2y: sag,
                x: width,
                y: 0.0,
            },
        ]);
        Self::new(length_mm, width, curve)
    }
}

/// Bead string with fixed bead diameter and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotLayout {
    pub length_mm: f64,
    pub diameter_mm: f64,
    #[serde(default = "default_spacing")]
    pub spacing_mm: f64,
}

fn default_spacing() -> f64 {
    BEAD_SPACING_MM
}

impl SlotLayout {
    pub fn new(length_mm: f64, diameter_mm: f64, spacing_mm: f64) -> Self {
        Self {
            length_mm,
            diameter_mm,
            spacing_mm,
        }
    }

    /// Distance between neighbouring slot centres.
    pub fn pitch_mm(&self) -> f64 {
        self.diameter_mm + self.spacing_mm
    }

    /// `floor(length / pitch)`, zero for degenerate layouts.
    pub fn slot_count(&self) -> u32 {
        let pitch = self.pitch_mm();
        if !pitch.is_finite() || pitch <= 0.0 || !self.length_mm.is_finite() || self.length_mm <= 0.0
        {
            return 0;
        }
        let count = (self.length_mm / pitch).floor();
        if count >= u32::MAX as f64 {
            u32::MAX
        } else {
            count as u32
        }
    }

    /// Centre of a slot along the string, in millimeters from the start.
    pub fn slot_center_mm(&self, position: u32) -> f64 {
        (position as f64 + 0.5) * self.pitch_mm()
    }

    /// Slot under a distance along the string, if any.
    pub fn slot_at(&self, along_mm: f64) -> Option<u32> {
        let pitch = self.pitch_mm();
        if !along_mm.is_finite() || along_mm < 0.0 || pitch <= 0.0 {
            return None;
        }
        let slot = (along_mm / pitch).floor();
        if slot < self.slot_count() as f64 {
            Some(slot as u32)
        } else {
            None
        }
    }
}
