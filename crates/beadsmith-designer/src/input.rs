//! Unified pointer input.
//!
//! Mouse, pen, and touch events are normalised into one [`InputEvent`] shape
//! before they reach the projector, so geometry code only ever sees a screen
//! position and a gesture phase.

use serde::{Deserialize, Serialize};

use crate::model::{PlacementId, Point};

/// Phase of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPhase {
    Start,
    Move,
    End,
}

/// Device that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// True for imprecise input where fewer projection samples are used.
    pub fn is_coarse(&self) -> bool {
        matches!(self, PointerKind::Touch)
    }
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub phase: InputPhase,
    #[serde(default)]
    pub pointer: PointerKind,
}

impl InputEvent {
    pub fn new(client_x: f64, client_y: f64, phase: InputPhase, pointer: PointerKind) -> Self {
        Self {
            client_x,
            client_y,
            phase,
            pointer,
        }
    }

    pub fn start(client_x: f64, client_y: f64) -> Self {
        Self::new(client_x, client_y, InputPhase::Start, PointerKind::Mouse)
    }

    pub fn moved(client_x: f64, client_y: f64) -> Self {
        Self::new(client_x, client_y, InputPhase::Move, PointerKind::Mouse)
    }

    pub fn end(client_x: f64, client_y: f64) -> Self {
        Self::new(client_x, client_y, InputPhase::End, PointerKind::Mouse)
    }

    /// Same event, attributed to another device.
    pub fn with_pointer(mut self, pointer: PointerKind) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

/// Wheel or pinch zoom request around a screen point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomEvent {
    pub delta: f64,
    pub focal_x: f64,
    pub focal_y: f64,
}

impl ZoomEvent {
    pub fn new(delta: f64, focal_x: f64, focal_y: f64) -> Self {
        Self {
            delta,
            focal_x,
            focal_y,
        }
    }

    pub fn focal(&self) -> Point {
        Point::new(self.focal_x, self.focal_y)
    }
}

/// What a session did with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// A placement was captured for dragging.
    Captured(PlacementId),
    /// The captured placement moved.
    Moved(PlacementId),
    /// The drag ended and capture was released.
    Released(PlacementId),
    /// Nothing under the pointer, or the event did not apply.
    Ignored,
}
