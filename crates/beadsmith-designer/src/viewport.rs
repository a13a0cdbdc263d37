//! Viewport and coordinate transformation for the design surface.
//!
//! Handles conversion between screen coordinates (pointer space) and design
//! coordinates (layout space). Manages zoom and pan so that zooming keeps the
//! point under the cursor fixed.

use std::fmt;

use beadsmith_core::constants::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};

use crate::model::Point;

/// Represents the viewport transformation state (scale and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    pan_x: f64,
    pan_y: f64,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
}

impl Viewport {
    /// Creates a viewport at 1:1 scale with no pan.
    pub fn new() -> Self {
        Self::with_limits(MIN_SCALE, MAX_SCALE, ZOOM_STEP)
    }

    /// Creates a viewport with custom scale bounds and zoom step.
    pub fn with_limits(min_scale: f64, max_scale: f64, zoom_step: f64) -> Self {
        debug_assert!(
            min_scale > 0.0 && min_scale <= max_scale,
            "scale bounds must satisfy 0 < min <= max, got {min_scale}..{max_scale}"
        );
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            pan_x: 0.0,
            pan_y: 0.0,
            min_scale,
            max_scale,
            zoom_step,
        }
    }

    /// Gets the current scale (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Gets the scale bounds.
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Sets the scale, clamped to the configured bounds. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(self.min_scale, self.max_scale);
        }
    }

    /// Gets the pan offset.
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pan_x = x;
            self.pan_y = y;
        }
    }

    /// Pans by a delta amount in screen units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.set_pan(self.pan_x + dx, self.pan_y + dy);
    }

    /// Zooms by `delta` around a screen-space focal point.
    ///
    /// The new pan keeps `focal` over the same design point:
    /// ```text
    /// pan' = focal - (focal - pan) * (new_scale / old_scale)
    /// ```
    pub fn zoom(&mut self, delta: f64, focal: Point) {
        if !delta.is_finite() || !focal.is_finite() {
            return;
        }
        let old_scale = self.scale;
        let new_scale = (old_scale + delta).clamp(self.min_scale, self.max_scale);
        if new_scale == old_scale {
            return;
        }
        let ratio = new_scale / old_scale;
        self.pan_x = focal.x - (focal.x - self.pan_x) * ratio;
        self.pan_y = focal.y - (focal.y - self.pan_y) * ratio;
        self.scale = new_scale;
    }

    /// Zooms in one step around a screen point.
    pub fn zoom_in_at(&mut self, focal: Point) {
        self.zoom(self.zoom_step, focal);
    }

    /// Zooms out one step around a screen point.
    pub fn zoom_out_at(&mut self, focal: Point) {
        self.zoom(-self.zoom_step, focal);
    }

    /// Zooms in one step, keeping the pan offset.
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + self.zoom_step);
    }

    /// Zooms out one step, keeping the pan offset.
    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - self.zoom_step);
    }

    /// Converts screen coordinates to design coordinates.
    ///
    /// ```text
    /// design = (screen - pan) / scale
    /// ```
    pub fn screen_to_design(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.scale,
            (screen.y - self.pan_y) / self.scale,
        )
    }

    /// Converts design coordinates to screen coordinates.
    ///
    /// ```text
    /// screen = design * scale + pan
    /// ```
    pub fn design_to_screen(&self, design: Point) -> Point {
        Point::new(
            design.x * self.scale + self.pan_x,
            design.y * self.scale + self.pan_y,
        )
    }

    /// Centers the viewport on a design coordinate within a screen area.
    pub fn center_on(&mut self, design: Point, screen_width: f64, screen_height: f64) {
        self.set_pan(
            screen_width / 2.0 - design.x * self.scale,
            screen_height / 2.0 - design.y * self.scale,
        );
    }

    /// Resets viewport to default state (1:1 scale, no pan).
    pub fn reset(&mut self) {
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.2}x | Pan: ({:.1}, {:.1})",
            self.scale, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
