//! Pointer-to-path projection for chain designs.
//!
//! Maps a screen position onto the chain as a fractional position `t` plus a
//! signed perpendicular offset in millimeters. The closest-point search is a
//! sampled approximation: the chosen `t` may be off by up to one sample
//! interval.

use beadsmith_core::constants::{
    OFFSET_BOUND_MM, PROJECTION_SAMPLES_COARSE, PROJECTION_SAMPLES_FINE, SNAP_STEP,
};

use crate::geometry::{clamp_unit, PathSampler};
use crate::input::PointerKind;
use crate::layout::PathLayout;
use crate::model::Point;
use crate::viewport::Viewport;

/// Tuning for a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionOptions {
    /// Number of evenly spaced samples in the closest-point search.
    pub samples: usize,
    /// Grid step for `t`, when snapping is enabled.
    pub snap_step: Option<f64>,
    /// Absolute bound on the resulting offset.
    pub offset_bound_mm: f64,
}

impl ProjectionOptions {
    /// Options tuned for a given input device.
    pub fn for_pointer(pointer: PointerKind) -> Self {
        let samples = if pointer.is_coarse() {
            PROJECTION_SAMPLES_COARSE
        } else {
            PROJECTION_SAMPLES_FINE
        };
        Self {
            samples,
            ..Self::default()
        }
    }

    /// Enables snapping `t` to the default grid step.
    pub fn snapped(mut self) -> Self {
        self.snap_step = Some(SNAP_STEP);
        self
    }
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            samples: PROJECTION_SAMPLES_FINE,
            snap_step: None,
            offset_bound_mm: OFFSET_BOUND_MM,
        }
    }
}

/// Result of projecting a pointer onto a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub t: f64,
    pub offset_mm: f64,
}

/// A chain layout prepared for repeated projections.
#[derive(Debug, Clone)]
pub struct PathProjector {
    layout: PathLayout,
    sampler: PathSampler,
}

impl PathProjector {
    pub fn new(layout: PathLayout) -> Self {
        let sampler = PathSampler::new(&layout);
        Self { layout, sampler }
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    pub fn sampler(&self) -> &PathSampler {
        &self.sampler
    }

    /// Design units per millimeter of chain (`path_length_px / length_mm`).
    ///
    /// Zero when the layout length is unusable, which collapses offsets to 0.
    pub fn px_per_mm(&self) -> f64 {
        let length_mm = self.layout.length_mm;
        if !length_mm.is_finite() || length_mm <= 0.0 {
            return 0.0;
        }
        let ratio = self.sampler.length() / length_mm;
        if ratio.is_finite() {
            ratio
        } else {
            0.0
        }
    }

    /// Projects a screen-space pointer through the viewport onto the path.
    pub fn project(&self, pointer: Point, viewport: &Viewport, options: &ProjectionOptions) -> Projection {
        let design = viewport.screen_to_design(pointer);
        self.project_design(design, options)
    }

    /// Projects a design-space point onto the path.
    pub fn project_design(&self, design: Point, options: &ProjectionOptions) -> Projection {
        let bound = sanitize_bound(options.offset_bound_mm);
        if !design.is_finite() {
            return Projection {
                t: 0.0,
                offset_mm: 0.0,
            };
        }

        let mut t = self.closest_sample(design, options.samples);
        if let Some(step) = options.snap_step {
            t = snap(t, step);
        }

        let on_path = self.sampler.point_at(t);
        let normal = self.sampler.normal_at(t);
        let signed_px = (design - on_path).dot(&normal);

        let px_per_mm = self.px_per_mm();
        let offset_mm = if px_per_mm > 0.0 {
            signed_px / px_per_mm
        } else {
            0.0
        };
        let offset_mm = if offset_mm.is_finite() {
            offset_mm.clamp(-bound, bound)
        } else {
            0.0
        };

        Projection { t, offset_mm }
    }

    /// Design-space position of a charm at `t` displaced by `offset_mm`.
    pub fn placement_point(&self, t: f64, offset_mm: f64) -> Point {
        let base = self.sampler.point_at(t);
        let offset = if offset_mm.is_finite() { offset_mm } else { 0.0 };
        base + self.sampler.normal_at(t) * (offset * self.px_per_mm())
    }

    fn closest_sample(&self, design: Point, samples: usize) -> f64 {
        let n = samples.max(2);
        let mut best_t = 0.0;
        let mut best_dist = f64::INFINITY;
        for i in 0..n {
            let t = i as f64 / (n - 1) as f64;
            let dist = self.sampler.point_at(t).distance_to(&design);
            if dist < best_dist {
                best_dist = dist;
                best_t = t;
            }
        }
        best_t
    }
}

/// Projects `pointer` (screen space) onto `layout`.
pub fn project(
    pointer: Point,
    layout: &PathLayout,
    viewport: &Viewport,
    options: &ProjectionOptions,
) -> Projection {
    PathProjector::new(layout.clone()).project(pointer, viewport, options)
}

fn snap(t: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return clamp_unit(t);
    }
    clamp_unit((t / step).round() * step)
}

fn sanitize_bound(bound: f64) -> f64 {
    if bound.is_nan() {
        0.0
    } else {
        bound.abs()
    }
}
