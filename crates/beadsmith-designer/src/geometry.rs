//! Geometry sampling for chain layouts.
//!
//! A [`PathSampler`] flattens a [`PathLayout`] curve once into a polyline
//! parameterised by arc length, then answers point and tangent queries for a
//! fractional position `t` along it. Command curves are flattened with lyon.
//!
//! Malformed curves never fail a query: the sampler logs the
//! [`GeometryError`] and falls back to linear positioning along the layout
//! width.

use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;

use beadsmith_core::constants::{CURVE_SEGMENTS, FLATTEN_TOLERANCE};
use beadsmith_core::GeometryError;

use crate::layout::{PathCommand, PathCurve, PathLayout};
use crate::model::Point;

/// Smallest and largest `t` step used for finite-difference tangents.
const MIN_TANGENT_EPSILON: f64 = 1e-4;
const MAX_TANGENT_EPSILON: f64 = 1e-2;

/// Clamps a fractional position into `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
enum Samples {
    Polyline {
        points: Vec<Point>,
        cumulative: Vec<f64>,
        length: f64,
    },
    Linear {
        width: f64,
    },
}

/// Arc-length sampler over a flattened chain curve.
#[derive(Debug, Clone)]
pub struct PathSampler {
    samples: Samples,
}

impl PathSampler {
    /// Builds a sampler, falling back to linear positioning on malformed input.
    pub fn new(layout: &PathLayout) -> Self {
        match Self::try_new(layout) {
            Ok(sampler) => sampler,
            Err(err) => {
                tracing::warn!("Geometry sampling failed ({}), using linear fallback", err);
                Self::linear(layout.width)
            }
        }
    }

    /// Builds a sampler, reporting why the curve cannot be sampled.
    pub fn try_new(layout: &PathLayout) -> Result<Self, GeometryError> {
        let points = flatten(&layout.curve)?;
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                count: points.len(),
            });
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut length = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            length += pair[0].distance_to(&pair[1]);
            cumulative.push(length);
        }

        if !length.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if length <= f64::EPSILON {
            return Err(GeometryError::DegenerateLength { length });
        }

        Ok(Self {
            samples: Samples::Polyline {
                points,
                cumulative,
                length,
            },
        })
    }

    fn linear(width: f64) -> Self {
        let width = if width.is_finite() && width > 0.0 {
            width
        } else {
            1.0
        };
        Self {
            samples: Samples::Linear { width },
        }
    }

    /// True when the sampler is using linear fallback positioning.
    pub fn is_fallback(&self) -> bool {
        matches!(self.samples, Samples::Linear { .. })
    }

    /// Total path length in design units.
    pub fn length(&self) -> f64 {
        match &self.samples {
            Samples::Polyline { length, .. } => *length,
            Samples::Linear { width } => *width,
        }
    }

    /// Point at fractional arc-length position `t`.
    pub fn point_at(&self, t: f64) -> Point {
        let t = clamp_unit(t);
        match &self.samples {
            Samples::Linear { width } => Point::new(t * width, 0.0),
            Samples::Polyline {
                points,
                cumulative,
                length,
            } => {
                let target = t * length;
                let idx = cumulative.partition_point(|&d| d < target);
                if idx == 0 {
                    return points[0];
                }
                if idx >= points.len() {
                    return points[points.len() - 1];
                }
                let (a, b) = (points[idx - 1], points[idx]);
                let seg = cumulative[idx] - cumulative[idx - 1];
                let local = (target - cumulative[idx - 1]) / seg;
                a + (b - a) * local
            }
        }
    }

    /// Finite-difference step, roughly half a design unit along the path.
    pub fn tangent_epsilon(&self) -> f64 {
        let length = self.length();
        if length > 0.0 {
            (0.5 / length).clamp(MIN_TANGENT_EPSILON, MAX_TANGENT_EPSILON)
        } else {
            MAX_TANGENT_EPSILON
        }
    }

    /// Unit tangent at `t`, sampled from `t` and `t + ε` (or `t - ε` and `t` near the end).
    pub fn tangent_at(&self, t: f64) -> Point {
        let t = clamp_unit(t);
        let eps = self.tangent_epsilon();
        let (t0, t1) = if t + eps > 1.0 {
            ((t - eps).max(0.0), t)
        } else {
            (t, t + eps)
        };
        let d = self.point_at(t1) - self.point_at(t0);
        let len = d.length();
        if len > 1e-12 && len.is_finite() {
            d * (1.0 / len)
        } else {
            Point::new(1.0, 0.0)
        }
    }

    /// Unit normal at `t` (tangent rotated a quarter turn).
    pub fn normal_at(&self, t: f64) -> Point {
        self.tangent_at(t).perpendicular()
    }
}

/// Point on `layout` at fractional position `t`.
pub fn point_at(layout: &PathLayout, t: f64) -> Point {
    PathSampler::new(layout).point_at(t)
}

/// Unit tangent on `layout` at fractional position `t`.
pub fn tangent_at(layout: &PathLayout, t: f64) -> Point {
    PathSampler::new(layout).tangent_at(t)
}

fn flatten(curve: &PathCurve) -> Result<Vec<Point>, GeometryError> {
    let points = match curve {
        PathCurve::Polyline { points } => points.clone(),
        PathCurve::Ellipse { cx, cy, rx, ry } => (0..=CURVE_SEGMENTS)
            .map(|i| {
                let angle = -std::f64::consts::FRAC_PI_2
                    + std::f64::consts::TAU * i as f64 / CURVE_SEGMENTS as f64;
                Point::new(cx + rx * angle.cos(), cy + ry * angle.sin())
            })
            .collect(),
        PathCurve::Commands { commands } => flatten_commands(commands)?,
    };

    if points.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinite);
    }
    Ok(points)
}

fn flatten_commands(commands: &[PathCommand]) -> Result<Vec<Point>, GeometryError> {
    let path = build_lyon_path(commands)?;
    let mut points = Vec::new();
    let mut subpaths = 0;

    for event in path.iter().flattened(FLATTEN_TOLERANCE as f32) {
        match event {
            lyon::path::Event::Begin { at } => {
                subpaths += 1;
                if subpaths > 1 {
                    continue;
                }
                points.push(Point::new(at.x as f64, at.y as f64));
            }
            lyon::path::Event::Line { to, .. } => {
                if subpaths == 1 {
                    points.push(Point::new(to.x as f64, to.y as f64));
                }
            }
            lyon::path::Event::End { last, first, close } => {
                if subpaths == 1 && close && last != first {
                    points.push(Point::new(first.x as f64, first.y as f64));
                }
            }
            _ => {}
        }
    }

    if subpaths > 1 {
        tracing::debug!("Path has {} subpaths, sampling only the first", subpaths);
    }
    Ok(points)
}

fn build_lyon_path(commands: &[PathCommand]) -> Result<Path, GeometryError> {
    let finite = |values: &[f64]| values.iter().all(|v| v.is_finite());
    let mut builder = Path::builder();
    let mut open = false;

    for command in commands {
        match *command {
            PathCommand::MoveTo { x, y } => {
                if !finite(&[x, y]) {
                    return Err(GeometryError::NonFinite);
                }
                if open {
                    builder.end(false);
                }
                builder.begin(point(x as f32, y as f32));
                open = true;
            }
            PathCommand::LineTo { x, y } => {
                if !finite(&[x, y]) {
                    return Err(GeometryError::NonFinite);
                }
                if open {
                    builder.line_to(point(x as f32, y as f32));
                } else {
                    builder.begin(point(x as f32, y as f32));
                    open = true;
                }
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                if !finite(&[cx, cy, x, y]) {
                    return Err(GeometryError::NonFinite);
                }
                if !open {
                    builder.begin(point(cx as f32, cy as f32));
                    open = true;
                }
                builder.quadratic_bezier_to(point(cx as f32, cy as f32), point(x as f32, y as f32));
            }
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => {
                if !finite(&[c1x, c1y, c2x, c2y, x, y]) {
                    return Err(GeometryError::NonFinite);
                }
                if !open {
                    builder.begin(point(c1x as f32, c1y as f32));
                    open = true;
                }
                builder.cubic_bezier_to(
                    point(c1x as f32, c1y as f32),
                    point(c2x as f32, c2y as f32),
                    point(x as f32, y as f32),
                );
            }
            PathCommand::Close => {
                if open {
                    builder.end(true);
                    open = false;
                }
            }
        }
    }

    if open {
        builder.end(false);
    }
    Ok(builder.build())
}
