//! Interpolating splines over 1-D control points.
//!
//! A [`Spline`] is built once from a control-point sequence and then
//! evaluated many times per tick, so construction does all the expensive
//! work: the points are stably sorted by x and, for the monotone-cubic
//! variant, the Fritsch-Carlson tangents and segment coefficients are
//! precomputed. Evaluation is a binary search over the segments.
//!
//! Outside the control range the endpoint y is returned (flat clamp).

use serde::{Deserialize, Serialize};

use crate::error::SplineError;

/// A 2-D control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Interpolation scheme between control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    /// Straight line between neighbouring points.
    Linear,
    /// Within a segment, the value of the *next* control point.
    StepBefore,
    /// Within a segment, the value of the *previous* control point.
    StepAfter,
    /// Fritsch-Carlson monotone cubic: smooth, and never overshoots the
    /// control points.
    Monotone,
}

/// Per-variant evaluation state. Only the monotone cubic carries
/// precomputed coefficients.
#[derive(Debug, Clone, PartialEq)]
enum Segments {
    Linear,
    StepBefore,
    StepAfter,
    Monotone {
        c1: Vec<f32>,
        c2: Vec<f32>,
        c3: Vec<f32>,
    },
}

/// An immutable curve through ordered control points.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    points: Vec<Point>,
    interpolation: Interpolation,
    segments: Segments,
}

impl Spline {
    /// Builds a spline from control points.
    ///
    /// The points are stably sorted by x; at least two are required.
    pub fn new<P>(interpolation: Interpolation, points: Vec<P>) -> Result<Self, SplineError>
    where
        P: Into<Point>,
    {
        let mut points: Vec<Point> = points.into_iter().map(Into::into).collect();
        if points.len() < 2 {
            return Err(SplineError::TooFewPoints(points.len()));
        }
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        let segments = match interpolation {
            Interpolation::Linear => Segments::Linear,
            Interpolation::StepBefore => Segments::StepBefore,
            Interpolation::StepAfter => Segments::StepAfter,
            Interpolation::Monotone => monotone_segments(&points),
        };

        Ok(Self {
            points,
            interpolation,
            segments,
        })
    }

    /// Shorthand for [`Spline::new`] with [`Interpolation::Linear`].
    pub fn linear<P: Into<Point>>(points: Vec<P>) -> Result<Self, SplineError> {
        Self::new(Interpolation::Linear, points)
    }

    /// Shorthand for [`Spline::new`] with [`Interpolation::StepBefore`].
    pub fn step_before<P: Into<Point>>(points: Vec<P>) -> Result<Self, SplineError> {
        Self::new(Interpolation::StepBefore, points)
    }

    /// Shorthand for [`Spline::new`] with [`Interpolation::StepAfter`].
    pub fn step_after<P: Into<Point>>(points: Vec<P>) -> Result<Self, SplineError> {
        Self::new(Interpolation::StepAfter, points)
    }

    /// Shorthand for [`Spline::new`] with [`Interpolation::Monotone`].
    pub fn monotone<P: Into<Point>>(points: Vec<P>) -> Result<Self, SplineError> {
        Self::new(Interpolation::Monotone, points)
    }

    /// The sorted control points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The interpolation scheme this spline was built with.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Evaluates the spline at `x`.
    ///
    /// Below the first control point this returns the first y; above the
    /// last control point, the last y. An x that hits a control point
    /// exactly returns that point's y for every interpolation scheme.
    pub fn evaluate(&self, x: f32) -> f32 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // Index of the first point with p.x >= x; in 1..len-1 here.
        let upper = self.points.partition_point(|p| p.x < x);
        if self.points[upper].x == x {
            return self.points[upper].y;
        }
        let i = upper - 1;

        match &self.segments {
            Segments::Linear => {
                let a = self.points[i];
                let b = self.points[i + 1];
                let t = (x - a.x) / (b.x - a.x);
                (1.0 - t) * a.y + t * b.y
            }
            Segments::StepBefore => self.points[i + 1].y,
            Segments::StepAfter => self.points[i].y,
            Segments::Monotone { c1, c2, c3 } => {
                let d = x - self.points[i].x;
                self.points[i].y + c1[i] * d + c2[i] * d * d + c3[i] * d * d * d
            }
        }
    }
}

/// Precomputes Fritsch-Carlson tangents and cubic coefficients.
///
/// Tangents are flattened to zero wherever neighbouring secant slopes
/// change sign, which is what keeps the interpolant monotone on each
/// monotone run of the input data.
fn monotone_segments(points: &[Point]) -> Segments {
    let count = points.len() - 1;
    let mut delta_x = vec![0.0f32; count];
    let mut slope = vec![0.0f32; count];
    for i in 0..count {
        let a = points[i];
        let b = points[i + 1];
        delta_x[i] = b.x - a.x;
        slope[i] = (b.y - a.y) / delta_x[i];
    }

    let mut c1 = vec![0.0f32; points.len()];
    c1[0] = slope[0];
    for i in 0..count - 1 {
        if slope[i] * slope[i + 1] <= 0.0 {
            c1[i + 1] = 0.0;
        } else {
            let common = delta_x[i] + delta_x[i + 1];
            c1[i + 1] =
                3.0 * common / ((common + delta_x[i + 1]) / slope[i] + (common + delta_x[i]) / slope[i + 1]);
        }
    }
    c1[count] = slope[count - 1];

    let mut c2 = vec![0.0f32; count];
    let mut c3 = vec![0.0f32; count];
    for i in 0..count {
        let common = c1[i] + c1[i + 1] - 2.0 * slope[i];
        let inv_dx = 1.0 / delta_x[i];
        c2[i] = (slope[i] - c1[i] - common) * inv_dx;
        c3[i] = common * inv_dx * inv_dx;
    }

    Segments::Monotone { c1, c2, c3 }
}
