//! The unified response-curve interface.
//!
//! Considerations shape raw readings through either a parameterized
//! [`Transform`] or a control-point [`Spline`]. [`Curve`] is the tagged
//! union of the two, so the rest of the engine never cares which shape a
//! consideration was authored with.

use crate::spline::Spline;
use crate::transform::Transform;

/// Rescales `value` from `[min, max]` onto `[0, 1]`.
///
/// A degenerate range (`min == max`) yields 0 rather than dividing by zero.
pub fn scale(value: f32, min: f32, max: f32) -> f32 {
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// Clamps `value` to `[0, 1]`.
pub fn clip(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Either shape of response curve.
///
/// Transforms are applied to the raw reading together with the input range;
/// splines are evaluated over the reading scaled onto `[0, 1]` first, which
/// matches how the visual curve editor lays out its control points.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Transform(Transform),
    Spline(Spline),
}

impl Curve {
    /// Shapes a raw reading over the given input range.
    ///
    /// The result is not yet clipped; [`Consideration`](crate::Consideration)
    /// owns the final clamp to `[0, 1]`.
    pub fn evaluate(&self, raw: f32, min: f32, max: f32) -> f32 {
        match self {
            Curve::Transform(transform) => transform.evaluate(raw, min, max),
            Curve::Spline(spline) => spline.evaluate(scale(raw, min, max)),
        }
    }
}

impl From<Transform> for Curve {
    fn from(transform: Transform) -> Self {
        Curve::Transform(transform)
    }
}

impl From<Spline> for Curve {
    fn from(spline: Spline) -> Self {
        Curve::Spline(spline)
    }
}
