//! One axis of a decision's utility.
//!
//! A [`Consideration`] reads a scalar from the host context through its
//! sensor callback, shapes it through a response curve, and clips the
//! result to `[0, 1]`. Sensors receive `&mut C`, so a reading may mutate
//! host state; such mutations are visible to every consideration and
//! action evaluated later in the same tick.

use crate::curve::{clip, Curve};

/// Sensor callback: reads one scalar from the host context.
pub type Sensor<C> = Box<dyn Fn(&mut C) -> f32>;

/// A single scored input to a [`Decision`](crate::Decision).
///
/// Immutable after construction. The input range `[min, max]` tells the
/// curve how to normalize the raw reading; readings outside the range are
/// handled by the curve and the final clip, never by an error.
pub struct Consideration<C> {
    description: String,
    sensor: Sensor<C>,
    curve: Curve,
    min: f32,
    max: f32,
}

impl<C> Consideration<C> {
    /// Creates a consideration from a sensor, a shaping curve, and the
    /// sensor's expected input range.
    pub fn new(
        description: impl Into<String>,
        sensor: impl Fn(&mut C) -> f32 + 'static,
        curve: impl Into<Curve>,
        min: f32,
        max: f32,
    ) -> Self {
        Self {
            description: description.into(),
            sensor: Box::new(sensor),
            curve: curve.into(),
            min,
            max,
        }
    }

    /// Human-readable label, used only for inspection and logging.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The sensor's input range.
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Reads the sensor and shapes the result into `[0, 1]`.
    ///
    /// A non-finite shaped value (bad range, pathological curve) clamps
    /// to 0.
    pub fn compute_score(&self, ctx: &mut C) -> f32 {
        let raw = (self.sensor)(ctx);
        let shaped = self.curve.evaluate(raw, self.min, self.max);
        if !shaped.is_finite() {
            return 0.0;
        }
        clip(shaped)
    }
}
