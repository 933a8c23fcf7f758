//! Parameterized response-curve transforms.
//!
//! A [`Transform`] reshapes a raw sensor reading into a utility in `[0, 1]`.
//! Each variant carries its own scalar parameters and is evaluated against
//! the consideration's input range, so the same transform can be reused
//! across sensors with different units.

use serde::{Deserialize, Serialize};

use crate::curve::{clip, scale};

/// A pure shaping function `(value, min, max) -> [0, 1]`.
///
/// Evaluation is referentially transparent; a transform holds no state
/// beyond its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// Linear rescale of `value` from `[min, max]` onto `[0, 1]`.
    Identity,

    /// `1 - scale(value)`: high readings map to low utility.
    Inverted,

    /// `clip(slope * scale(value) + intercept)`.
    Linear { slope: f32, intercept: f32 },

    /// Hard step: 1 when `value >= threshold`, otherwise 0.
    ///
    /// The threshold is compared against the raw reading, not the scaled one.
    Binary { threshold: f32 },

    /// `scale(base^value, base^min, base^max)`: exaggerates the high end of
    /// the range for `base > 1`.
    Exponential { base: f32 },

    /// `scale(value^exponent, min^exponent, max^exponent)`.
    Power { exponent: f32 },
}

impl Transform {
    /// Evaluates the transform for a raw reading over the given input range.
    pub fn evaluate(&self, value: f32, min: f32, max: f32) -> f32 {
        match *self {
            Transform::Identity => scale(value, min, max),
            Transform::Inverted => 1.0 - scale(value, min, max),
            Transform::Linear { slope, intercept } => {
                clip(slope * scale(value, min, max) + intercept)
            }
            Transform::Binary { threshold } => {
                if value >= threshold {
                    1.0
                } else {
                    0.0
                }
            }
            Transform::Exponential { base } => {
                scale(base.powf(value), base.powf(min), base.powf(max))
            }
            Transform::Power { exponent } => {
                scale(value.powf(exponent), min.powf(exponent), max.powf(exponent))
            }
        }
    }
}
