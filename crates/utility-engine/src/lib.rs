//! Utility-based behavior engine for autonomous agents.
//!
//! On every decision tick the engine picks a single best action from a
//! dynamically managed set of candidate behaviors. Each candidate (a
//! [`Decision`]) scores itself on the current world state by combining
//! several normalized sub-scores ([`Consideration`]s); the decision with
//! the highest composite score wins and its action runs.
//!
//! - **No planning, no learning**: the engine only ranks the present tick.
//! - **Event-gated**: raising and clearing host events loads and unloads
//!   candidates, so only situationally relevant behaviors are scored.
//! - **Lazy**: candidates are walked in tier order and pruned as soon as
//!   their tier cannot beat the best score found so far.
//! - **Single-threaded**: every operation returns synchronously inside the
//!   host's control loop.
//!
//! # Architecture
//!
//! - [`Transform`] / [`Spline`] / [`Curve`]: response-curve shaping, mapping
//!   raw sensor readings into `[0, 1]` utilities
//! - [`Consideration`]: one shaped axis of a decision's utility
//! - [`Decision`]: a named behavior with a [`UtilityScore`] tier, ordered
//!   considerations, and an action callback
//! - [`DecisionEngine`]: registry, event gating, and best-decision selection
//! - [`ActivationObserver`] / [`ActivationGraph`]: optional debug view over
//!   each tick's selection walk
//!
//! # Example
//!
//! ```
//! use utility_engine::{
//!     Consideration, Decision, DecisionEngine, Transform, UtilityScore,
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Event {
//!     Patrolling,
//! }
//!
//! struct Robot {
//!     battery: f32,
//!     docked: bool,
//! }
//!
//! let mut engine = DecisionEngine::new();
//! engine
//!     .add(
//!         Decision::new(
//!             "recharge",
//!             "head to the dock when the battery runs low",
//!             UtilityScore::VeryUseful,
//!             vec![Consideration::new(
//!                 "battery level",
//!                 |robot: &mut Robot| robot.battery,
//!                 Transform::Inverted,
//!                 0.0,
//!                 1.0,
//!             )],
//!             |robot: &mut Robot, _| robot.docked = true,
//!         ),
//!         &[Event::Patrolling],
//!     )
//!     .unwrap();
//!
//! let mut robot = Robot { battery: 0.1, docked: false };
//! engine.raise_event(Event::Patrolling);
//! engine.execute_best_decision(&mut robot).unwrap();
//! assert!(robot.docked);
//! ```

pub mod consideration;
pub mod curve;
pub mod decision;
pub mod engine;
pub mod error;
pub mod observer;
pub mod spline;
pub mod transform;

// Re-export core types for ergonomic API
pub use consideration::{Consideration, Sensor};
pub use curve::{clip, scale, Curve};
pub use decision::{Action, Decision, UtilityScore};
pub use engine::DecisionEngine;
pub use error::{EngineError, SplineError};
pub use observer::{ActivationGraph, ActivationObserver, GraphEntry, NOT_EVALUATED};
pub use spline::{Interpolation, Point, Spline};
pub use transform::Transform;
