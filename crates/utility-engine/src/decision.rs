//! Decisions: named candidate behaviors with a tier, considerations, and
//! an action.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::consideration::Consideration;

/// Threshold below which a running composite score is treated as dead.
const SCORE_EPSILON: f32 = 1e-6;

/// Coarse priority tier of a decision.
///
/// The tier is a hard upper bound on the decision's composite score, which
/// is what lets the engine prune candidates once the active window is
/// sorted by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UtilityScore {
    /// Never selected; useful for temporarily disabling a decision.
    Ignore = 0,
    SlightlyUseful = 1,
    Useful = 2,
    VeryUseful = 3,
    MostUseful = 4,
}

impl UtilityScore {
    /// The tier as a score bound.
    pub fn value(self) -> f32 {
        self as i32 as f32
    }
}

/// Action callback, invoked with the decision that won so it can
/// introspect its own name and tier for logging.
pub type Action<C> = Box<dyn Fn(&mut C, &Decision<C>)>;

/// A candidate behavior.
///
/// Everything but the execution timestamp is fixed at construction: the
/// name and tier must not change once the decision is registered, and the
/// consideration list keeps its authored order because sensors may mutate
/// shared context that later considerations observe.
pub struct Decision<C> {
    name: String,
    description: String,
    utility: UtilityScore,
    considerations: Vec<Consideration<C>>,
    action: Action<C>,
    executed_at: Option<Instant>,
}

impl<C> Decision<C> {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        utility: UtilityScore,
        considerations: Vec<Consideration<C>>,
        action: impl Fn(&mut C, &Decision<C>) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            utility,
            considerations,
            action: Box::new(action),
            executed_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn utility(&self) -> UtilityScore {
        self.utility
    }

    pub fn considerations(&self) -> &[Consideration<C>] {
        &self.considerations
    }

    /// When this decision's action last ran, or `None` if it never has.
    pub fn last_executed_at(&self) -> Option<Instant> {
        self.executed_at
    }

    /// Time elapsed since the action last ran.
    pub fn time_since_execution(&self) -> Option<Duration> {
        self.executed_at.map(|at| at.elapsed())
    }

    /// Calculates how useful this decision is right now.
    ///
    /// The composite score is the tier multiplied by every consideration's
    /// shaped score, with each factor compensated for the shrinkage that
    /// comes from multiplying many sub-unit values: a decision with three
    /// considerations each at 0.9 should not lose to a decision with a
    /// single consideration at 0.75. With `k` considerations the factor is
    /// `f = 1 - 1/k` and each score `s` enters the product as
    /// `s + (1 - s) * f * s`, which stays within `[0, 1]`, so the tier
    /// remains an upper bound on the result.
    ///
    /// The walk stops once the running product can no longer recover
    /// (below 1e-6), skipping the remaining sensors.
    pub fn compute_score(&self, ctx: &mut C) -> f32 {
        if self.considerations.is_empty() {
            return 0.0;
        }
        let modification_factor = 1.0 - 1.0 / self.considerations.len() as f32;
        let mut total = self.utility.value();
        for consideration in &self.considerations {
            let score = consideration.compute_score(ctx);
            tracing::trace!(
                "    consideration '{}' scored {score:.4}",
                consideration.description()
            );
            total *= score + (1.0 - score) * modification_factor * score;
            if total < SCORE_EPSILON {
                break;
            }
        }
        total
    }

    /// Runs the action and records the execution timestamp.
    pub fn execute(&mut self, ctx: &mut C) {
        self.executed_at = Some(Instant::now());
        (self.action)(ctx, self);
    }
}

impl<C> fmt::Debug for Decision<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("name", &self.name)
            .field("utility", &self.utility)
            .field("considerations", &self.considerations.len())
            .field("executed_at", &self.executed_at)
            .finish()
    }
}
