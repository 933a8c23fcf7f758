//! The simulated pitch as seen by one goalkeeper.
//!
//! This is the host context handed to every sensor and action callback.
//! Readings are noisy on purpose: each tick nudges the ball with seeded
//! randomness so repeated runs with the same seed replay identically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Host events gating which behaviors are candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchEvent {
    /// Normal open play.
    Playing,
    /// The ball is close enough to threaten the goal.
    BallThreat,
    /// The referee penalized the keeper; almost nothing is allowed.
    Penalized,
}

/// Mutable world state observed and modified by the keeper's behaviors.
pub struct KeeperWorld {
    rng: StdRng,
    pub tick: u32,
    /// Distance from keeper to ball, meters.
    pub ball_distance: f32,
    /// Ball speed towards the goal, m/s.
    pub ball_speed: f32,
    /// Remaining battery charge in `[0, 1]`.
    pub battery: f32,
    /// How far the keeper has strayed from the goal line, meters.
    pub off_line: f32,
    /// Names of the actions executed so far, newest last.
    pub actions_taken: Vec<String>,
}

impl KeeperWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
            ball_distance: 20.0,
            ball_speed: 0.0,
            battery: 1.0,
            off_line: 0.0,
            actions_taken: Vec::new(),
        }
    }

    /// Advances the simulated match by one control tick.
    pub fn step(&mut self) {
        self.tick += 1;
        // The ball drifts towards the goal with some jitter.
        let drift = self.rng.random_range(-1.5..3.0);
        self.ball_distance = (self.ball_distance - drift).clamp(0.0, 30.0);
        self.ball_speed = self.rng.random_range(0.0..10.0);
        self.battery = (self.battery - 0.01).max(0.0);
    }

    /// Whether the referee has the keeper penalized this tick.
    ///
    /// The schedule is fixed so every run exercises the penalized window.
    pub fn penalized(&self) -> bool {
        (12..16).contains(&self.tick)
    }

    pub fn record(&mut self, action: &str) {
        self.actions_taken.push(action.to_owned());
    }

    // Effects invoked by the keeper's actions.

    pub fn dive(&mut self) {
        // A successful dive clears the danger.
        self.ball_distance = self.rng.random_range(15.0..30.0);
        self.ball_speed = 0.0;
        self.battery = (self.battery - 0.05).max(0.0);
    }

    pub fn step_towards_ball(&mut self) {
        self.ball_distance = (self.ball_distance - 0.5).max(0.0);
        self.off_line = (self.off_line + 0.4).min(8.0);
    }

    pub fn step_back_to_line(&mut self) {
        self.off_line = (self.off_line - 1.0).max(0.0);
    }
}
