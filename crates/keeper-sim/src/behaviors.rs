//! The goalkeeper's behavior rules.
//!
//! One registration function wires every decision into the engine. Sensors
//! read [`KeeperWorld`] fields; actions log what the keeper does and apply
//! the effect back onto the world.

use anyhow::Result;
use utility_engine::{
    Consideration, Decision, DecisionEngine, Spline, Transform, UtilityScore,
};

use crate::world::{KeeperWorld, MatchEvent};

type Engine = DecisionEngine<MatchEvent, KeeperWorld>;

/// Registers the full rule set.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.add(dive_for_ball()?, &[MatchEvent::BallThreat])?;
    engine.add(track_ball(), &[MatchEvent::Playing, MatchEvent::BallThreat])?;
    engine.add(return_to_line()?, &[MatchEvent::Playing])?;
    engine.add(scan_field(), &[MatchEvent::Playing])?;
    engine.add(freeze(), &[MatchEvent::Penalized])?;
    Ok(())
}

/// Commit to a dive when the ball is close and moving fast.
fn dive_for_ball() -> Result<Decision<KeeperWorld>> {
    // Utility falls off sharply once the ball is more than a third of the
    // threat range away.
    let reach = Spline::monotone(vec![(0.0, 1.0), (0.35, 0.85), (0.7, 0.15), (1.0, 0.0)])?;
    Ok(Decision::new(
        "dive for ball",
        "last-ditch save when a shot is incoming",
        UtilityScore::MostUseful,
        vec![
            Consideration::new(
                "ball within reach",
                |w: &mut KeeperWorld| w.ball_distance,
                reach,
                0.0,
                8.0,
            ),
            Consideration::new(
                "shot is fast",
                |w: &mut KeeperWorld| w.ball_speed,
                Transform::Binary { threshold: 4.0 },
                0.0,
                10.0,
            ),
        ],
        |w: &mut KeeperWorld, me| {
            tracing::info!("{}!", me.name());
            w.record(me.name());
            w.dive();
        },
    ))
}

/// Close down the ball while it approaches.
fn track_ball() -> Decision<KeeperWorld> {
    Decision::new(
        "track ball",
        "shuffle towards the ball to narrow the angle",
        UtilityScore::Useful,
        vec![
            Consideration::new(
                "ball approaching",
                |w: &mut KeeperWorld| w.ball_distance,
                Transform::Inverted,
                0.0,
                30.0,
            ),
            Consideration::new(
                "battery left",
                |w: &mut KeeperWorld| w.battery,
                Transform::Identity,
                0.0,
                1.0,
            ),
        ],
        |w: &mut KeeperWorld, me| {
            tracing::info!("{}", me.name());
            w.record(me.name());
            w.step_towards_ball();
        },
    )
}

/// Get back on the goal line after straying.
fn return_to_line() -> Result<Decision<KeeperWorld>> {
    // Barely matters near the line, dominant once the keeper wanders far.
    let urgency = Spline::step_after(vec![(0.0, 0.0), (0.25, 0.3), (0.5, 0.7), (0.75, 1.0)])?;
    Ok(Decision::new(
        "return to line",
        "walk back towards the goal line",
        UtilityScore::VeryUseful,
        vec![Consideration::new(
            "distance off the line",
            |w: &mut KeeperWorld| w.off_line,
            urgency,
            0.0,
            8.0,
        )],
        |w: &mut KeeperWorld, me| {
            tracing::info!("{}", me.name());
            w.record(me.name());
            w.step_back_to_line();
        },
    ))
}

/// Low-priority default so open play never dead-ends.
fn scan_field() -> Decision<KeeperWorld> {
    Decision::new(
        "scan field",
        "look around and keep the legs warm",
        UtilityScore::SlightlyUseful,
        vec![Consideration::new(
            "battery left",
            |w: &mut KeeperWorld| w.battery,
            Transform::Power { exponent: 0.5 },
            0.0,
            1.0,
        )],
        |w: &mut KeeperWorld, me| {
            tracing::info!("{}", me.name());
            w.record(me.name());
        },
    )
}

/// While penalized the only sensible behavior is standing still.
fn freeze() -> Decision<KeeperWorld> {
    Decision::new(
        "freeze",
        "stand still until the penalty is over",
        UtilityScore::MostUseful,
        vec![Consideration::new(
            "always applies",
            |_: &mut KeeperWorld| 1.0,
            Transform::Identity,
            0.0,
            1.0,
        )],
        |w: &mut KeeperWorld, me| {
            tracing::info!("{} (penalized)", me.name());
            w.record(me.name());
        },
    )
}
