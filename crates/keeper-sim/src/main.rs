//! Simulated goalkeeper driven by the utility engine.
//!
//! Runs a fixed number of control ticks. Every tick updates the world,
//! translates the situation into raised/cleared events, and lets the
//! engine pick and execute the keeper's best behavior. With `--graph` the
//! activation graph is dumped as one JSON line per tick, which is the same
//! view an external debugger would render.

mod behaviors;
mod world;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use utility_engine::{ActivationGraph, DecisionEngine, EngineError};

use crate::world::{KeeperWorld, MatchEvent};

#[derive(Debug, Parser)]
#[command(about = "Simulated goalkeeper driven by the utility engine")]
struct Args {
    /// Number of control ticks to simulate.
    #[arg(long, default_value_t = 40)]
    ticks: u32,

    /// Seed for the simulated sensors; same seed, same match.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Dump the activation graph as a JSON line after every tick.
    #[arg(long)]
    graph: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let graph = Rc::new(RefCell::new(ActivationGraph::new()));
    let mut engine = DecisionEngine::with_observer(Rc::clone(&graph));
    behaviors::register(&mut engine)?;

    let mut world = KeeperWorld::new(args.seed);
    for _ in 0..args.ticks {
        world.step();
        apply_match_situation(&mut engine, &world);

        match engine.execute_best_decision(&mut world) {
            Ok(()) => {}
            Err(EngineError::NoDecisionActivated) => {
                // Nothing scored; the keeper just holds position this tick.
                tracing::info!("holding position");
            }
            Err(other) => return Err(other.into()),
        }

        if args.graph {
            println!("{}", serde_json::to_string(&*graph.borrow())?);
        }
    }

    summarize(&world);
    Ok(())
}

/// Translates the world into the engine's event gates.
fn apply_match_situation(
    engine: &mut DecisionEngine<MatchEvent, KeeperWorld>,
    world: &KeeperWorld,
) {
    if world.penalized() {
        engine.clear_event(MatchEvent::Playing);
        engine.clear_event(MatchEvent::BallThreat);
        engine.raise_event(MatchEvent::Penalized);
        return;
    }

    engine.clear_event(MatchEvent::Penalized);
    engine.raise_event(MatchEvent::Playing);
    if world.ball_distance < 8.0 {
        engine.raise_event(MatchEvent::BallThreat);
    } else {
        engine.clear_event(MatchEvent::BallThreat);
    }
}

fn summarize(world: &KeeperWorld) {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for action in &world.actions_taken {
        let action = action.as_str();
        match counts.iter_mut().find(|entry| entry.0 == action) {
            Some(entry) => entry.1 += 1,
            None => counts.push((action, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    tracing::info!("match over after {} ticks", world.tick);
    for (name, count) in counts {
        tracing::info!("  {count:>3}x {name}");
    }
}
