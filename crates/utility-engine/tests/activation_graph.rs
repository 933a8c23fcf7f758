use std::cell::RefCell;
use std::rc::Rc;

use utility_engine::{
    ActivationGraph, Consideration, Decision, DecisionEngine, Transform, UtilityScore,
    NOT_EVALUATED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Event {
    Match,
}

struct Pitch {
    ball_distance: f32,
}

fn distance_decision(name: &str, utility: UtilityScore) -> Decision<Pitch> {
    Decision::new(
        name,
        "",
        utility,
        vec![Consideration::new(
            "ball distance",
            |pitch: &mut Pitch| pitch.ball_distance,
            Transform::Inverted,
            0.0,
            10.0,
        )],
        |_, _| {},
    )
}

#[test]
fn graph_tracks_names_scores_and_the_pruned_tail() {
    let graph = Rc::new(RefCell::new(ActivationGraph::new()));
    let mut engine = DecisionEngine::with_observer(Rc::clone(&graph));

    engine
        .add(distance_decision("dive", UtilityScore::MostUseful), &[Event::Match])
        .unwrap();
    engine
        .add(distance_decision("track", UtilityScore::Useful), &[Event::Match])
        .unwrap();
    engine
        .add(distance_decision("wander", UtilityScore::SlightlyUseful), &[Event::Match])
        .unwrap();

    engine.raise_event(Event::Match);
    {
        let view = graph.borrow();
        let names: Vec<_> = view.entries().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["dive", "track", "wander"]);
        assert!(view.entries().iter().all(|e| e.score == NOT_EVALUATED));
    }

    // Ball on top of the keeper: the top candidate saturates its tier and
    // the rest of the window is pruned.
    let mut pitch = Pitch { ball_distance: 0.0 };
    let best = engine.best_decision(&mut pitch).unwrap();
    assert_eq!(best.name(), "dive");
    {
        let view = graph.borrow();
        assert_eq!(view.best_index(), Some(0));
        assert_eq!(view.entries()[0].score, UtilityScore::MostUseful.value());
        assert_eq!(view.entries()[1].score, NOT_EVALUATED);
        assert_eq!(view.entries()[2].score, NOT_EVALUATED);
    }

    // Ball at mid range: the top candidate no longer saturates, the second
    // is scored, and the lowest tier is pruned because it cannot beat the
    // running best.
    pitch.ball_distance = 5.0;
    engine.best_decision(&mut pitch).unwrap();
    {
        let view = graph.borrow();
        assert_eq!(view.best_index(), Some(0));
        assert!((view.entries()[0].score - 2.0).abs() < 1e-6);
        assert!((view.entries()[1].score - 1.0).abs() < 1e-6);
        assert_eq!(view.entries()[2].score, NOT_EVALUATED);
    }

    // Clearing the event shrinks the window and resets the view.
    engine.clear_event(Event::Match);
    assert!(graph.borrow().entries().is_empty());
    assert!(graph.borrow().best_index().is_none());
}

#[test]
fn failed_selection_publishes_no_best() {
    let graph = Rc::new(RefCell::new(ActivationGraph::new()));
    let mut engine = DecisionEngine::with_observer(Rc::clone(&graph));

    engine
        .add(distance_decision("track", UtilityScore::Useful), &[Event::Match])
        .unwrap();
    engine.raise_event(Event::Match);

    // Ball at max range scores exactly zero.
    let mut pitch = Pitch {
        ball_distance: 10.0,
    };
    assert!(engine.best_decision(&mut pitch).is_err());
    let view = graph.borrow();
    assert_eq!(view.best_index(), None);
    // The zero was still recorded for inspection.
    assert_eq!(view.entries()[0].score, 0.0);
}
