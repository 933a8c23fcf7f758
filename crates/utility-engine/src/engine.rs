//! The decision engine: registry, event gating, and lazy best selection.

use std::cmp;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::decision::Decision;
use crate::error::EngineError;
use crate::observer::ActivationObserver;

/// A candidate in the active window: which event loaded it and where the
/// decision lives in the registry arena.
#[derive(Debug, Clone, Copy)]
struct ActiveRule<E> {
    event: E,
    decision: usize,
}

/// Lazily selects the decision with the highest composite score from an
/// event-gated subset of the registered rules.
///
/// Decisions are registered under one or more host-defined events. Raising
/// an event loads its decisions into the active window; clearing unloads
/// them. [`best_decision`](Self::best_decision) walks the window in
/// tier-descending order, pruning candidates whose tier cannot beat the
/// best score found so far.
///
/// # Type parameters
///
/// - `E`: the event symbol. Any cheap hashable key works; applications
///   typically use a fieldless enum.
/// - `C`: the host context handed to every sensor and action callback.
///
/// # Ownership
///
/// The engine owns its decisions in a single arena; the rule table and the
/// active window refer to them by index. Structural mutation goes through
/// the engine's API only, and `clear` drains the active window before
/// touching the registry so no index ever dangles.
///
/// The engine is single-threaded and cooperative: every operation returns
/// synchronously, and callbacks run on the caller's thread in a
/// deterministic order (considerations in authored order, decisions in
/// window order).
pub struct DecisionEngine<E, C> {
    /// Arena of every registered decision.
    decisions: Vec<Decision<C>>,
    /// Event to arena indices, tier-sorted once flushed.
    rules: HashMap<E, Vec<usize>>,
    /// Current candidate window, tier-sorted (stable).
    active_rules: Vec<ActiveRule<E>>,
    active_events: HashSet<E>,
    /// Events whose rule bucket grew since the last sort flush.
    updated_events: HashSet<E>,
    observer: Option<Box<dyn ActivationObserver>>,
}

impl<E, C> DecisionEngine<E, C> {
    pub fn new() -> Self {
        Self {
            decisions: Vec::new(),
            rules: HashMap::new(),
            active_rules: Vec::new(),
            active_events: HashSet::new(),
            updated_events: HashSet::new(),
            observer: None,
        }
    }

    /// Creates an engine that reports its selection walk to `observer`.
    pub fn with_observer(observer: impl ActivationObserver + 'static) -> Self {
        let mut engine = Self::new();
        engine.observer = Some(Box::new(observer));
        engine
    }

    /// Installs (or replaces) the activation observer.
    pub fn set_observer(&mut self, observer: impl ActivationObserver + 'static) {
        self.observer = Some(Box::new(observer));
        self.rebuild_observer();
    }

    /// Re-initializes the observer's view after the window changed shape.
    fn rebuild_observer(&mut self) {
        if self.observer.is_none() {
            return;
        }
        let names: Vec<&str> = self
            .active_rules
            .iter()
            .map(|rule| self.decisions[rule.decision].name())
            .collect();
        if let Some(observer) = self.observer.as_mut() {
            observer.reset(&names);
        }
    }
}

impl<E, C> Default for DecisionEngine<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> DecisionEngine<E, C>
where
    E: Copy + Eq + Hash + fmt::Debug,
{
    /// Registers a decision under every event in `events`.
    ///
    /// The touched buckets are only marked for sorting; the actual sort is
    /// deferred to the next query. The active window is never touched, so
    /// a decision added while one of its events is raised becomes a
    /// candidate only after that event is cleared and raised again.
    ///
    /// Fails with [`EngineError::NoConsiderations`] if the decision has an
    /// empty consideration list, which would make its score undefined.
    /// On failure the registry is left untouched.
    pub fn add(&mut self, decision: Decision<C>, events: &[E]) -> Result<(), EngineError> {
        if decision.considerations().is_empty() {
            return Err(EngineError::NoConsiderations(decision.name().to_owned()));
        }
        tracing::debug!(
            "registering '{}' ({:?}) under {events:?}",
            decision.name(),
            decision.utility()
        );
        let index = self.decisions.len();
        self.decisions.push(decision);
        for &event in events {
            self.rules.entry(event).or_default().push(index);
            self.updated_events.insert(event);
        }
        Ok(())
    }

    /// Loads the decisions bound to `event` into the active window.
    ///
    /// Raising an event that is already active is a no-op, so the window
    /// never holds duplicate entries for one binding. Raising an event
    /// with no bound decisions marks it active but loads nothing.
    ///
    /// Decisions bound to other raised events stay loaded; use
    /// [`clear_event`](Self::clear_event) or
    /// [`clear_active`](Self::clear_active) to unload.
    pub fn raise_event(&mut self, event: E) {
        self.flush_pending_sorts();
        if self.active_events.insert(event) {
            tracing::debug!("raising {event:?}");
            if let Some(bucket) = self.rules.get(&event) {
                for &decision in bucket {
                    self.active_rules.push(ActiveRule { event, decision });
                }
            }
            self.sort_active_rules();
            self.rebuild_observer();
        }
    }

    /// Unloads every candidate that `event` loaded and deactivates it.
    ///
    /// The event's rule bucket is retained, so the event can be raised
    /// again later. Clearing an inactive event is a no-op.
    pub fn clear_event(&mut self, event: E) {
        if self.active_events.remove(&event) {
            tracing::debug!("clearing {event:?}");
            self.active_rules.retain(|rule| rule.event != event);
            self.rebuild_observer();
        }
    }

    /// Empties the active window; the registry is untouched.
    pub fn clear_active(&mut self) {
        self.active_rules.clear();
        self.active_events.clear();
        self.rebuild_observer();
    }

    /// Clears the active window, then the whole registry.
    pub fn clear(&mut self) {
        self.clear_active();
        self.rules.clear();
        self.decisions.clear();
        self.updated_events.clear();
    }

    /// The set of currently raised events.
    pub fn active_events(&self) -> &HashSet<E> {
        &self.active_events
    }

    /// Snapshot of the current candidate window, in selection order.
    pub fn active_decisions(&self) -> Vec<&Decision<C>> {
        self.active_rules
            .iter()
            .map(|rule| &self.decisions[rule.decision])
            .collect()
    }

    /// Selects the active decision with the highest composite score.
    ///
    /// Fails with [`EngineError::EmptyActiveSet`] when no candidate is
    /// loaded, and with [`EngineError::NoDecisionActivated`] when every
    /// evaluated candidate scored zero.
    pub fn best_decision(&mut self, ctx: &mut C) -> Result<&Decision<C>, EngineError> {
        let index = self.select_best(ctx)?;
        Ok(&self.decisions[index])
    }

    /// Selects the best decision and runs its action.
    pub fn execute_best_decision(&mut self, ctx: &mut C) -> Result<(), EngineError> {
        let index = self.select_best(ctx)?;
        self.decisions[index].execute(ctx);
        Ok(())
    }

    /// The lazy selection walk. Returns the winner's arena index.
    ///
    /// Relies on two invariants: the window is tier-sorted descending, and
    /// a tier is an upper bound on its decision's composite score. Together
    /// they allow stopping as soon as the next tier cannot beat the best
    /// score seen, and as soon as a candidate saturates its own tier.
    fn select_best(&mut self, ctx: &mut C) -> Result<usize, EngineError> {
        self.flush_pending_sorts();
        if self.active_rules.is_empty() {
            return Err(EngineError::EmptyActiveSet);
        }

        let mut best_score = 0.0f32;
        let mut best_position = 0usize;
        let mut evaluated = 0usize;

        for position in 0..self.active_rules.len() {
            let rule = self.active_rules[position];
            let decision = &self.decisions[rule.decision];
            let utility = decision.utility().value();
            tracing::debug!("considering '{}' (utility {utility})", decision.name());

            if utility == 0.0 || utility < best_score {
                tracing::debug!("  stopping: remaining tiers cannot win");
                break;
            }

            let score = decision.compute_score(ctx);
            tracing::debug!("  composite score {score:.4}");
            evaluated = position + 1;
            if let Some(observer) = self.observer.as_mut() {
                observer.record(position, score);
            }

            if score > best_score {
                best_score = score;
                best_position = position;
            }
            if score == utility {
                tracing::debug!("  saturated its tier, stopping early");
                break;
            }
        }

        if best_score == 0.0 {
            return Err(EngineError::NoDecisionActivated);
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.finish(best_position, evaluated);
        }

        let winner = self.active_rules[best_position].decision;
        tracing::debug!(
            "best decision '{}' (score {best_score:.4})",
            self.decisions[winner].name()
        );
        Ok(winner)
    }

    /// Sorts the rule buckets that grew since the last flush.
    ///
    /// Buckets sort stably by tier descending. If a touched event is
    /// currently active the window is re-sorted too (and the observer
    /// re-aligned), keeping the selection invariant intact no matter when
    /// decisions were added.
    fn flush_pending_sorts(&mut self) {
        if self.updated_events.is_empty() {
            return;
        }
        let mut resort_active = false;
        let decisions = &self.decisions;
        for event in self.updated_events.drain() {
            if let Some(bucket) = self.rules.get_mut(&event) {
                bucket.sort_by_key(|&index| cmp::Reverse(decisions[index].utility()));
            }
            if self.active_events.contains(&event) {
                resort_active = true;
            }
        }
        if resort_active {
            self.sort_active_rules();
            self.rebuild_observer();
        }
    }

    /// Stable tier-descending sort of the candidate window.
    fn sort_active_rules(&mut self) {
        let decisions = &self.decisions;
        self.active_rules
            .sort_by_key(|rule| cmp::Reverse(decisions[rule.decision].utility()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consideration::Consideration;
    use crate::decision::UtilityScore;
    use crate::transform::Transform;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Event {
        Always,
        Alert,
    }

    struct World;

    fn constant(value: f32) -> Vec<Consideration<World>> {
        vec![Consideration::new(
            "constant",
            move |_: &mut World| value,
            Transform::Identity,
            0.0,
            1.0,
        )]
    }

    fn decision(name: &str, utility: UtilityScore, value: f32) -> Decision<World> {
        Decision::new(name, "", utility, constant(value), |_, _| {})
    }

    fn tiers<E: Copy + Eq + Hash + fmt::Debug>(
        engine: &DecisionEngine<E, World>,
    ) -> Vec<UtilityScore> {
        engine
            .active_decisions()
            .iter()
            .map(|d| d.utility())
            .collect()
    }

    #[test]
    fn rejects_decisions_without_considerations() {
        let mut engine = DecisionEngine::<Event, World>::new();
        let err = engine
            .add(
                Decision::new("empty", "", UtilityScore::Useful, Vec::new(), |_, _| {}),
                &[Event::Always],
            )
            .unwrap_err();
        assert_eq!(err, EngineError::NoConsiderations("empty".into()));
        assert!(engine.active_events().is_empty());
    }

    #[test]
    fn window_stays_tier_sorted_across_events() {
        let mut engine = DecisionEngine::new();
        engine
            .add(decision("low", UtilityScore::SlightlyUseful, 0.5), &[Event::Always])
            .unwrap();
        engine
            .add(decision("high", UtilityScore::MostUseful, 0.5), &[Event::Alert])
            .unwrap();
        engine
            .add(decision("mid", UtilityScore::Useful, 0.5), &[Event::Always])
            .unwrap();

        engine.raise_event(Event::Always);
        engine.raise_event(Event::Alert);

        assert_eq!(
            tiers(&engine),
            vec![
                UtilityScore::MostUseful,
                UtilityScore::Useful,
                UtilityScore::SlightlyUseful
            ]
        );
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut engine = DecisionEngine::new();
        for name in ["first", "second", "third"] {
            engine
                .add(decision(name, UtilityScore::Useful, 0.5), &[Event::Always])
                .unwrap();
        }
        engine.raise_event(Event::Always);
        let names: Vec<_> = engine
            .active_decisions()
            .iter()
            .map(|d| d.name().to_owned())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn raising_twice_does_not_duplicate() {
        let mut engine = DecisionEngine::new();
        engine
            .add(decision("only", UtilityScore::Useful, 0.5), &[Event::Always])
            .unwrap();
        engine.raise_event(Event::Always);
        engine.raise_event(Event::Always);
        assert_eq!(engine.active_decisions().len(), 1);
    }

    #[test]
    fn add_while_active_waits_for_the_next_raise() {
        let mut engine = DecisionEngine::new();
        engine
            .add(decision("original", UtilityScore::Useful, 0.5), &[Event::Always])
            .unwrap();
        engine.raise_event(Event::Always);

        engine
            .add(decision("latecomer", UtilityScore::MostUseful, 0.5), &[Event::Always])
            .unwrap();

        // Still only the originally loaded candidate; the query flushed the
        // bucket sort but did not grow the window.
        let best = engine.best_decision(&mut World).unwrap();
        assert_eq!(best.name(), "original");
        assert_eq!(engine.active_decisions().len(), 1);

        // Re-raising after a clear picks up the latecomer, tier first.
        engine.clear_event(Event::Always);
        engine.raise_event(Event::Always);
        assert_eq!(engine.active_decisions().len(), 2);
        assert_eq!(
            engine.active_decisions()[0].name(),
            "latecomer"
        );
    }

    #[test]
    fn clear_event_is_idempotent() {
        let mut engine = DecisionEngine::new();
        engine
            .add(decision("only", UtilityScore::Useful, 0.5), &[Event::Always])
            .unwrap();
        engine.raise_event(Event::Always);
        engine.clear_event(Event::Always);
        engine.clear_event(Event::Always);
        assert!(engine.active_decisions().is_empty());
        assert!(engine.active_events().is_empty());
    }

    #[test]
    fn raising_an_unknown_event_marks_it_active() {
        let mut engine = DecisionEngine::<Event, World>::new();
        engine.raise_event(Event::Alert);
        assert!(engine.active_events().contains(&Event::Alert));
        assert!(engine.active_decisions().is_empty());
        assert_eq!(
            engine.best_decision(&mut World).unwrap_err(),
            EngineError::EmptyActiveSet
        );
    }

    #[test]
    fn multi_event_bindings_share_one_decision() {
        let mut engine = DecisionEngine::new();
        engine
            .add(
                decision("both", UtilityScore::Useful, 0.5),
                &[Event::Always, Event::Alert],
            )
            .unwrap();
        engine.raise_event(Event::Always);
        engine.raise_event(Event::Alert);
        // Loaded once per binding.
        assert_eq!(engine.active_decisions().len(), 2);

        engine.clear_event(Event::Alert);
        assert_eq!(engine.active_decisions().len(), 1);
        assert_eq!(
            engine.best_decision(&mut World).unwrap().name(),
            "both"
        );
    }

    #[test]
    fn clear_resets_to_empty_and_allows_reregistration() {
        let mut engine = DecisionEngine::new();
        engine
            .add(decision("a", UtilityScore::Useful, 0.75), &[Event::Always])
            .unwrap();
        engine.raise_event(Event::Always);
        let before = engine.best_decision(&mut World).unwrap().name().to_owned();

        engine.clear();
        assert_eq!(
            engine.best_decision(&mut World).unwrap_err(),
            EngineError::EmptyActiveSet
        );

        engine
            .add(decision("a", UtilityScore::Useful, 0.75), &[Event::Always])
            .unwrap();
        engine.raise_event(Event::Always);
        assert_eq!(engine.best_decision(&mut World).unwrap().name(), before);
    }
}
