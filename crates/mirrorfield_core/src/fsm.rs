//! State Machine Runtime
//!
//! Flat, table-driven state machines for control lifecycles. A machine is
//! a current state plus a list of `(from, event, to)` transitions; sending
//! an event with no matching transition leaves the state untouched.

use std::fmt::Debug;

use smallvec::SmallVec;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
}

impl<S, E> Transition<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: SmallVec<[Transition<S, E>; 4]>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: Vec::new(),
        }
    }
}

/// A state machine instance
#[derive(Debug)]
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: SmallVec<[Transition<S, E>; 4]>,
    /// History of state transitions (for debugging)
    history: Vec<(S, E, S)>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        self.find(event).is_some()
    }

    /// Send an event, returning the state the machine ends up in
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;
        let Some(to_state) = self.find(event) else {
            tracing::trace!(?current, ?event, "no transition");
            return current;
        };

        self.current_state = to_state;
        self.history.push((current, event, to_state));
        tracing::trace!(from = ?current, ?event, to = ?to_state, "transition");

        to_state
    }

    fn find(&self, event: E) -> Option<S> {
        let current = self.current_state;
        self.transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)
            .map(|t| t.to_state)
    }
}
