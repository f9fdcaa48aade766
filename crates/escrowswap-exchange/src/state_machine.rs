//! Generic finite-state sequencer for contract lifecycles.
//!
//! A [`StateMachine`] knows a fixed set of states and, for each, the states
//! it may move to next. Nothing moves on its own: every transition is an
//! explicit [`StateMachine::transition_to`] call, and anything outside the
//! table is rejected with [`EscrowError::IllegalTransition`].
//!
//! ```text
//!   ┌──────┐      ┌──────────┐      ┌────────┐
//!   │ OPEN ├─────▶│ SETTLING ├─────▶│ CLOSED │   (terminal: no next states)
//!   └──┬───┘      └──────────┘      └────────┘
//!      └──────────────────────────────▲
//! ```

use std::{
    collections::{HashMap, HashSet},
    fmt,
    hash::Hash,
};

use escrowswap_types::{EscrowError, Result};

/// Current state plus the immutable transition table.
#[derive(Debug, Clone)]
pub struct StateMachine<S> {
    current: S,
    transitions: HashMap<S, HashSet<S>>,
}

impl<S> StateMachine<S>
where
    S: Copy + Eq + Hash + fmt::Display,
{
    /// Build a machine from its initial state and transition table.
    ///
    /// Every state must appear as a key of `table`; terminal states map to
    /// an empty set.
    ///
    /// # Errors
    /// [`EscrowError::Configuration`] if `initial` or any target state is not
    /// a declared state.
    pub fn new<I, T>(initial: S, table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        T: IntoIterator<Item = S>,
    {
        let transitions: HashMap<S, HashSet<S>> = table
            .into_iter()
            .map(|(from, next)| (from, next.into_iter().collect()))
            .collect();

        if !transitions.contains_key(&initial) {
            return Err(EscrowError::Configuration(format!(
                "initial state {initial} is not declared"
            )));
        }
        for (from, next) in &transitions {
            if let Some(stray) = next.iter().find(|s| !transitions.contains_key(*s)) {
                return Err(EscrowError::Configuration(format!(
                    "transition {from} -> {stray} targets an undeclared state"
                )));
            }
        }

        Ok(Self {
            current: initial,
            transitions,
        })
    }

    /// Is `next` in the allowed set of the current state?
    #[must_use]
    pub fn can_transition_to(&self, next: S) -> bool {
        self.transitions
            .get(&self.current)
            .is_some_and(|allowed| allowed.contains(&next))
    }

    /// Move to `next`.
    ///
    /// # Errors
    /// [`EscrowError::IllegalTransition`] unless [`Self::can_transition_to`]
    /// holds; the current state is left unchanged.
    pub fn transition_to(&mut self, next: S) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(EscrowError::IllegalTransition {
                from: self.current.to_string(),
                to: next.to_string(),
            });
        }
        tracing::debug!(from = %self.current, to = %next, "State transition");
        self.current = next;
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> S {
        self.current
    }

    /// Does the current state have no way out?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.transitions
            .get(&self.current)
            .is_none_or(HashSet::is_empty)
    }
}
