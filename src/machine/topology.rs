//! Reachability strategies.
//!
//! A machine's topology can be expressed two ways: per-state allow-lists
//! (the canonical mode, read off the [`State`] descriptors themselves) or
//! an explicit table of [`Transition`] entries. Both answer the same
//! question through the [`Topology`] trait.

use crate::core::{State, Transition};

/// Strategy answering "may the machine move from `from` to `to`?".
pub trait Topology: Send + Sync {
    /// Whether `to` may be entered from `from`. Evaluated synchronously,
    /// before any entry guard runs.
    fn is_reachable(&self, from: &State, to: &State) -> bool;
}

/// Allow-list topology: a target is reachable when its
/// [`State::allowed_sources`] list names the current state or is empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowList;

impl Topology for AllowList {
    fn is_reachable(&self, from: &State, to: &State) -> bool {
        to.allows_source(from.name())
    }
}

/// Explicit-table topology: a target is reachable when the first declared
/// entry for the `(from, to)` pair exists and its condition evaluates
/// true on the current state.
///
/// Only the first matching entry is consulted; a later entry for the same
/// pair never overrides it.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// Build a table from declared transitions.
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    /// Append a transition entry.
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// All declared entries, in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

impl Topology for TransitionTable {
    fn is_reachable(&self, from: &State, to: &State) -> bool {
        self.transitions
            .iter()
            .find(|t| t.connects(from.name(), to.name()))
            .is_some_and(|t| t.permits(from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_open_state_is_reachable_from_anywhere() {
        let from = State::new("whatever");
        let to = State::new("red");

        assert!(AllowList.is_reachable(&from, &to));
    }

    #[test]
    fn allow_list_respects_sources() {
        let off = State::new("off");
        let running = State::new("running");
        let on = State::new("on").allow_from(["off"]);

        assert!(AllowList.is_reachable(&off, &on));
        assert!(!AllowList.is_reachable(&running, &on));
    }

    #[test]
    fn empty_table_reaches_nothing() {
        let table = TransitionTable::default();

        assert!(!table.is_reachable(&State::new("off"), &State::new("on")));
    }

    #[test]
    fn table_matches_declared_pair() {
        let table = TransitionTable::new(vec![Transition::new("off", "on")]);

        assert!(table.is_reachable(&State::new("off"), &State::new("on")));
        assert!(!table.is_reachable(&State::new("on"), &State::new("off")));
    }

    #[test]
    fn table_condition_blocks_pair() {
        let table =
            TransitionTable::new(vec![Transition::new("off", "on").when(|_: &State| false)]);

        assert!(!table.is_reachable(&State::new("off"), &State::new("on")));
    }

    #[test]
    fn first_declared_entry_wins() {
        // The second entry for the same pair would permit, but the first
        // one is consulted and it refuses.
        let table = TransitionTable::new(vec![
            Transition::new("off", "on").when(|_: &State| false),
            Transition::new("off", "on"),
        ]);

        assert!(!table.is_reachable(&State::new("off"), &State::new("on")));
    }
}
