//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{State, Transition};
use crate::machine::{Machine, TransitionTable};

/// Builder for constructing machines with a fluent API.
///
/// A builder without declared transitions produces an allow-list machine;
/// declaring any transition switches the machine to explicit-table mode.
pub struct MachineBuilder {
    name: String,
    states: Vec<State>,
    table: Option<TransitionTable>,
}

impl MachineBuilder {
    /// Create a builder for a machine with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            table: None,
        }
    }

    /// Register a state.
    pub fn state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Register multiple states at once.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = State>,
    {
        self.states.extend(states);
        self
    }

    /// Declare a transition, switching the machine to table mode.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.table
            .get_or_insert_with(TransitionTable::default)
            .push(transition);
        self
    }

    /// Declare multiple transitions at once, switching to table mode.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition>,
    {
        let table = self.table.get_or_insert_with(TransitionTable::default);
        for transition in transitions {
            table.push(transition);
        }
        self
    }

    /// Build the machine.
    ///
    /// Fails if any registered state has an empty name. Duplicate names
    /// are permitted (first registration wins on lookup), and table
    /// entries naming unregistered states are permitted and inert.
    pub fn build(self) -> Result<Machine, BuildError> {
        if self.states.iter().any(|s| s.name().is_empty()) {
            return Err(BuildError::EmptyStateName);
        }

        let mut machine = match self.table {
            Some(table) => Machine::with_topology(self.name, table),
            None => Machine::new(self.name),
        };
        for state in self.states {
            machine.add_state(state);
        }
        Ok(machine)
    }
}
