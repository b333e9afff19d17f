//! Builder API for ergonomic machine construction.
//!
//! [`MachineBuilder`] assembles a machine from states and (optionally) a
//! transition table; the free functions below are shorthand factories
//! for the common cases.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;

use crate::core::{State, Transition};

/// Shorthand for [`State::new`].
pub fn state(name: impl Into<String>) -> State {
    State::new(name)
}

/// Create an unconditional transition between two named states.
pub fn transition(from: impl Into<String>, to: impl Into<String>) -> Transition {
    Transition::new(from, to)
}

/// Create a transition gated by a predicate over the current state.
pub fn guarded_transition<F>(from: impl Into<String>, to: impl Into<String>, condition: F) -> Transition
where
    F: Fn(&State) -> bool + Send + Sync + 'static,
{
    Transition::new(from, to).when(condition)
}
