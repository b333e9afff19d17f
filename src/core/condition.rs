//! Condition predicates for table-mode transitions.
//!
//! Conditions are synchronous boolean functions evaluated against the
//! current state before the asynchronous entry guard runs. They encode
//! local checks that need no external confirmation.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines whether a transition may fire from the
/// current state.
///
/// # Example
///
/// ```rust
/// use stategate::{Condition, State};
///
/// // Only fire when the current state is open to any source.
/// let open_only = Condition::new(|state: &State| state.accepts_any_source());
///
/// assert!(open_only.check(&State::new("red")));
/// assert!(!open_only.check(&State::new("on").allow_from(["off"])));
/// ```
#[derive(Clone)]
pub struct Condition {
    predicate: Arc<dyn Fn(&State) -> bool + Send + Sync>,
}

impl Condition {
    /// Create a condition from a predicate over the current state.
    ///
    /// The predicate should be deterministic; the machine may evaluate it
    /// any number of times for failed attempts.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&State) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the condition against the current state.
    pub fn check(&self, state: &State) -> bool {
        (self.predicate)(state)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition")
    }
}
