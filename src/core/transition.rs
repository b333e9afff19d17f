//! Transition entries for the explicit-table topology.

use super::condition::Condition;
use super::state::State;

/// A declared permission to move from one named state to another,
/// optionally gated by a local [`Condition`].
///
/// Transitions only carry names; whether the names reference registered
/// states is resolved by the machine at transition time. An entry whose
/// `from` never matches the current state is inert.
///
/// ```rust
/// use stategate::{State, Transition};
///
/// let hop = Transition::new("off", "on").when(|s: &State| s.name() == "off");
///
/// assert!(hop.connects("off", "on"));
/// assert!(hop.permits(&State::new("off")));
/// ```
#[derive(Clone, Debug)]
pub struct Transition {
    from: String,
    to: String,
    condition: Option<Condition>,
}

impl Transition {
    /// Create an unconditional transition between two named states.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            condition: None,
        }
    }

    /// Gate the transition with a predicate over the current state.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&State) -> bool + Send + Sync + 'static,
    {
        self.with_condition(Condition::new(predicate))
    }

    /// Gate the transition with a pre-built [`Condition`].
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Name of the state this transition fires from.
    pub fn source(&self) -> &str {
        &self.from
    }

    /// Name of the state this transition leads to.
    pub fn target(&self) -> &str {
        &self.to
    }

    /// Whether this entry declares the `(from, to)` pair.
    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    /// Evaluate the local condition; a transition without one always permits.
    pub fn permits(&self, current: &State) -> bool {
        self.condition.as_ref().is_none_or(|c| c.check(current))
    }
}
