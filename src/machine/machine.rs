//! The machine: topology registry, current state, and the transition
//! protocol.

use crate::builder::MachineBuilder;
use crate::core::{State, TransitionLog, TransitionRecord};
use crate::machine::error::{StartError, TransitionError};
use crate::machine::topology::{AllowList, Topology};
use std::fmt;

/// A finite state machine whose transitions are confirmed asynchronously.
///
/// The machine holds the registered states, a reachability strategy, and
/// the current state. [`transition`] is the only state-changing
/// operation after [`start`]: it validates the request against the
/// topology, then awaits the target's entry guard before swapping the
/// current state.
///
/// # Concurrency
///
/// [`transition`] takes `&mut self`, so two attempts on the same machine
/// cannot overlap without interior mutability. Callers sharing a machine
/// across tasks (behind a `Mutex` or similar) own the ordering of their
/// requests; the machine itself never serializes or re-queues them. A
/// guard future that never resolves leaves that call pending forever, and
/// a `transition` future dropped before its guard resolves leaves the
/// current state untouched.
///
/// [`start`]: Machine::start
/// [`transition`]: Machine::transition
///
/// # Example
///
/// ```rust
/// use stategate::{Machine, State};
///
/// let mut machine = Machine::new("microwave");
/// machine.add_state(State::new("off").allow_from(["on"]));
/// machine.add_state(
///     State::new("on")
///         .allow_from(["off"])
///         .on_before_enter(|_prev: &str| async { Ok(()) }),
/// );
///
/// tokio::runtime::Runtime::new().unwrap().block_on(async {
///     machine.start_at("off").unwrap();
///     let state = machine.transition("on").await.unwrap();
///     assert_eq!(state.name(), "on");
/// });
/// ```
pub struct Machine {
    name: String,
    states: Vec<State>,
    topology: Box<dyn Topology>,
    current: Option<usize>,
    log: TransitionLog,
}

impl Machine {
    /// Create an empty machine in allow-list mode.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_topology(name, AllowList)
    }

    /// Create an empty machine with an explicit reachability strategy.
    pub fn with_topology(name: impl Into<String>, topology: impl Topology + 'static) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            topology: Box::new(topology),
            current: None,
            log: TransitionLog::new(),
        }
    }

    /// Fluent construction; see [`MachineBuilder`].
    pub fn builder(name: impl Into<String>) -> MachineBuilder {
        MachineBuilder::new(name)
    }

    /// The machine's name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a state.
    ///
    /// Names are not checked for uniqueness; lookups resolve to the first
    /// registered state with a matching name.
    pub fn add_state(&mut self, state: State) {
        tracing::trace!(machine = %self.name, state = %state.name(), "state registered");
        self.states.push(state);
    }

    /// All registered states, in registration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The current state, or `None` before a successful start.
    pub fn state(&self) -> Option<&State> {
        self.current.map(|ix| &self.states[ix])
    }

    /// Trace of committed transitions.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// Start in the first registered state.
    ///
    /// Start is a direct assignment, not a negotiated transition: no
    /// entry guard runs. The entered state's enter hook fires
    /// synchronously before returning; if it fails the assignment is
    /// already committed.
    pub fn start(&mut self) -> Result<&State, StartError> {
        if self.states.is_empty() {
            return Err(StartError::NoStates);
        }
        self.assume(0)
    }

    /// Start in the named state, failing if it is not registered.
    pub fn start_at(&mut self, name: &str) -> Result<&State, StartError> {
        let ix = self.lookup(name).ok_or_else(|| StartError::UnknownState {
            name: name.to_owned(),
        })?;
        self.assume(ix)
    }

    fn assume(&mut self, ix: usize) -> Result<&State, StartError> {
        self.current = Some(ix);
        tracing::debug!(machine = %self.name, state = %self.states[ix].name(), "machine started");

        if let Some(enter) = self.states[ix].enter_hook() {
            enter().map_err(|source| StartError::EnterFailed {
                state: self.states[ix].name().to_owned(),
                source,
            })?;
        }
        Ok(&self.states[ix])
    }

    /// Attempt a transition to the named target state.
    ///
    /// In order: the target is resolved (`UnknownTarget` if absent), the
    /// topology is consulted (`Unreachable` if it refuses; no guard
    /// runs), and the target's entry guard (the single suspension point)
    /// is awaited. Only after the guard accepts does the outgoing exit
    /// hook run, the current state swap, and the new state's enter hook
    /// fire. The swap is atomic relative to the guard outcome: any
    /// failure up to and including the exit hook leaves the current state
    /// unchanged, while an enter-hook failure is reported with the swap
    /// already committed.
    ///
    /// There is no retry. A failed attempt has no persistent effect and
    /// the machine accepts further attempts immediately.
    pub async fn transition(&mut self, target: &str) -> Result<&State, TransitionError> {
        let from_ix = self.current.ok_or(TransitionError::NotStarted)?;
        let to_ix = self
            .lookup(target)
            .ok_or_else(|| TransitionError::UnknownTarget {
                name: target.to_owned(),
            })?;

        let from = self.states[from_ix].name().to_owned();
        let to = self.states[to_ix].name().to_owned();

        if !self
            .topology
            .is_reachable(&self.states[from_ix], &self.states[to_ix])
        {
            tracing::debug!(machine = %self.name, %from, %to, "transition refused by topology");
            return Err(TransitionError::Unreachable { from, to });
        }

        if let Some(guard) = self.states[to_ix].entry_guard() {
            if let Err(source) = guard(&from).await {
                tracing::debug!(machine = %self.name, %from, %to, "entry guard rejected");
                return Err(TransitionError::Rejected { from, to, source });
            }
        }

        if let Some(exit) = self.states[from_ix].exit_hook() {
            exit().map_err(|source| TransitionError::ExitFailed {
                state: from.clone(),
                source,
            })?;
        }

        self.current = Some(to_ix);
        self.log = self.log.record(TransitionRecord::now(&from, &to));
        tracing::debug!(machine = %self.name, %from, %to, "transition committed");

        if let Some(enter) = self.states[to_ix].enter_hook() {
            // The swap stays committed even when the enter hook fails.
            enter().map_err(|source| TransitionError::EnterFailed {
                state: to.clone(),
                source,
            })?;
        }

        Ok(&self.states[to_ix])
    }

    /// Alias for [`transition`](Machine::transition).
    pub async fn transition_to(&mut self, target: &str) -> Result<&State, TransitionError> {
        self.transition(target).await
    }

    fn lookup(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s.name() == name)
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("states", &self.states)
            .field("current", &self.state().map(State::name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;
    use crate::machine::topology::TransitionTable;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn two_state_machine() -> Machine {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("off").allow_from(["on"]));
        machine.add_state(
            State::new("on")
                .allow_from(["off"])
                .on_before_enter(|_prev: &str| async { Ok(()) }),
        );
        machine
    }

    #[test]
    fn start_defaults_to_first_registered_state() {
        let mut machine = two_state_machine();

        assert_eq!(machine.start().unwrap().name(), "off");
        assert_eq!(machine.state().unwrap().name(), "off");
    }

    #[test]
    fn start_with_no_states_fails() {
        let mut machine = Machine::new("empty");

        assert!(matches!(machine.start(), Err(StartError::NoStates)));
        assert!(machine.state().is_none());
    }

    #[test]
    fn start_at_unknown_name_fails_and_stays_unstarted() {
        let mut machine = two_state_machine();

        let err = machine.start_at("standby").unwrap_err();
        assert!(matches!(err, StartError::UnknownState { name } if name == "standby"));
        assert!(machine.state().is_none());
    }

    #[test]
    fn start_runs_enter_hook_without_guard() {
        let entered = Arc::new(AtomicUsize::new(0));
        let hook_entered = Arc::clone(&entered);

        let mut machine = Machine::new("test");
        machine.add_state(
            State::new("off")
                .on_before_enter(|_prev: &str| async { Err("never consulted".into()) })
                .on_enter(move || {
                    hook_entered.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
        );

        // The always-failing guard is irrelevant: start assigns directly.
        assert_eq!(machine.start().unwrap().name(), "off");
        assert_eq!(entered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn start_enter_hook_failure_keeps_assignment() {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("off").on_enter(|| Err("boom".into())));

        let err = machine.start().unwrap_err();
        assert!(matches!(err, StartError::EnterFailed { state, .. } if state == "off"));
        assert_eq!(machine.state().unwrap().name(), "off");
    }

    #[test]
    fn duplicate_names_resolve_to_first_registered() {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("dup").allow_from(["first"]));
        machine.add_state(State::new("dup").allow_from(["second"]));

        machine.start_at("dup").unwrap();
        assert_eq!(machine.state().unwrap().allowed_sources(), ["first"]);
    }

    #[tokio::test]
    async fn transition_swaps_state_and_records() {
        let mut machine = two_state_machine();
        machine.start_at("off").unwrap();

        let state = machine.transition("on").await.unwrap();
        assert_eq!(state.name(), "on");
        assert_eq!(machine.state().unwrap().name(), "on");
        assert_eq!(machine.log().path(), ["off", "on"]);
    }

    #[tokio::test]
    async fn transition_before_start_fails() {
        let mut machine = two_state_machine();

        let err = machine.transition("on").await.unwrap_err();
        assert!(matches!(err, TransitionError::NotStarted));
    }

    #[tokio::test]
    async fn unknown_target_is_reported_before_any_guard() {
        let mut machine = two_state_machine();
        machine.start_at("off").unwrap();

        let err = machine.transition("running").await.unwrap_err();
        assert!(matches!(err, TransitionError::UnknownTarget { name } if name == "running"));
        assert_eq!(machine.state().unwrap().name(), "off");
    }

    #[tokio::test]
    async fn unreachable_target_skips_guard() {
        let guard_calls = Arc::new(AtomicUsize::new(0));
        let calls = Arc::clone(&guard_calls);

        let mut machine = Machine::new("test");
        machine.add_state(State::new("off"));
        machine.add_state(State::new("running").allow_from(["on"]).on_before_enter(
            move |_prev: &str| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            },
        ));
        machine.start_at("off").unwrap();

        let err = machine.transition("running").await.unwrap_err();
        assert!(
            matches!(err, TransitionError::Unreachable { from, to } if from == "off" && to == "running")
        );
        assert_eq!(guard_calls.load(Ordering::SeqCst), 0);
        assert_eq!(machine.state().unwrap().name(), "off");
    }

    #[tokio::test]
    async fn guard_rejection_leaves_state_and_log_untouched() {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("on"));
        machine.add_state(
            State::new("running")
                .on_before_enter(|_prev: &str| async { Err("declined by server".into()) }),
        );
        machine.start_at("on").unwrap();

        let err = machine.transition("running").await.unwrap_err();
        assert!(matches!(err, TransitionError::Rejected { .. }));
        assert_eq!(machine.state().unwrap().name(), "on");
        assert!(machine.log().is_empty());
    }

    #[tokio::test]
    async fn guardless_transition_completes_synchronously() {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("off"));
        machine.add_state(State::new("on").allow_from(["off"]));
        machine.start_at("off").unwrap();

        assert_eq!(machine.transition("on").await.unwrap().name(), "on");
    }

    #[tokio::test]
    async fn exit_hook_failure_aborts_before_swap() {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("off").on_exit(|| Err("stuck door".into())));
        machine.add_state(State::new("on"));
        machine.start_at("off").unwrap();

        let err = machine.transition("on").await.unwrap_err();
        assert!(matches!(err, TransitionError::ExitFailed { state, .. } if state == "off"));
        assert_eq!(machine.state().unwrap().name(), "off");
        assert!(machine.log().is_empty());
    }

    #[tokio::test]
    async fn enter_hook_failure_keeps_committed_swap() {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("off"));
        machine.add_state(State::new("on").on_enter(|| Err("bulb burnt out".into())));
        machine.start_at("off").unwrap();

        let err = machine.transition("on").await.unwrap_err();
        assert!(matches!(err, TransitionError::EnterFailed { state, .. } if state == "on"));
        assert_eq!(machine.state().unwrap().name(), "on");
        assert_eq!(machine.log().path(), ["off", "on"]);
    }

    #[tokio::test]
    async fn table_mode_uses_declared_transitions() {
        let table = TransitionTable::new(vec![Transition::new("off", "on")]);
        let mut machine = Machine::with_topology("test", table);
        machine.add_state(State::new("off").allow_from(["nobody"]));
        machine.add_state(State::new("on"));
        machine.start_at("off").unwrap();

        // Allow-lists are ignored in table mode; the declared entry rules.
        assert_eq!(machine.transition("on").await.unwrap().name(), "on");

        let err = machine.transition("off").await.unwrap_err();
        assert!(matches!(err, TransitionError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn transition_to_is_an_alias() {
        let mut machine = two_state_machine();
        machine.start_at("off").unwrap();

        assert_eq!(machine.transition_to("on").await.unwrap().name(), "on");
    }

    #[tokio::test]
    async fn failed_attempts_are_idempotent() {
        let mut machine = Machine::new("test");
        machine.add_state(State::new("off"));
        machine.add_state(
            State::new("on")
                .allow_from(["off"])
                .on_before_enter(|_prev: &str| async { Err("no".into()) }),
        );
        machine.start_at("off").unwrap();

        for _ in 0..3 {
            assert!(machine.transition("on").await.is_err());
            assert_eq!(machine.state().unwrap().name(), "off");
        }
        assert!(machine.log().is_empty());
    }
}
