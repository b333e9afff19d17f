//! Stategate: a finite state machine runtime with asynchronously
//! validated transitions.
//!
//! Stategate models devices and protocols whose state changes must be
//! confirmed by an external authority, such as a server call or a
//! hardware check, before the in-memory state is updated. Each state may carry an
//! asynchronous entry guard; a transition only commits once that guard
//! resolves successfully, and a rejected guard leaves the machine exactly
//! where it was.
//!
//! # Core concepts
//!
//! - **[`State`]**: a named node with an optional source allow-list, an
//!   optional async entry guard, and optional enter/exit hooks
//! - **[`Machine`]**: the registry and the transition protocol;
//!   [`Machine::transition`] is the single suspension point
//! - **[`Topology`]**: reachability strategy, either per-state
//!   allow-lists (the default) or an explicit [`TransitionTable`]
//! - **[`TransitionLog`]**: in-memory trace of committed transitions
//!
//! # Example
//!
//! ```rust
//! use stategate::{Machine, State};
//!
//! async fn confirm_with_server(state: &'static str) -> Result<(), stategate::BoxError> {
//!     // A real guard would issue a network call here.
//!     println!("server approved '{state}'");
//!     Ok(())
//! }
//!
//! let mut machine = Machine::new("microwave");
//! machine.add_state(State::new("off").allow_from(["on", "running"]));
//! machine.add_state(
//!     State::new("on")
//!         .allow_from(["off"])
//!         .on_before_enter(|_prev: &str| confirm_with_server("on")),
//! );
//!
//! tokio::runtime::Runtime::new().unwrap().block_on(async {
//!     machine.start_at("off").unwrap();
//!
//!     let state = machine.transition("on").await.unwrap();
//!     assert_eq!(state.name(), "on");
//!
//!     // "running" was never registered; the machine stays put.
//!     assert!(machine.transition("running").await.is_err());
//!     assert_eq!(machine.state().unwrap().name(), "on");
//! });
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::core::{
    BoxError, Condition, EnterGuard, Hook, State, Transition, TransitionLog, TransitionRecord,
};
pub use crate::machine::{
    AllowList, Machine, StartError, Topology, TransitionError, TransitionTable,
};
