//! The stateful half of the crate: reachability strategies, error
//! taxonomy, and the [`Machine`] that executes the transition protocol.

mod error;
#[allow(clippy::module_inception)]
mod machine;
mod topology;

pub use error::{StartError, TransitionError};
pub use machine::Machine;
pub use topology::{AllowList, Topology, TransitionTable};
