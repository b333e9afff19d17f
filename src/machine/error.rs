//! Errors raised by machine start and transition operations.

use crate::core::BoxError;
use thiserror::Error;

/// Errors that can occur when starting a machine.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("cannot start: no states registered")]
    NoStates,

    #[error("cannot start at '{name}': no such state")]
    UnknownState { name: String },

    #[error("enter hook of '{state}' failed during start")]
    EnterFailed {
        state: String,
        #[source]
        source: BoxError,
    },
}

/// Errors that can occur during a transition attempt.
///
/// Every variant leaves the machine usable. Only
/// [`TransitionError::EnterFailed`] is reported after the state swap has
/// already been committed; everything else leaves the current state
/// exactly as it was.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("machine has not been started")]
    NotStarted,

    #[error("unknown target state '{name}'")]
    UnknownTarget { name: String },

    #[error("no transition from '{from}' to '{to}'")]
    Unreachable { from: String, to: String },

    #[error("transition from '{from}' to '{to}' was rejected")]
    Rejected {
        from: String,
        to: String,
        #[source]
        source: BoxError,
    },

    #[error("exit hook of '{state}' failed")]
    ExitFailed {
        state: String,
        #[source]
        source: BoxError,
    },

    #[error("enter hook of '{state}' failed")]
    EnterFailed {
        state: String,
        #[source]
        source: BoxError,
    },
}
