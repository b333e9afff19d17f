//! Build errors for machine construction.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("state names must be non-empty")]
    EmptyStateName,
}
