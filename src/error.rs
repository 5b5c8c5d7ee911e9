// src/error.rs
//! Unified error handling
//!
//! Gateway failures stay typed at the device boundary; this module
//! folds them, plus configuration-file failures, into the one error
//! the crate surface exposes.

use crate::config::loader::ConfigFileError;
use crate::device::types::GatewayError;

/// Crate-level error type.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),
}

/// Result type alias for client operations.
pub type ScopeResult<T> = Result<T, ScopeError>;

impl ScopeError {
    /// Whether this failure came from the device boundary (as opposed
    /// to local configuration).
    pub fn is_device_failure(&self) -> bool {
        matches!(self, ScopeError::Gateway(_))
    }
}
