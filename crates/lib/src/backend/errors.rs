//! Error types for backing record stores.
//!
//! This module defines the errors a `RecordStore` implementation may
//! surface. The engine adds no retry logic of its own: a store failure is
//! propagated to the caller unchanged, and transient failures are the
//! host's responsibility to retry if desired.

use thiserror::Error;

use crate::record::Scope;

/// Errors produced by a backing record store.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backing store could not serve the request at all.
    #[error("record store unavailable: {reason}")]
    Unavailable { reason: String },

    /// An update or delete referenced a record that no longer exists.
    #[error("record '{name}' not found in scope '{scope}'")]
    RecordNotFound { scope: Scope, name: String },
}

impl BackendError {
    /// Check if this error indicates the store could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, BackendError::Unavailable { .. })
    }

    /// Check if this error indicates a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::RecordNotFound { .. })
    }
}

// Conversion from BackendError to the main Error type
impl From<BackendError> for crate::Error {
    fn from(err: BackendError) -> Self {
        crate::Error::Backend(err)
    }
}
