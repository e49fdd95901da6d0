//! Error types for the per-scope attribute store adapter.

use thiserror::Error;

/// Errors produced by the attribute store adapter.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The attribute name fails validation before reaching the backend.
    #[error("invalid attribute name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl StoreError {
    /// Check if this error is a name validation failure
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, StoreError::InvalidName { .. })
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
