//! Error types for typed value encoding and decoding.
//!
//! These errors surface at the storage boundary: a stored `(raw_value,
//! value_type)` pair that cannot be decoded, or a caller handing the codec a
//! dynamic value it has no mapping for.

use thiserror::Error;

/// Errors produced by the typed value codec.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValueError {
    /// A stored raw value could not be decoded under its recorded type tag.
    #[error("malformed '{value_type}' value '{raw}': {reason}")]
    Malformed {
        value_type: String,
        raw: String,
        reason: String,
    },

    /// The caller attempted to store a dynamic value with no codec mapping.
    #[error("no codec mapping for value of kind '{kind}'")]
    UnsupportedKind { kind: String },

    /// A typed extraction found a value of a different kind than requested.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl ValueError {
    /// Check if this error indicates undecodable stored data
    pub fn is_malformed(&self) -> bool {
        matches!(self, ValueError::Malformed { .. })
    }

    /// Check if this error indicates an unmappable dynamic value
    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self, ValueError::UnsupportedKind { .. })
    }

    /// Check if this error is a typed extraction mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ValueError::TypeMismatch { .. })
    }

    /// Get the type tag involved, if this error carries one
    pub fn value_type(&self) -> Option<&str> {
        match self {
            ValueError::Malformed { value_type, .. } => Some(value_type),
            _ => None,
        }
    }
}

// Conversion from ValueError to the main Error type
impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
