//!
//! Heredity: typed attributes shared down an entity hierarchy.
//!
//! A hierarchy of entities (a global scope → industry → client → store, for
//! example) shares configuration-like attributes: each level may override an
//! ancestor's value and falls back to the ancestor's value when it has none
//! of its own. This library provides the resolution engine only; persisting
//! entities and declaring their relationships stays with the host.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: The dynamically typed datum an attribute
//!   holds — text, arbitrary-precision integers, floats, booleans, symbols,
//!   and three calendar kinds — plus the codec that moves it through the
//!   stored `(raw_value, value_type)` string pair.
//! * **Records (`record::AttributeRecord`)**: One stored entry, keyed by
//!   name within a `record::Scope` (an owning entity, or the global root).
//! * **Record stores (`backend::RecordStore`)**: A pluggable persistence
//!   layer for records. An in-memory implementation is bundled.
//! * **Attribute sets (`store::AttributeSet`)**: The per-scope CRUD facade
//!   over a record store.
//! * **Accessors (`accessor::Accessor`)**: The per-owner resolution engine:
//!   local reads and writes, parent-chain fallback, and whole-chain
//!   aggregation with closest-owner-wins precedence.
//! * **Heritage (`accessor::Heritage`)**: Where an accessor's parent comes
//!   from — nothing, a fixed root, or a relation traversed on the owner.
//! * **Owners (`owner::Owner`)**: The host-implemented graph capability
//!   accessors navigate when resolving a chain.
//!
//! ```
//! use std::sync::Arc;
//! use heredity::{Accessor, InMemory, Value};
//!
//! # fn main() -> heredity::Result<()> {
//! let backend = Arc::new(InMemory::new());
//! let global = Accessor::global(backend);
//! global.set("title", "Title")?;
//! assert_eq!(global.get("title")?, Some(Value::Text("Title".into())));
//! assert_eq!(global.get("unset")?, None);
//! # Ok(())
//! # }
//! ```

pub mod accessor;
pub mod backend;
pub mod constants;
pub mod owner;
pub mod record;
pub mod store;
pub mod value;

/// Re-exports for the common path: building accessors over the bundled
/// in-memory store.
pub use accessor::{Accessor, Heritage, Key};
pub use backend::{InMemory, RecordStore};
pub use owner::{AccessorCell, Owner};
pub use record::{AttributeRecord, Scope};
pub use store::AttributeSet;
pub use value::Value;

/// Result type used throughout the Heredity library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Heredity library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured codec errors from the value module
    #[error(transparent)]
    Value(value::ValueError),

    /// Structured adapter errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured persistence errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Value(_) => "value",
            Error::Store(_) => "store",
            Error::Backend(_) => "backend",
        }
    }

    /// Check if this error is a stored value that failed to decode.
    pub fn is_malformed_value(&self) -> bool {
        match self {
            Error::Value(err) => err.is_malformed(),
            _ => false,
        }
    }

    /// Check if this error is a dynamic value with no codec mapping.
    pub fn is_unsupported_kind(&self) -> bool {
        match self {
            Error::Value(err) => err.is_unsupported_kind(),
            _ => false,
        }
    }

    /// Check if this error is a typed extraction mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            Error::Value(err) => err.is_type_mismatch(),
            _ => false,
        }
    }

    /// Check if this error is an attribute name validation failure.
    pub fn is_invalid_name(&self) -> bool {
        match self {
            Error::Store(err) => err.is_invalid_name(),
            _ => false,
        }
    }

    /// Check if this error indicates the backing store was unreachable.
    pub fn is_store_unavailable(&self) -> bool {
        match self {
            Error::Backend(err) => err.is_unavailable(),
            _ => false,
        }
    }

    /// Check if this error indicates a record vanished mid-operation.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Backend(err) => err.is_not_found(),
            _ => false,
        }
    }
}
