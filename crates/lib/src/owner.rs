//! The owner graph capability consumed from the host domain model.
//!
//! An owner is the entity an attribute set is scoped to. The engine never
//! creates or persists owners; it only asks them two things: follow a named
//! relation to another owner, and hand back one of their named accessors.
//! Both can legitimately answer "nothing here" — a relation that is not set
//! yet is a transient absence, re-resolved on every access.

use std::sync::{Arc, OnceLock};

use crate::accessor::Accessor;
use crate::record::Scope;

/// An entity that owns attribute sets and can sit in a resolution chain.
///
/// Implemented by the host's domain objects. All methods are cheap
/// identity/graph lookups; the engine calls them on every chain walk and
/// performs no caching of its own around them.
pub trait Owner: Send + Sync {
    /// Opaque identifier of this owner, stored in the `owner_id` column.
    fn owner_id(&self) -> String;

    /// Kind discriminator of this owner, stored in the `owner_type` column.
    fn owner_kind(&self) -> &str;

    /// Follows a named relation to another owner.
    ///
    /// Returns `None` when the relation is unset. That absence is transient:
    /// the relation can be set later in the owner's lifetime, so callers
    /// must not cache it as permanently absent.
    fn relation(&self, name: &str) -> Option<Arc<dyn Owner>>;

    /// Returns one of this owner's named accessors (its attribute families).
    fn accessor(&self, name: &str) -> Option<Arc<Accessor>>;

    /// The storage scope for this owner's records.
    fn scope(&self) -> Scope {
        Scope::owned(self.owner_id(), self.owner_kind())
    }
}

/// Lazily initialized per-owner accessor slot.
///
/// Hosts embed one `AccessorCell` per attribute family in each owner. The
/// accessor is built on first access and reused for the rest of the owner's
/// lifetime; it is never shared across owners and never persisted. This is
/// the per-owner owned field replacing ambient global memoization.
#[derive(Default)]
pub struct AccessorCell {
    cell: OnceLock<Arc<Accessor>>,
}

impl AccessorCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the cached accessor, building it on first access.
    pub fn get_or_init(&self, init: impl FnOnce() -> Accessor) -> Arc<Accessor> {
        self.cell.get_or_init(|| Arc::new(init())).clone()
    }

    /// Returns the cached accessor if it has been built.
    pub fn get(&self) -> Option<Arc<Accessor>> {
        self.cell.get().cloned()
    }
}
