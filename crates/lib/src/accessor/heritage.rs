//! Parent chain navigation.
//!
//! A `Heritage` describes where an accessor's parent comes from, and
//! resolving one is the entire job of the chain navigator. Resolution is
//! lazy (only when a local lookup misses) and never cached: a relation that
//! is unset today can be set tomorrow, and the next access must see it.

use std::sync::Arc;

use crate::accessor::Accessor;
use crate::owner::Owner;

/// The configured source of an accessor's parent.
#[derive(Clone, Default)]
pub enum Heritage {
    /// No parent; the chain terminates here. The global root uses this.
    #[default]
    None,
    /// A fixed parent accessor, shared by every owner configured with it.
    /// Used when the parent is a root scope rather than another entity.
    Fixed(Arc<Accessor>),
    /// Ask the owner for `relation`, then ask that entity for its accessor
    /// named `accessor`. Composing these per level yields multi-hop chains
    /// such as store → client → industry → global.
    Relation { relation: String, accessor: String },
}

impl Heritage {
    /// Constructs a relation-based heritage descriptor.
    pub fn relation(relation: impl Into<String>, accessor: impl Into<String>) -> Self {
        Heritage::Relation {
            relation: relation.into(),
            accessor: accessor.into(),
        }
    }

    /// Resolves the parent accessor for `owner`, if there is one right now.
    ///
    /// `None` covers both "no parent configured" and the transient case of
    /// an unset relation; the distinction is invisible to resolution and
    /// deliberately not cached.
    pub(crate) fn resolve(&self, owner: Option<&Arc<dyn Owner>>) -> Option<Arc<Accessor>> {
        match self {
            Heritage::None => None,
            Heritage::Fixed(parent) => Some(parent.clone()),
            Heritage::Relation { relation, accessor } => {
                let related = owner?.relation(relation)?;
                related.accessor(accessor)
            }
        }
    }
}
