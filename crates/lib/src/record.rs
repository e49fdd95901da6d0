//!
//! Defines the persisted row shape (`AttributeRecord`) and the scope that
//! keys it (`Scope`).
//!
//! A record is one stored key/value entry: the serialized value pair from
//! the codec plus the name it is filed under and the scope that owns it.
//! Scopes mirror the two nullable discriminator columns a host schema uses
//! (`owner_id`, `owner_type`): both null for the global root, both set for
//! an entity-owned record. That pairing rule is enforced structurally by
//! the [`Scope`] enum and checked again when rows are deserialized from a
//! host that stores the columns independently.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ownership scope of an attribute record.
///
/// `Global` is the root of every chain; `Owned` ties a record to one entity
/// via an opaque identifier and a kind discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScopeColumns", into = "ScopeColumns")]
pub enum Scope {
    /// The global root scope, stored with both discriminator columns null.
    Global,
    /// A record set owned by one entity.
    Owned {
        /// Opaque entity identifier
        id: String,
        /// Entity kind discriminator
        kind: String,
    },
}

impl Scope {
    /// Constructs an owned scope from an entity's identifier and kind.
    pub fn owned(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Scope::Owned {
            id: id.into(),
            kind: kind.into(),
        }
    }

    /// Returns true for the global root scope
    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Owned { id, kind } => write!(f, "{kind}:{id}"),
        }
    }
}

/// The nullable column pair a host schema stores a scope as.
#[derive(Serialize, Deserialize)]
struct ScopeColumns {
    owner_id: Option<String>,
    owner_type: Option<String>,
}

impl TryFrom<ScopeColumns> for Scope {
    type Error = String;

    fn try_from(columns: ScopeColumns) -> Result<Self, Self::Error> {
        match (columns.owner_id, columns.owner_type) {
            (None, None) => Ok(Scope::Global),
            (Some(id), Some(kind)) => Ok(Scope::Owned { id, kind }),
            _ => Err("owner_id and owner_type must be null together or set together".to_string()),
        }
    }
}

impl From<Scope> for ScopeColumns {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Global => ScopeColumns {
                owner_id: None,
                owner_type: None,
            },
            Scope::Owned { id, kind } => ScopeColumns {
                owner_id: Some(id),
                owner_type: Some(kind),
            },
        }
    }
}

/// One stored attribute entry.
///
/// At most one record exists per name per scope; the backing store upholds
/// that by treating `(scope, name)` as the record's logical key. A record is
/// created on the first write of a name at its scope, updated in place on
/// later writes, and deleted when the value is explicitly set to null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    /// Backend-assigned primary key
    pub id: Uuid,
    /// Owning scope, stored as the `owner_id`/`owner_type` column pair
    #[serde(flatten)]
    pub scope: Scope,
    /// Attribute name, unique within the scope
    pub name: String,
    /// Serialized value text, null only together with `value_type`
    pub raw_value: Option<String>,
    /// Codec type tag, null only together with `raw_value`
    pub value_type: Option<String>,
}
