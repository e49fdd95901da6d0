//! Backing record stores for attribute persistence.
//!
//! This module provides the `RecordStore` trait and the bundled in-memory
//! implementation. The trait is the persistence capability the engine
//! consumes from its host: a keyed CRUD surface over attribute rows,
//! scoped by owner. Everything above it (the store adapter, the resolution
//! accessor) is independent of how rows are actually persisted.

use crate::Result;
use crate::record::{AttributeRecord, Scope};

mod errors;
pub use errors::BackendError;

mod in_memory;
pub use in_memory::InMemory;

/// Storage trait abstracting the persistence mechanism for attribute records.
///
/// Implementations handle the specifics of how rows are persisted (in
/// memory, in a relational table, behind an RPC boundary). The engine only
/// requires exact-match lookup by `(scope, name)` and per-scope enumeration;
/// it never scans across scopes.
///
/// All implementations must be `Send` and `Sync` so one store can back many
/// accessors across threads. Within one scope, `name` identifies at most one
/// record; implementations that cannot get that guarantee from their backing
/// store must enforce it themselves with an atomic put on the write path.
pub trait RecordStore: Send + Sync {
    /// Finds the record filed under `name` in `scope`, if any.
    ///
    /// The match is exact and case-sensitive.
    ///
    /// # Returns
    /// A `Result` containing the record if one exists, or `None`. An absent
    /// record is not an error.
    fn find_one(&self, scope: &Scope, name: &str) -> Result<Option<AttributeRecord>>;

    /// Retrieves every record in `scope`, in no significant order.
    fn find_all(&self, scope: &Scope) -> Result<Vec<AttributeRecord>>;

    /// Creates a record for `name` in `scope` and returns the stored row.
    ///
    /// If a record already exists under `(scope, name)`, the implementation
    /// must replace it rather than produce a duplicate, upholding the
    /// per-scope uniqueness invariant.
    fn create(
        &self,
        scope: &Scope,
        name: &str,
        raw_value: Option<String>,
        value_type: Option<String>,
    ) -> Result<AttributeRecord>;

    /// Rewrites the value columns of an existing record in place.
    ///
    /// # Returns
    /// The updated row, or `BackendError::RecordNotFound` if the record has
    /// vanished since it was read.
    fn update(
        &self,
        record: &AttributeRecord,
        raw_value: Option<String>,
        value_type: Option<String>,
    ) -> Result<AttributeRecord>;

    /// Deletes a record. Succeeds even if the record is already gone.
    fn delete(&self, record: &AttributeRecord) -> Result<()>;
}
