//! Per-scope attribute storage.
//!
//! `AttributeSet` is the adapter between one owner's scope and the backing
//! record store: a dumb CRUD facade with no knowledge of chains or value
//! types. It is the only component that touches the persistence mechanism;
//! the resolution accessor sits on top of it and never owns records itself.

use std::sync::Arc;

use crate::Result;
use crate::backend::RecordStore;
use crate::constants::MAX_NAME_LEN;
use crate::record::{AttributeRecord, Scope};

mod errors;
pub use errors::StoreError;

/// The record collection scoped to one owner (or the global root).
///
/// All operations are exact-match on the attribute name, case-sensitive,
/// and confined to this set's scope. Names are validated here, before any
/// backend call, so no implementation ever sees an empty or oversized name.
#[derive(Clone)]
pub struct AttributeSet {
    scope: Scope,
    backend: Arc<dyn RecordStore>,
}

impl AttributeSet {
    /// Creates an attribute set over `scope`, backed by `backend`.
    pub fn new(scope: Scope, backend: Arc<dyn RecordStore>) -> Self {
        Self { scope, backend }
    }

    /// Returns the scope this set is confined to.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Finds the record for `name`, if one exists in this scope.
    pub fn find(&self, name: impl AsRef<str>) -> Result<Option<AttributeRecord>> {
        let name = validate_name(name.as_ref())?;
        self.backend.find_one(&self.scope, name)
    }

    /// Creates a record for `name` with the given value columns.
    pub fn create(
        &self,
        name: impl AsRef<str>,
        raw_value: Option<String>,
        value_type: Option<String>,
    ) -> Result<AttributeRecord> {
        let name = validate_name(name.as_ref())?;
        self.backend.create(&self.scope, name, raw_value, value_type)
    }

    /// Rewrites an existing record's value columns in place.
    pub fn update(
        &self,
        record: &AttributeRecord,
        raw_value: Option<String>,
        value_type: Option<String>,
    ) -> Result<AttributeRecord> {
        self.backend.update(record, raw_value, value_type)
    }

    /// Writes `name` as a single put: update in place when a record exists,
    /// create otherwise. Either way at most one record holds `name` in this
    /// scope afterwards.
    pub fn put(
        &self,
        name: impl AsRef<str>,
        raw_value: Option<String>,
        value_type: Option<String>,
    ) -> Result<AttributeRecord> {
        let name = validate_name(name.as_ref())?;
        match self.backend.find_one(&self.scope, name)? {
            Some(record) => self.backend.update(&record, raw_value, value_type),
            None => self.backend.create(&self.scope, name, raw_value, value_type),
        }
    }

    /// Deletes the record for `name` if one exists.
    ///
    /// # Returns
    /// `true` if a record existed and was deleted, `false` if there was
    /// nothing to delete.
    pub fn remove(&self, name: impl AsRef<str>) -> Result<bool> {
        let name = validate_name(name.as_ref())?;
        match self.backend.find_one(&self.scope, name)? {
            Some(record) => {
                self.backend.delete(&record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Retrieves every record in this scope, in no significant order.
    pub fn all(&self) -> Result<Vec<AttributeRecord>> {
        self.backend.find_all(&self.scope)
    }
}

/// Checks an attribute name against the schema bounds.
fn validate_name(name: &str) -> std::result::Result<&str, StoreError> {
    if name.is_empty() {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: "name must not be empty".to_string(),
        });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: format!("name exceeds {MAX_NAME_LEN} bytes"),
        });
    }
    Ok(name)
}
