use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;
use crate::backend::{BackendError, RecordStore};
use crate::record::{AttributeRecord, Scope};

/// A simple in-memory record store backed by a `HashMap`.
///
/// This store is suitable for testing, development, or scenarios where
/// data persistence is not strictly required or is handled externally
/// (e.g. by saving/loading the entire state to/from a file).
///
/// Records are keyed by scope and then by name, so the per-scope name
/// uniqueness invariant holds structurally: a second create for the same
/// name replaces the first instead of producing a duplicate row.
///
/// It provides basic persistence capabilities via `save_to_file` and
/// `load_from_file`, serializing the record set to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    /// Record storage with a read-write lock for concurrent access
    records: RwLock<HashMap<Scope, HashMap<String, AttributeRecord>>>,
}

/// Flat on-disk form; JSON object keys must be strings, so the nested
/// scope-keyed maps are rebuilt on load instead of serialized directly.
#[derive(Serialize, Deserialize)]
struct SerializedRecords {
    records: Vec<AttributeRecord>,
}

impl InMemory {
    /// Creates a new, empty in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves the full record set to a JSON file.
    ///
    /// # Errors
    /// Returns an error if the store lock is poisoned, serialization fails,
    /// or the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let records = self.read_lock()?;
        let flat = SerializedRecords {
            records: records
                .values()
                .flat_map(|by_name| by_name.values().cloned())
                .collect(),
        };
        let json = serde_json::to_string_pretty(&flat)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a record store previously written by `save_to_file`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not contain a
    /// valid serialized record set.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let flat: SerializedRecords = serde_json::from_str(&json)?;

        let mut records: HashMap<Scope, HashMap<String, AttributeRecord>> = HashMap::new();
        for record in flat.records {
            records
                .entry(record.scope.clone())
                .or_default()
                .insert(record.name.clone(), record);
        }
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    fn read_lock(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Scope, HashMap<String, AttributeRecord>>>>
    {
        self.records.read().map_err(|_| {
            BackendError::Unavailable {
                reason: "record store lock poisoned".to_string(),
            }
            .into()
        })
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Scope, HashMap<String, AttributeRecord>>>>
    {
        self.records.write().map_err(|_| {
            BackendError::Unavailable {
                reason: "record store lock poisoned".to_string(),
            }
            .into()
        })
    }
}

impl RecordStore for InMemory {
    fn find_one(&self, scope: &Scope, name: &str) -> Result<Option<AttributeRecord>> {
        let records = self.read_lock()?;
        Ok(records
            .get(scope)
            .and_then(|by_name| by_name.get(name))
            .cloned())
    }

    fn find_all(&self, scope: &Scope) -> Result<Vec<AttributeRecord>> {
        let records = self.read_lock()?;
        Ok(records
            .get(scope)
            .map(|by_name| by_name.values().cloned().collect())
            .unwrap_or_default())
    }

    fn create(
        &self,
        scope: &Scope,
        name: &str,
        raw_value: Option<String>,
        value_type: Option<String>,
    ) -> Result<AttributeRecord> {
        let record = AttributeRecord {
            id: Uuid::new_v4(),
            scope: scope.clone(),
            name: name.to_string(),
            raw_value,
            value_type,
        };
        let mut records = self.write_lock()?;
        // Keyed insert replaces any existing row for this name, keeping
        // the per-scope uniqueness invariant under concurrent creates.
        records
            .entry(scope.clone())
            .or_default()
            .insert(name.to_string(), record.clone());
        Ok(record)
    }

    fn update(
        &self,
        record: &AttributeRecord,
        raw_value: Option<String>,
        value_type: Option<String>,
    ) -> Result<AttributeRecord> {
        let mut records = self.write_lock()?;
        let stored = records
            .get_mut(&record.scope)
            .and_then(|by_name| by_name.get_mut(&record.name))
            .ok_or_else(|| BackendError::RecordNotFound {
                scope: record.scope.clone(),
                name: record.name.clone(),
            })?;
        stored.raw_value = raw_value;
        stored.value_type = value_type;
        Ok(stored.clone())
    }

    fn delete(&self, record: &AttributeRecord) -> Result<()> {
        let mut records = self.write_lock()?;
        if let Some(by_name) = records.get_mut(&record.scope) {
            by_name.remove(&record.name);
            if by_name.is_empty() {
                records.remove(&record.scope);
            }
        }
        Ok(())
    }
}
