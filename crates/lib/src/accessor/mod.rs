//! Attribute resolution with chain fallback.
//!
//! An `Accessor` binds one owner (or the global root) to one attribute
//! family and answers reads and writes for it. Reads that miss locally walk
//! the parent chain; writes are always local, so overriding an inherited
//! value never disturbs the ancestor that provided it, and deleting the
//! override restores the inherited view.
//!
//! Accessors are ephemeral: constructed per owner, cached on the owner for
//! its in-memory lifetime (see [`crate::owner::AccessorCell`]), never
//! persisted, and never shared across owners.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::Result;
use crate::backend::RecordStore;
use crate::owner::Owner;
use crate::record::Scope;
use crate::store::AttributeSet;
use crate::value::{Value, ValueError};

mod heritage;
pub use heritage::Heritage;

mod key;
pub use key::Key;

/// Per-owner attribute accessor with chain fallback.
///
/// Construction binds the accessor to exactly one scope. The parent is not
/// resolved until a lookup actually misses, and is re-resolved on every
/// miss; a chain reconfigured mid-lifetime (a relation set later) is picked
/// up on the next access.
///
/// ```
/// use std::sync::Arc;
/// use heredity::{Accessor, InMemory, Value};
///
/// # fn main() -> heredity::Result<()> {
/// let backend = Arc::new(InMemory::new());
/// let global = Accessor::global(backend);
/// global.set("title", "Title")?;
/// assert_eq!(global.get("title")?, Some(Value::Text("Title".into())));
/// # Ok(())
/// # }
/// ```
pub struct Accessor {
    owner: Option<Arc<dyn Owner>>,
    store: AttributeSet,
    heritage: Heritage,
}

impl Accessor {
    /// Creates the accessor for the global root scope.
    ///
    /// This is the single process-wide root of every chain. Hosts construct
    /// it once at startup and hand it by reference (via `Heritage::Fixed`)
    /// to the entities that inherit from it.
    pub fn global(backend: Arc<dyn RecordStore>) -> Self {
        Self {
            owner: None,
            store: AttributeSet::new(Scope::Global, backend),
            heritage: Heritage::None,
        }
    }

    /// Creates the accessor for one owner's scope with the given heritage.
    pub fn for_owner(
        owner: Arc<dyn Owner>,
        backend: Arc<dyn RecordStore>,
        heritage: Heritage,
    ) -> Self {
        let store = AttributeSet::new(owner.scope(), backend);
        Self::new(Some(owner), store, heritage)
    }

    /// Creates an accessor from its parts. Most hosts want [`Accessor::global`]
    /// or [`Accessor::for_owner`] instead; this is the full-control form for
    /// a store that is not derived from the owner's own scope.
    pub fn new(owner: Option<Arc<dyn Owner>>, store: AttributeSet, heritage: Heritage) -> Self {
        Self {
            owner,
            store,
            heritage,
        }
    }

    /// Returns the attribute set this accessor reads and writes.
    pub fn store(&self) -> &AttributeSet {
        &self.store
    }

    /// Returns the configured heritage descriptor.
    pub fn heritage(&self) -> &Heritage {
        &self.heritage
    }

    /// Reads `name`, falling back to the parent chain on a local miss.
    ///
    /// Returns `None` when the name is not set anywhere in the chain; that
    /// is an ordinary answer, not an error. An explicitly cleared attribute
    /// is represented by record absence, so clearing an override makes the
    /// ancestor's value visible again through this same path.
    ///
    /// # Errors
    /// Decoding failures surface as [`ValueError::Malformed`]; backend
    /// failures are propagated unchanged.
    pub fn get(&self, name: impl AsRef<str>) -> Result<Option<Value>> {
        let name = name.as_ref();
        if let Some(record) = self.store.find(name)? {
            let value = Value::decode(record.raw_value.as_deref(), record.value_type.as_deref())?;
            // A row with null content is indistinguishable from absence.
            // The write path never leaves one behind, but a host schema
            // permits it, so it falls through like a miss.
            if !value.is_null() {
                trace!(name, scope = %self.store.scope(), "attribute resolved locally");
                return Ok(Some(value));
            }
        }
        match self.parent() {
            Some(parent) => {
                trace!(name, scope = %self.store.scope(), "attribute missing, asking parent");
                parent.get(name)
            }
            None => Ok(None),
        }
    }

    /// Writes `name` locally.
    ///
    /// A null value deletes the local record if one exists: subsequent reads
    /// fall back to the parent again, so deleting an override un-overrides
    /// rather than removing the attribute from the whole chain. Writes never
    /// touch any ancestor's records.
    pub fn set(&self, name: impl AsRef<str>, value: impl Into<Value>) -> Result<()> {
        let name = name.as_ref();
        let value = value.into();
        if value.is_null() {
            if self.store.remove(name)? {
                debug!(name, scope = %self.store.scope(), "attribute override cleared");
            }
            return Ok(());
        }
        let (raw_value, value_type) = value.encode();
        self.store
            .put(name, raw_value, value_type.map(String::from))?;
        debug!(name, scope = %self.store.scope(), value_type, "attribute written");
        Ok(())
    }

    /// Clears the local record for `name`, restoring inherited visibility.
    ///
    /// Equivalent to `set(name, Value::Null)`.
    pub fn unset(&self, name: impl AsRef<str>) -> Result<()> {
        self.set(name, Value::Null)
    }

    /// Aggregates attributes across the chain with override semantics.
    ///
    /// The local mapping is built first; with `include_inherited` the walk
    /// continues outward to the root, merging each ancestor's local-only
    /// mapping without overwriting names already present. Only the closest
    /// defining level's value is ever visible for a name. With
    /// `include_inherited` false the result is exactly the local records.
    ///
    /// Cost is O(depth × attributes per level) per call; nothing is cached
    /// across calls, and a chain mutated mid-walk can mix pre- and
    /// post-mutation state from different levels.
    pub fn all(&self, include_inherited: bool) -> Result<BTreeMap<String, Value>> {
        let mut values = BTreeMap::new();
        self.collect_local(&mut values)?;
        if include_inherited {
            let mut level = self.parent();
            while let Some(ancestor) = level {
                ancestor.collect_local(&mut values)?;
                level = ancestor.parent();
            }
        }
        Ok(values)
    }

    /// Boolean coercion of `get`: an absent attribute is false, and a
    /// present one follows [`Value::is_truthy`].
    pub fn truthy(&self, name: impl AsRef<str>) -> Result<bool> {
        Ok(self.get(name)?.is_some_and(|v| v.is_truthy()))
    }

    /// Typed read through a declared [`Key`].
    ///
    /// # Errors
    /// Returns [`ValueError::TypeMismatch`] when the resolved value is of a
    /// different kind than the key declares.
    pub fn get_as<T>(&self, key: &Key<T>) -> Result<Option<T>>
    where
        T: for<'v> TryFrom<&'v Value, Error = ValueError>,
    {
        match self.get(key.name())? {
            Some(value) => Ok(Some(T::try_from(&value)?)),
            None => Ok(None),
        }
    }

    /// Typed write through a declared [`Key`].
    pub fn set_as<T>(&self, key: &Key<T>, value: T) -> Result<()>
    where
        T: Into<Value>,
    {
        self.set(key.name(), value)
    }

    /// Decodes this scope's own records into `into`, skipping names already
    /// present so closer levels always win.
    fn collect_local(&self, into: &mut BTreeMap<String, Value>) -> Result<()> {
        for record in self.store.all()? {
            if into.contains_key(&record.name) {
                continue;
            }
            let value = Value::decode(record.raw_value.as_deref(), record.value_type.as_deref())?;
            // Null-content rows are absence, here as in `get`.
            if value.is_null() {
                continue;
            }
            into.insert(record.name, value);
        }
        Ok(())
    }

    /// Resolves the parent accessor for this access, if any.
    fn parent(&self) -> Option<Arc<Accessor>> {
        self.heritage.resolve(self.owner.as_ref())
    }
}
