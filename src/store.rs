//! Main Store struct tying the record table and its notifiers together.

use crate::error::Result;
use crate::subscriptions::Notifier;
use crate::types::{Database, Record};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Store configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name used in log fields and notifier labels.
    pub name: String,

    /// Pre-allocated slots in the record table.
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            initial_capacity: 0,
        }
    }
}

/// In-memory keyed record store.
///
/// Provides:
/// - `save` / `load` by record id
/// - `visit` over every record in first-insertion order
/// - a save notifier and a load notifier for observing both
///
/// No lock is held while listeners or visitors run, so they may call back
/// into the store.
pub struct Store<R: Record> {
    /// Store configuration.
    config: StoreConfig,

    /// Records by id. Overwriting a key keeps its original position.
    records: Mutex<IndexMap<R::Id, R>>,

    on_save: Notifier<R>,

    /// Carries the lookup result, `None` for a missing id.
    on_load: Notifier<Option<R>>,
}

/// Create a fresh, empty store with default configuration.
///
/// Every call returns an independent store with its own table and notifiers.
pub fn create_in_memory<R>() -> Store<R>
where
    R: Record + Clone + 'static,
{
    Store::new()
}

impl<R> Store<R>
where
    R: Record + Clone + 'static,
{
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let records = IndexMap::with_capacity(config.initial_capacity);
        let on_save = Notifier::new(format!("{}.save", config.name));
        let on_load = Notifier::new(format!("{}.load", config.name));

        Self {
            config,
            records: Mutex::new(records),
            on_save,
            on_load,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // --- Record Operations ---

    /// Save a record, overwriting any record with the same id.
    ///
    /// Save listeners run first and see the store as it was before this
    /// call. If one fails, its error is returned and nothing is written.
    pub fn save(&self, value: R) -> Result<()> {
        self.on_save.publish(&value)?;

        let id = value.id().clone();
        let (index, previous) = self.records.lock().insert_full(id, value);
        debug!(
            store = %self.config.name,
            index,
            overwritten = previous.is_some(),
            "saved record"
        );
        Ok(())
    }

    /// Load a record by id.
    ///
    /// The lookup result is broadcast to load listeners and then returned,
    /// so a missing id reaches listeners as `None` and the caller as
    /// `Ok(None)`.
    pub fn load<Q>(&self, id: &Q) -> Result<Option<R>>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let found = self.records.lock().get(id).cloned();

        debug!(store = %self.config.name, ?id, found = found.is_some(), "loaded record");

        self.on_load.publish(&found)?;
        Ok(found)
    }

    /// Call `visitor` once per record, in first-insertion order.
    ///
    /// Visits a snapshot taken when the call starts; saves made by the
    /// visitor are not seen by this traversal.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(&R),
    {
        let snapshot: Vec<R> = self.records.lock().values().cloned().collect();
        debug!(store = %self.config.name, records = snapshot.len(), "visiting records");

        for record in &snapshot {
            visitor(record);
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    // --- Notifiers ---

    /// Listeners here run on every `save`, before the write.
    pub fn on_save(&self) -> &Notifier<R> {
        &self.on_save
    }

    /// Listeners here run on every `load`, with `None` when the id is missing.
    pub fn on_load(&self) -> &Notifier<Option<R>> {
        &self.on_load
    }
}

impl<R> Default for Store<R>
where
    R: Record + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Database<R> for Store<R>
where
    R: Record + Clone + 'static,
{
    fn save(&self, value: R) -> Result<()> {
        Store::save(self, value)
    }

    fn load(&self, id: &R::Id) -> Result<Option<R>> {
        Store::load(self, id)
    }
}

impl<R: Record> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.config.name)
            .field("records", &self.records.lock().len())
            .field("on_save", &self.on_save)
            .field("on_load", &self.on_load)
            .finish()
    }
}
