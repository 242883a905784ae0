//! Core types for the record store.

use crate::error::Result;
use std::fmt::Debug;
use std::hash::Hash;

/// A value the store can hold.
///
/// Identity is defined solely by [`Record::id`]: two records with the same id
/// occupy the same slot, and the store never looks at anything else.
pub trait Record {
    /// Identifier type. `String` is the usual choice.
    type Id: Eq + Hash + Clone + Debug;

    /// The record's unique identifier.
    fn id(&self) -> &Self::Id;
}

/// Keyed save/load access to a collection of records.
pub trait Database<R: Record> {
    /// Insert or overwrite `value` under its id.
    fn save(&self, value: R) -> Result<()>;

    /// Look up a record by id. A missing id is `Ok(None)`, not an error.
    fn load(&self, id: &R::Id) -> Result<Option<R>>;
}
