//! Generic keyed collection

use parking_lot::RwLock;
use std::collections::BTreeMap;

use scheduler_core::RecordId;

/// Records keyed by id
#[derive(Debug)]
pub struct MemoryCollection<T> {
    records: RwLock<BTreeMap<RecordId, T>>,
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Clone> MemoryCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &RecordId) -> Option<T> {
        self.records.read().get(id).cloned()
    }

    /// Insert a new record. Returns `false` if the id is taken.
    pub fn insert(&self, id: RecordId, record: T) -> bool {
        let mut records = self.records.write();
        if records.contains_key(&id) {
            return false;
        }
        records.insert(id, record);
        true
    }

    /// Insert unless `conflicts` matches an existing record. Checked and
    /// applied under one write guard.
    pub fn insert_unique<F>(&self, id: RecordId, record: T, conflicts: F) -> Result<(), InsertError>
    where
        F: Fn(&T) -> bool,
    {
        let mut records = self.records.write();
        if records.contains_key(&id) {
            return Err(InsertError::DuplicateId);
        }
        if records.values().any(conflicts) {
            return Err(InsertError::Conflict);
        }
        records.insert(id, record);
        Ok(())
    }

    /// Overwrite an existing record. Returns `false` if it does not exist.
    pub fn replace(&self, id: &RecordId, record: T) -> bool {
        match self.records.write().get_mut(id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Insert or overwrite, letting `merge` combine with the stored record
    pub fn upsert_with<F>(&self, id: RecordId, record: T, merge: F)
    where
        F: FnOnce(&T, T) -> T,
    {
        let mut records = self.records.write();
        let merged = match records.get(&id) {
            Some(existing) => merge(existing, record),
            None => record,
        };
        records.insert(id, merged);
    }

    /// Mutate one record in place. Returns `false` if it does not exist.
    pub fn modify<F>(&self, id: &RecordId, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.records.write().get_mut(id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    /// Snapshot of all records matching a predicate
    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.records
            .read()
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Apply `f` to every record under one write guard; returns the records
    /// for which `f` reported a change
    pub fn update_where<F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut records = self.records.write();
        records
            .values_mut()
            .filter_map(|r| if f(r) { Some(r.clone()) } else { None })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// Why [`MemoryCollection::insert_unique`] refused a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    DuplicateId,
    Conflict,
}
