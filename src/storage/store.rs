//! Persistent list store
//!
//! [`PersistentListStore`] is the single owner of one ordered collection.
//! Every mutation builds the next collection, writes the full snapshot to
//! the store's slot and only then replaces the in-memory collection, so a
//! failed write leaves the store unchanged. Views are computed on demand
//! and never written.
//!
//! Snapshots are JSON arrays with RFC 3339 timestamps. A payload that fails
//! to parse (including one that is not UTF-8) is treated as absent: the store starts from its seed and the
//! corrupt payload is overwritten by the next mutation.

use std::cmp::Ordering;

use chrono::Utc;
use log::{debug, warn};
use thiserror::Error;

use super::slot::{SlotError, Slots};
use crate::domain::{IdError, IdSequence, ItemId, ItemQuery, ListItem, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Slot(#[from] SlotError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// How the collection was obtained when the store was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No snapshot existed; started from the seed
    Fresh,
    /// Snapshot parsed successfully
    Restored,
    /// Snapshot was unreadable; started from the seed
    Recovered,
}

/// Ordered collection of items mirrored to a durable slot
#[derive(Debug)]
pub struct PersistentListStore<T, S> {
    slots: S,
    key: String,
    items: Vec<T>,
    ids: IdSequence,
    outcome: LoadOutcome,
}

impl<T: ListItem, S: Slots> PersistentListStore<T, S> {
    /// Opens the store under `T::SLOT_KEY`, seeding first runs with `T::seed()`
    pub fn load(slots: S) -> Result<Self, StoreError> {
        Self::load_with_seed(slots, T::seed())
    }

    /// Opens the store under `T::SLOT_KEY` with an explicit first-run seed
    pub fn load_with_seed(slots: S, seed: Vec<T>) -> Result<Self, StoreError> {
        Self::load_keyed(slots, T::SLOT_KEY, seed)
    }

    /// Opens the store under a custom slot key
    pub fn load_keyed(slots: S, key: impl Into<String>, seed: Vec<T>) -> Result<Self, StoreError> {
        let key = key.into();

        let (items, outcome) = match slots.read(&key)? {
            None => {
                debug!("slot '{}' is empty, starting with {} seed item(s)", key, seed.len());
                (seed, LoadOutcome::Fresh)
            }
            Some(payload) => match serde_json::from_slice::<Vec<T>>(&payload) {
                Ok(items) => {
                    debug!("restored {} item(s) from slot '{}'", items.len(), key);
                    (dedupe(items), LoadOutcome::Restored)
                }
                Err(e) => {
                    warn!("slot '{}' holds an unreadable snapshot ({}), starting fresh", key, e);
                    (seed, LoadOutcome::Recovered)
                }
            },
        };

        let ids = IdSequence::after(items.iter().map(T::id));

        Ok(Self {
            slots,
            key,
            items,
            ids,
            outcome,
        })
    }

    /// The slot key this store persists to
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// Items in store order (newest insert first)
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.items.iter().filter(|item| predicate(item)).count()
    }

    /// Creates an item from `draft` and prepends it
    pub fn add(&mut self, draft: T::Draft) -> Result<T, StoreError> {
        let now = Utc::now();
        // Validate before consuming an id
        let mut ids = self.ids.clone();
        let item = T::create(ids.next(now)?, now, draft)?;

        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(item.clone());
        next.extend(self.items.iter().cloned());

        self.commit(next)?;
        self.ids = ids;
        debug!("added item {} to '{}'", item.id(), self.key);
        Ok(item)
    }

    /// Removes the item with `id`; returns false if there was none
    ///
    /// Nothing is written when `id` is absent.
    pub fn remove(&mut self, id: ItemId) -> Result<bool, StoreError> {
        if !self.contains(id) {
            return Ok(false);
        }

        let next = self.items.iter().filter(|item| item.id() != id).cloned().collect();
        self.commit(next)?;
        debug!("removed item {} from '{}'", id, self.key);
        Ok(true)
    }

    /// Applies `patch` to the item with `id`
    pub fn update(&mut self, id: ItemId, patch: T::Patch) -> Result<T, StoreError> {
        self.replace(id, |item| item.patched(patch))
    }

    /// Toggles or increments `field` on the item with `id`
    pub fn toggle_or_increment(&mut self, id: ItemId, field: T::Field) -> Result<T, StoreError> {
        self.replace(id, |item| {
            let mut next = item.clone();
            next.bump(field);
            Ok(next)
        })
    }

    /// Removes every matching item with a single write; returns the count
    pub fn clear_where(&mut self, predicate: impl Fn(&T) -> bool) -> Result<usize, StoreError> {
        let (removed, kept): (Vec<T>, Vec<T>) =
            self.items.iter().cloned().partition(|item| predicate(item));

        if removed.is_empty() {
            return Ok(0);
        }

        self.commit(kept)?;
        debug!("cleared {} item(s) from '{}'", removed.len(), self.key);
        Ok(removed.len())
    }

    /// Filtered, sorted copy of the collection; store order is untouched
    pub fn view(
        &self,
        filter: impl Fn(&T) -> bool,
        compare: impl Fn(&T, &T) -> Ordering,
    ) -> Vec<T> {
        let mut view: Vec<T> = self.items.iter().filter(|item| filter(item)).cloned().collect();
        view.sort_by(|a, b| compare(a, b));
        view
    }

    /// [`view`](Self::view) driven by a query
    pub fn view_by(&self, query: &impl ItemQuery<T>) -> Vec<T> {
        self.view(|item| query.matches(item), |a, b| query.compare(a, b))
    }

    /// Drops the stored snapshot and returns to `seed`
    pub fn reset(&mut self, seed: Vec<T>) -> Result<(), StoreError> {
        self.slots.remove(&self.key)?;
        // Ids issued before the reset stay retired
        self.ids = IdSequence::after(seed.iter().map(T::id).chain(self.ids.last()));
        self.items = seed;
        self.outcome = LoadOutcome::Fresh;
        Ok(())
    }

    fn replace(
        &mut self,
        id: ItemId,
        change: impl FnOnce(&T) -> Result<T, ValidationError>,
    ) -> Result<T, StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(StoreError::NotFound(id))?;

        let updated = change(&self.items[index])?;

        let mut next = self.items.clone();
        next[index] = updated.clone();
        self.commit(next)?;
        debug!("updated item {} in '{}'", id, self.key);
        Ok(updated)
    }

    fn commit(&mut self, next: Vec<T>) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&next).map_err(|source| SlotError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.slots.write(&self.key, &payload)?;
        self.items = next;
        Ok(())
    }
}

/// Keeps the first occurrence of every id
fn dedupe<T: ListItem>(items: Vec<T>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    let before = items.len();
    let unique: Vec<T> = items.into_iter().filter(|item| seen.insert(item.id())).collect();
    if unique.len() != before {
        warn!("dropped {} duplicate item id(s) from snapshot", before - unique.len());
    }
    unique
}
