//! The item contract shared by every list kind
//!
//! A list kind (to-dos, gallery images) describes how its records are
//! created from a draft, patched, bumped and seeded. The generic store in
//! `storage::store` relies only on this trait.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::id::ItemId;

/// A draft or patch was rejected before touching the collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
}

/// A record managed by a list store
pub trait ListItem: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Caller-supplied fields for a new item
    type Draft;

    /// Partial update; absent fields leave the item untouched
    type Patch;

    /// Field addressed by a toggle or increment
    type Field: Copy + fmt::Debug;

    /// Name of the durable slot holding this kind's snapshot
    const SLOT_KEY: &'static str;

    fn id(&self) -> ItemId;

    fn created_at(&self) -> DateTime<Utc>;

    /// Builds a new item, merging the draft over the kind's defaults
    fn create(
        id: ItemId,
        created_at: DateTime<Utc>,
        draft: Self::Draft,
    ) -> Result<Self, ValidationError>;

    /// Returns a copy with `patch` applied; `id` and `created_at` are kept
    fn patched(&self, patch: Self::Patch) -> Result<Self, ValidationError>;

    /// Toggles a flag or increments a counter
    fn bump(&mut self, field: Self::Field);

    /// Items used when no snapshot exists yet
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

/// A filter and an ordering over items of one kind
pub trait ItemQuery<T> {
    fn matches(&self, item: &T) -> bool;

    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Trims a required text field, rejecting blank input
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(trimmed.to_string())
}

/// Newest first
pub fn by_created_desc<T: ListItem>(a: &T, b: &T) -> Ordering {
    b.created_at().cmp(&a.created_at())
}

/// Case-insensitive alphabetical order with a byte-wise tie-break
pub fn by_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Case-insensitive substring match; an empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
