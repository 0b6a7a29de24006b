//! Item identifiers
//!
//! Ids are plain `u64` values serialized as JSON numbers, matching the
//! creation-time millisecond stamps of existing snapshots.
//!
//! New ids come from an [`IdSequence`]: the current time in epoch
//! milliseconds, bumped past the last issued id when the clock has not
//! advanced (or went backwards). Ids are strictly increasing within a
//! process and never collide with an id loaded from disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid item ID: expected a non-negative integer, got '{0}'")]
    Invalid(String),

    #[error("No item IDs left after {0}")]
    Exhausted(ItemId),
}

/// Identifier of an item in a list store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw id value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Accept the `#42` form printed by list output
        let digits = s.strip_prefix('#').unwrap_or(s);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| IdError::Invalid(s.to_string()))
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Monotonic id generator seeded from the ids already in a collection
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: Option<u64>,
}

impl IdSequence {
    /// Creates a sequence that will never issue any of `existing`
    pub fn after(existing: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            last: existing.into_iter().map(|id| id.0).max(),
        }
    }

    /// Returns the last id issued or observed, if any
    pub fn last(&self) -> Option<ItemId> {
        self.last.map(ItemId)
    }

    /// Issues the next id for an item created at `now`
    ///
    /// Fails once `u64::MAX` has been issued or observed; the sequence is
    /// left unchanged in that case.
    pub fn next(&mut self, now: DateTime<Utc>) -> Result<ItemId, IdError> {
        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let raw = match self.last {
            Some(last) if stamp <= last => last
                .checked_add(1)
                .ok_or(IdError::Exhausted(ItemId(last)))?,
            _ => stamp,
        };
        self.last = Some(raw);
        Ok(ItemId(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn id_uses_timestamp_millis() {
        let mut seq = IdSequence::default();
        assert_eq!(seq.next(at(1_700_000_000_000)).unwrap(), ItemId::new(1_700_000_000_000));
    }

    #[test]
    fn same_millisecond_ids_do_not_collide() {
        let mut seq = IdSequence::default();
        let now = at(1_700_000_000_000);

        let a = seq.next(now).unwrap();
        let b = seq.next(now).unwrap();
        let c = seq.next(now).unwrap();

        assert!(a < b && b < c);
    }

    #[test]
    fn clock_going_backwards_still_increases() {
        let mut seq = IdSequence::default();
        let first = seq.next(at(2_000)).unwrap();
        let second = seq.next(at(1_000)).unwrap();

        assert_eq!(second.get(), first.get() + 1);
    }

    #[test]
    fn sequence_skips_existing_ids() {
        let existing = [ItemId::new(5), ItemId::new(9_999_999_999_999), ItemId::new(3)];
        let mut seq = IdSequence::after(existing);

        assert_eq!(seq.last(), Some(ItemId::new(9_999_999_999_999)));
        assert_eq!(seq.next(at(1_000)).unwrap(), ItemId::new(10_000_000_000_000));
    }

    #[test]
    fn sequence_at_max_id_is_exhausted() {
        let max = ItemId::new(u64::MAX);
        let mut seq = IdSequence::after([max]);

        assert_eq!(seq.next(at(1_000)), Err(IdError::Exhausted(max)));
        assert_eq!(seq.next(at(1_000)), Err(IdError::Exhausted(max)));
        assert_eq!(seq.last(), Some(max));
    }

    #[test]
    fn sequence_reaches_max_then_stops() {
        let mut seq = IdSequence::after([ItemId::new(u64::MAX - 1)]);

        assert_eq!(seq.next(at(1_000)).unwrap(), ItemId::new(u64::MAX));
        assert!(seq.next(at(1_000)).is_err());
    }

    #[test]
    fn parses_plain_and_hash_prefixed() {
        assert_eq!("42".parse::<ItemId>().unwrap(), ItemId::new(42));
        assert_eq!(" #7 ".parse::<ItemId>().unwrap(), ItemId::new(7));
        assert_eq!("0".parse::<ItemId>().unwrap(), ItemId::new(0));
    }

    #[test]
    fn rejects_invalid_ids() {
        assert!("abc".parse::<ItemId>().is_err());
        assert!("-1".parse::<ItemId>().is_err());
        assert!("".parse::<ItemId>().is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ItemId::new(12)).unwrap();
        assert_eq!(json, "12");

        let parsed: ItemId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, ItemId::new(12));
    }
}
