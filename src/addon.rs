//! The addon set threaded through every pipeline stage.
//!
//! Records are keyed by workshop id. Inserting an id that is already present is
//! a no-op that keeps the existing record, so collection expansion can run
//! before or after standalone loading without producing duplicates.

use std::collections::BTreeMap;
use std::fmt;

/// Everything known about one queued workshop item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonRecord {
    id: u64,
    /// Display name (the item title). Empty until metadata is resolved.
    pub name: String,
    /// Local file name to write to. Empty until metadata is resolved.
    pub file: String,
    /// Download location. Empty until metadata is resolved.
    pub url: String,
    /// Reported size in bytes.
    pub size: u64,
    /// True once `url` and `file` are known and the catalog reported success.
    pub download_eligible: bool,
}

impl AddonRecord {
    /// Creates an unresolved record.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Returns the workshop id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Added vs. already-present counts from one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeCounts {
    /// Ids that were not yet queued.
    pub added: usize,
    /// Ids that were already queued and left untouched.
    pub omitted: usize,
}

impl MergeCounts {
    /// Accumulates another merge result into this one.
    pub fn absorb(&mut self, other: Self) {
        self.added += other.added;
        self.omitted += other.omitted;
    }
}

impl fmt::Display for MergeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} duplicates omitted",
            self.added, self.omitted
        )
    }
}

/// Insertion-deduplicated mapping from workshop id to record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonSet {
    records: BTreeMap<u64, AddonRecord>,
}

impl AddonSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `id` unless it is already present.
    ///
    /// Returns true if the id was newly added. An existing record is never
    /// modified.
    pub fn insert_if_absent(&mut self, id: u64) -> bool {
        if self.records.contains_key(&id) {
            return false;
        }
        self.records.insert(id, AddonRecord::new(id));
        true
    }

    /// Queues every id, counting new and already-present ones.
    pub fn merge_ids<I>(&mut self, ids: I) -> MergeCounts
    where
        I: IntoIterator<Item = u64>,
    {
        let mut counts = MergeCounts::default();
        for id in ids {
            if self.insert_if_absent(id) {
                counts.added += 1;
            } else {
                counts.omitted += 1;
            }
        }
        counts
    }

    /// Returns true if `id` is queued.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.records.contains_key(&id)
    }

    /// Returns the record for `id`.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&AddonRecord> {
        self.records.get(&id)
    }

    /// Returns the record for `id` for in-place annotation.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut AddonRecord> {
        self.records.get_mut(&id)
    }

    /// Returns the number of queued ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates queued ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.keys().copied()
    }

    /// Iterates all records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &AddonRecord> {
        self.records.values()
    }

    /// Iterates records that are ready to download.
    pub fn eligible(&self) -> impl Iterator<Item = &AddonRecord> {
        self.records.values().filter(|record| record.download_eligible)
    }

    /// Returns the number of records ready to download.
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }
}

impl<'a> IntoIterator for &'a AddonSet {
    type Item = &'a AddonRecord;
    type IntoIter = std::collections::btree_map::Values<'a, u64, AddonRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}
