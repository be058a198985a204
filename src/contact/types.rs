//! Contact detection data types

use crate::contact::connectivity::Connectivity;
use crate::error::{ContactPointsError, Result};
use crate::volume::{Coord, BACKGROUND};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Unordered pair of distinct non-background labels, stored with `low < high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactKey {
    low: u64,
    high: u64,
}

impl ContactKey {
    /// Canonicalize two labels into a key
    ///
    /// Returns `None` for self-pairs and for pairs involving background.
    #[inline]
    pub fn new(a: u64, b: u64) -> Option<Self> {
        if a == b || a == BACKGROUND || b == BACKGROUND {
            return None;
        }
        Some(if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        })
    }

    pub fn low(&self) -> u64 {
        self.low
    }

    pub fn high(&self) -> u64 {
        self.high
    }

    /// The partner of `label`, if `label` is part of this pair
    pub fn other(&self, label: u64) -> Option<u64> {
        if label == self.low {
            Some(self.high)
        } else if label == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

/// Accumulated contact between one label pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Number of adjacent voxel pairs
    pub count: u64,

    /// Lower-indexed voxel of each pair; empty unless coordinate tracking is on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coordinates: Vec<Coord>,
}

/// Mapping from label pair to contact record
///
/// Iteration order is unspecified; use [`ContactTable::sorted`] for a stable one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactTable {
    records: HashMap<ContactKey, ContactRecord>,
}

impl ContactTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one contact for `key`, remembering `coord` when given
    pub fn record(&mut self, key: ContactKey, coord: Option<Coord>) -> Result<()> {
        if !self.records.contains_key(&key) {
            self.records.try_reserve(1).map_err(|e| {
                ContactPointsError::Allocation(format!("contact table: {}", e))
            })?;
        }
        let record = self.records.entry(key).or_default();
        record.count += 1;

        if let Some(coord) = coord {
            record.coordinates.try_reserve(1).map_err(|e| {
                ContactPointsError::Allocation(format!("contact coordinates: {}", e))
            })?;
            record.coordinates.push(coord);
        }
        Ok(())
    }

    /// Record for the pair `(a, b)` in either order
    pub fn get(&self, a: u64, b: u64) -> Option<&ContactRecord> {
        ContactKey::new(a, b).and_then(|key| self.records.get(&key))
    }

    /// Contact count for `(a, b)`, zero when the labels never touch
    pub fn count(&self, a: u64, b: u64) -> u64 {
        self.get(a, b).map_or(0, |r| r.count)
    }

    /// Get number of label pairs in contact
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContactKey, &ContactRecord)> {
        self.records.iter()
    }

    /// Sum of all contact counts
    pub fn total_contacts(&self) -> u64 {
        self.records.values().map(|r| r.count).sum()
    }

    /// Fold another table into this one
    ///
    /// Counts for identical keys are summed and coordinate lists appended, so
    /// merging partition tables in any order gives the same counts.
    pub fn merge(&mut self, other: ContactTable) {
        for (key, record) in other.records {
            let entry = self.records.entry(key).or_default();
            entry.count += record.count;
            entry.coordinates.extend(record.coordinates);
        }
    }

    /// Records ordered by key
    pub fn sorted(&self) -> Vec<(ContactKey, &ContactRecord)> {
        let mut entries: Vec<_> = self.records.iter().map(|(k, r)| (*k, r)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    /// Counts only, keyed by `(low, high)`
    pub fn counts(&self) -> BTreeMap<(u64, u64), u64> {
        self.records
            .iter()
            .map(|(key, record)| ((key.low, key.high), record.count))
            .collect()
    }
}

impl IntoIterator for ContactTable {
    type Item = (ContactKey, ContactRecord);
    type IntoIter = std::collections::hash_map::IntoIter<ContactKey, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Adjacent voxel pair between two specific labels
///
/// `first` carries the first requested label, `second` the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactPoint {
    pub first: Coord,
    pub second: Coord,
}

/// Direction of the voxel scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrder {
    /// Increasing linear index
    #[default]
    Forward,
    /// Decreasing linear index
    Reverse,
}

/// Options for contact detection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectOptions {
    /// Neighbor convention
    #[serde(default)]
    pub connectivity: Connectivity,

    /// Keep the voxel coordinate of every contact
    #[serde(default)]
    pub track_coordinates: bool,

    /// Voxel visiting order
    #[serde(default)]
    pub scan_order: ScanOrder,

    /// Split the volume into slabs and scan them on the thread pool
    #[serde(default)]
    pub parallel: bool,

    /// Number of slabs for partitioned scans (0 picks one per worker thread)
    #[serde(default)]
    pub slabs: usize,
}

impl DetectOptions {
    /// Create options for a connectivity mode with everything else defaulted
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    pub fn with_coordinates(mut self, track: bool) -> Self {
        self.track_coordinates = track;
        self
    }

    pub fn with_scan_order(mut self, order: ScanOrder) -> Self {
        self.scan_order = order;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_slabs(mut self, slabs: usize) -> Self {
        self.slabs = slabs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_key_canonical() {
        let key = ContactKey::new(7, 3).unwrap();
        assert_eq!(key.low(), 3);
        assert_eq!(key.high(), 7);
        assert_eq!(key, ContactKey::new(3, 7).unwrap());
        assert_eq!(key.other(3), Some(7));
        assert_eq!(key.other(7), Some(3));
        assert_eq!(key.other(5), None);
    }

    #[test]
    fn test_contact_key_rejects_background_and_self_pairs() {
        assert!(ContactKey::new(0, 4).is_none());
        assert!(ContactKey::new(4, 0).is_none());
        assert!(ContactKey::new(4, 4).is_none());
    }

    #[test]
    fn test_record_accumulates() {
        let mut table = ContactTable::new();
        let key = ContactKey::new(2, 1).unwrap();
        table.record(key, None).unwrap();
        table.record(key, Some([1, 2, 3])).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.count(1, 2), 2);
        assert_eq!(table.count(2, 1), 2);
        assert_eq!(table.get(1, 2).unwrap().coordinates, vec![[1, 2, 3]]);
        assert_eq!(table.count(1, 3), 0);
    }

    #[test]
    fn test_merge_sums_counts() {
        let k12 = ContactKey::new(1, 2).unwrap();
        let k23 = ContactKey::new(2, 3).unwrap();

        let mut left = ContactTable::new();
        left.record(k12, None).unwrap();
        left.record(k12, None).unwrap();

        let mut right = ContactTable::new();
        right.record(k12, None).unwrap();
        right.record(k23, None).unwrap();

        let mut a = left.clone();
        a.merge(right.clone());
        let mut b = right;
        b.merge(left);

        assert_eq!(a.counts(), b.counts());
        assert_eq!(a.count(1, 2), 3);
        assert_eq!(a.count(2, 3), 1);
        assert_eq!(a.total_contacts(), 4);
    }

    #[test]
    fn test_sorted_orders_by_key() {
        let mut table = ContactTable::new();
        for (a, b) in [(5, 9), (1, 4), (2, 3), (1, 2)] {
            table.record(ContactKey::new(a, b).unwrap(), None).unwrap();
        }
        let keys: Vec<_> = table
            .sorted()
            .into_iter()
            .map(|(k, _)| (k.low(), k.high()))
            .collect();
        assert_eq!(keys, vec![(1, 2), (1, 4), (2, 3), (5, 9)]);
    }

    #[test]
    fn test_detect_options_defaults() {
        let options = DetectOptions::default();
        assert_eq!(options.connectivity, Connectivity::Six);
        assert!(!options.track_coordinates);
        assert_eq!(options.scan_order, ScanOrder::Forward);
        assert!(!options.parallel);

        let parsed: DetectOptions = serde_json::from_str(r#"{"connectivity": 18}"#).unwrap();
        assert_eq!(parsed, DetectOptions::new(Connectivity::Eighteen));
    }
}
