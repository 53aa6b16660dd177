//! Explicit memoization for interactive callers.
//!
//! The algorithms themselves stay cache-free; a UI that re-runs the same
//! aggregation on every widget tick owns one of these maps and keys it by
//! the inputs' identities. Offsets are keyed by bit pattern so the key stays
//! hashable.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::data::filter::BinSelection;
use crate::data::model::Coordinates;

// ---------------------------------------------------------------------------
// Generic memo map
// ---------------------------------------------------------------------------

/// A content-addressed memo map. Entries live until the caller drops or
/// clears the memo; there is no eviction policy.
#[derive(Debug, Default)]
pub struct Memo<K: Eq + Hash, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Memo<K, V> {
    pub fn new() -> Self {
        Memo {
            entries: HashMap::new(),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        match self.entries.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(compute()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Occupancy cache key
// ---------------------------------------------------------------------------

/// Identity key for one occupancy aggregation: dataset names, filter
/// selection, zone selection, catalog name, and coordinate mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccupancyKey {
    dataset_names: Vec<String>,
    bin_codes: Vec<String>,
    zones: Vec<String>,
    catalog: String,
    /// (dx, dy) bit patterns for the shifted mode, `None` for raw.
    offset_bits: Option<(u64, u64)>,
}

impl OccupancyKey {
    pub fn new(
        dataset_names: impl IntoIterator<Item = impl Into<String>>,
        selected_bin_codes: &BinSelection,
        selected_zones: &BTreeSet<String>,
        catalog_name: &str,
        coordinates: Coordinates,
    ) -> Self {
        OccupancyKey {
            dataset_names: dataset_names.into_iter().map(Into::into).collect(),
            bin_codes: selected_bin_codes.iter().cloned().collect(),
            zones: selected_zones.iter().cloned().collect(),
            catalog: catalog_name.to_string(),
            offset_bits: match coordinates {
                Coordinates::Raw => None,
                Coordinates::Shifted(o) => Some((o.dx.to_bits(), o.dy.to_bits())),
            },
        }
    }
}
