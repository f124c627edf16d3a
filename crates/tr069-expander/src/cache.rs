//! Discovered instance indices, keyed by discovery prefix.

use std::collections::BTreeMap;

use thin_vec::ThinVec;

/// A sorted, duplicate-free set of instance numbers found under one prefix.
///
/// Backed by `ThinVec` so the common empty answer (a dead branch) costs a
/// single pointer per cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct InstanceIndices {
    indices: ThinVec<u32>,
}

impl InstanceIndices {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Inserts an index in sorted order, returning false if already present.
    pub fn insert(&mut self, index: u32) -> bool {
        match self.indices.binary_search(&index) {
            Ok(_) => false,
            Err(pos) => {
                self.indices.insert(pos, index);
                true
            }
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }
}

impl FromIterator<u32> for InstanceIndices {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut indices: ThinVec<u32> = iter.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }
}

/// Answers to every discovery query issued so far.
///
/// An entry, once written, is final for the lifetime of the expansion: an
/// empty set means the prefix has no instances, not that it should be asked
/// again.
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: BTreeMap<String, InstanceIndices>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prefix: &str) -> Option<&InstanceIndices> {
        self.entries.get(prefix)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Records the answer for `prefix`.
    ///
    /// Returns false and keeps the existing entry if the prefix was already
    /// answered.
    pub fn insert(&mut self, prefix: String, indices: InstanceIndices) -> bool {
        use std::collections::btree_map::Entry;

        match self.entries.entry(prefix) {
            Entry::Occupied(entry) => {
                log::warn!("ignoring second answer for cached prefix {:?}", entry.key());
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(indices);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InstanceIndices)> {
        self.entries
            .iter()
            .map(|(prefix, indices)| (prefix.as_str(), indices))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
