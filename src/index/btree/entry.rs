//! Key/value pair stored inside a node.

use std::mem;

/// An owned (key, value) pair.
///
/// Entries move between nodes during splits, rotations and merges; the key
/// never changes once the entry is created, only the value can be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub(super) key: K,
    pub(super) value: V,
}

impl<K, V> Entry<K, V> {
    /// Create a new entry.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replace the value, returning the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    /// Consume the entry, keeping only its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}
