//! B-tree node and its structural helpers.
//!
//! A node keeps its entries and children in fixed-capacity inline arrays
//! sized from the minimum degree, so a node never reallocates. Nodes hold
//! no parent pointers; the tree threads parent context through its own
//! descent instead.

use std::cmp::Ordering;

use arrayvec::ArrayVec;

use super::Entry;
use crate::common::config::{LOWER_BOUND_KEYNUM, MAX_CHILDREN, UPPER_BOUND_KEYNUM};

/// A node of the tree.
///
/// # Layout
/// ```text
///            entries:   [ e0 | e1 | e2 | ... | e(k-1) ]
///  children:         [c0 | c1 | c2 | ...  | c(k-1) | ck]
/// ```
/// `children[i]` holds keys strictly between `entries[i - 1]` and
/// `entries[i]`. A leaf has no children; an internal node with `k` entries
/// has exactly `k + 1`.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub(super) entries: ArrayVec<Entry<K, V>, UPPER_BOUND_KEYNUM>,
    pub(super) children: ArrayVec<Box<Node<K, V>>, MAX_CHILDREN>,
}

impl<K, V> Node<K, V> {
    /// Create an empty leaf.
    pub(super) fn new_leaf() -> Self {
        Self {
            entries: ArrayVec::new(),
            children: ArrayVec::new(),
        }
    }

    // ========================================================================
    // Read-only view
    // ========================================================================

    /// True iff the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of entries currently stored.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries in ascending key order.
    #[inline]
    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(Entry::key)
    }

    /// Child nodes, left to right. Empty for a leaf.
    #[inline]
    pub fn children(&self) -> &[Box<Node<K, V>>] {
        &self.children
    }

    // ========================================================================
    // Fill predicates
    // ========================================================================

    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.entries.len() == UPPER_BOUND_KEYNUM
    }

    /// Fewer entries than a non-root node may hold.
    #[inline]
    pub(super) fn is_deficient(&self) -> bool {
        self.entries.len() < LOWER_BOUND_KEYNUM
    }

    /// Can give one entry to a sibling and stay within bounds.
    #[inline]
    pub(super) fn can_lend(&self) -> bool {
        self.entries.len() > LOWER_BOUND_KEYNUM
    }

    // ========================================================================
    // Child lookups
    // ========================================================================

    /// Child at `key_index + direction`.
    ///
    /// Returns `None` for a leaf, or when the resulting index falls outside
    /// `0..=key_count`.
    pub fn child_at_relative_offset(&self, key_index: usize, direction: isize) -> Option<&Node<K, V>> {
        if self.is_leaf() {
            return None;
        }

        let index = key_index.checked_add_signed(direction)?;
        if index > self.key_count() {
            return None;
        }

        self.children.get(index).map(|child| &**child)
    }

    /// Child holding keys smaller than `entries[key_index]`.
    #[inline]
    pub fn left_child(&self, key_index: usize) -> Option<&Node<K, V>> {
        self.child_at_relative_offset(key_index, 0)
    }

    /// Child holding keys greater than `entries[key_index]`.
    #[inline]
    pub fn right_child(&self, key_index: usize) -> Option<&Node<K, V>> {
        self.child_at_relative_offset(key_index, 1)
    }

    /// Sibling to the left of `children[child_index]`, called on the parent.
    #[inline]
    pub fn left_sibling(&self, child_index: usize) -> Option<&Node<K, V>> {
        self.child_at_relative_offset(child_index, -1)
    }

    /// Sibling to the right of `children[child_index]`, called on the parent.
    #[inline]
    pub fn right_sibling(&self, child_index: usize) -> Option<&Node<K, V>> {
        self.child_at_relative_offset(child_index, 1)
    }

    /// Follow a path of child indices down from this node.
    pub(super) fn descendant(&self, path: &[usize]) -> &Node<K, V> {
        let mut node = self;
        for &index in path {
            node = &*node.children[index];
        }
        node
    }

    pub(super) fn descendant_mut(&mut self, path: &[usize]) -> &mut Node<K, V> {
        let mut node = self;
        for &index in path {
            node = &mut *node.children[index];
        }
        node
    }
}

impl<K: Ord, V> Node<K, V> {
    /// Ascending scan for `key`.
    ///
    /// `Ok(i)` when `entries[i]` holds the key, otherwise `Err(i)` with `i`
    /// the slot where the key would be inserted.
    pub(super) fn search_key(&self, key: &K) -> Result<usize, usize> {
        for (i, entry) in self.entries.iter().enumerate() {
            match key.cmp(&entry.key) {
                Ordering::Greater => continue,
                Ordering::Equal => return Ok(i),
                Ordering::Less => return Err(i),
            }
        }
        Err(self.entries.len())
    }

    /// Pick the subtree that must contain `key` as `(key_index, direction)`.
    ///
    /// The scan stops at the first entry not below `key`, clamped to the last
    /// entry. A key above the stop entry goes right of it. Otherwise a key
    /// above the previous entry goes right of that one, else left of the
    /// stop entry.
    fn route(&self, key: &K) -> (usize, isize) {
        let count = self.entries.len();
        if count == 0 {
            return (0, 0);
        }

        let mut i = 0;
        while i + 1 < count && *key > self.entries[i].key {
            i += 1;
        }

        if *key > self.entries[i].key {
            (i, 1)
        } else if i > 0 && *key > self.entries[i - 1].key {
            (i - 1, 1)
        } else {
            (i, 0)
        }
    }

    /// Index into `children` of the subtree that must contain `key`.
    pub(super) fn child_index(&self, key: &K) -> usize {
        let (key_index, direction) = self.route(key);
        key_index.saturating_add_signed(direction)
    }

    /// Subtree that must contain `key`, or `None` for a leaf.
    pub(super) fn child_for(&self, key: &K) -> Option<&Node<K, V>> {
        let (key_index, direction) = self.route(key);
        self.child_at_relative_offset(key_index, direction)
    }
}
