//! The tree: ownership of the root, size tracking, lookups.
//!
//! Mutating operations live in sibling modules:
//! - [`insert`](super::insert) - insertion and node splitting
//! - [`delete`](super::delete) - deletion, borrowing, merging, rebalancing
//! - [`traverse`](super::traverse) - ordered traversal and iteration

use super::Node;

/// An in-memory B-tree mapping ordered keys to values.
///
/// # Invariants
/// Before and after every public operation:
/// 1. All leaves are at the same depth.
/// 2. Every non-root node holds `LOWER_BOUND_KEYNUM..=UPPER_BOUND_KEYNUM`
///    entries; the root holds at most `UPPER_BOUND_KEYNUM`.
/// 3. An internal node with `k` entries has `k + 1` children.
/// 4. Entries are strictly ascending and every subtree lies between its
///    separating entries.
/// 5. `size()` equals the number of distinct keys stored.
///
/// [`check_invariants`](Self::check_invariants) verifies all five.
///
/// # Thread Safety
/// `BTree` is single-threaded. Wrap it in a
/// [`SharedBTree`](crate::index::SharedBTree) to share it between threads.
///
/// # Example
/// ```
/// use btree_index::BTree;
///
/// let mut tree = BTree::new();
/// tree.insert(3, "three");
/// tree.insert(1, "one");
///
/// assert_eq!(tree.search(&3), Some(&"three"));
/// assert_eq!(tree.delete(&1), Some("one"));
/// assert_eq!(tree.size(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BTree<K, V> {
    /// Root node, or `None` when the tree is empty.
    pub(super) root: Option<Box<Node<K, V>>>,

    /// Number of distinct keys stored.
    pub(super) len: usize,
}

impl<K, V> BTree<K, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of distinct keys stored.
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove every entry.
    ///
    /// Drops the whole node graph at once; calling it again is a no-op.
    pub fn clear(&mut self) {
        tracing::debug!(size = self.len, "clearing tree");
        self.root = None;
        self.len = 0;
    }

    /// Root node, for read-only inspection (e.g. rendering).
    #[inline]
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            height += 1;
            node = current.children.first().map(|child| &**child);
        }
        height
    }
}

impl<K: Ord, V> BTree<K, V> {
    /// Look up the value stored for `key`.
    ///
    /// Descends from the root, scanning each node's entries in order, and
    /// returns `None` once a leaf is exhausted without a match.
    pub fn search(&self, key: &K) -> Option<&V> {
        let mut node = self.root.as_deref()?;
        loop {
            match node.search_key(key) {
                Ok(index) => return Some(&node.entries[index].value),
                Err(_) => node = node.child_for(key)?,
            }
        }
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }
}

impl<K, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
