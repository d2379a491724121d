//! Thread-safe wrapper around [`BTree`].

use parking_lot::RwLock;

use super::btree::{BTree, Visitor};
use crate::common::Result;

/// A [`BTree`] shared between threads.
///
/// # Thread Safety
/// - mutations (`insert`, `delete`, `clear`) take the write lock once for
///   the whole operation
/// - reads (`search_cloned`, `size`, `traverse`, `with_read`) take the read
///   lock, so any number of readers proceed together
///
/// The tree itself is never observed mid-rebalance.
#[derive(Debug)]
pub struct SharedBTree<K, V> {
    inner: RwLock<BTree<K, V>>,
}

impl<K, V> SharedBTree<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTree::new()),
        }
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Run `f` against the tree under the read lock.
    ///
    /// Keep `f` short: writers wait until it returns.
    pub fn with_read<R>(&self, f: impl FnOnce(&BTree<K, V>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Ordered traversal under the read lock.
    pub fn traverse<F: Visitor<K, V>>(&self, visitor: F) {
        self.inner.read().traverse(visitor);
    }

    /// Unwrap the tree, consuming the wrapper.
    pub fn into_inner(self) -> BTree<K, V> {
        self.inner.into_inner()
    }
}

impl<K: Ord, V> SharedBTree<K, V> {
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    pub fn delete(&self, key: &K) -> Option<V> {
        self.inner.write().delete(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Clone of the value stored for `key`.
    ///
    /// The read guard cannot outlive this call, so the value is cloned out.
    pub fn search_cloned(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().search(key).cloned()
    }

    /// [`BTree::check_invariants`] under the read lock.
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.read().check_invariants()
    }
}

impl<K, V> Default for SharedBTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> From<BTree<K, V>> for SharedBTree<K, V> {
    fn from(tree: BTree<K, V>) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }
}
