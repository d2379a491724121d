//! Insertion with pre-emptive node splitting.
//!
//! A full node is split before the descent enters it, so the parent that
//! receives the promoted median always has room and a single top-down pass
//! never has to back up.

use super::{BTree, Entry, Node};
use crate::common::config::{LOWER_BOUND_KEYNUM, MIN_DEGREE, UPPER_BOUND_KEYNUM};

impl<K: Ord, V> BTree<K, V> {
    /// Insert `value` under `key`.
    ///
    /// If the key is already present its value is overwritten, the size is
    /// unchanged, and the previous value is returned. Otherwise the entry is
    /// added, the size grows by one, and `None` is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let root = self.root.get_or_insert_with(|| Box::new(Node::new_leaf()));

        if root.is_full() {
            // Grow upward: the old root becomes the only child of a new one.
            let old_root = std::mem::replace(root, Box::new(Node::new_leaf()));
            root.children.push(old_root);
            split_child(root, 0);
            tracing::trace!("root split, tree grew one level");
        }

        let previous = insert_into(root, key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }
}

/// Insert into the subtree rooted at `node`, which is never full.
fn insert_into<K: Ord, V>(node: &mut Node<K, V>, key: K, value: V) -> Option<V> {
    let slot = match node.search_key(&key) {
        Ok(index) => return Some(node.entries[index].replace_value(value)),
        Err(slot) => slot,
    };

    if node.is_leaf() {
        node.entries.insert(slot, Entry::new(key, value));
        return None;
    }

    let child_index = node.child_index(&key);
    if node.children[child_index].is_full() {
        split_child(node, child_index);
        // The promoted median may equal the key or move the boundary.
        return insert_into(node, key, value);
    }

    insert_into(&mut node.children[child_index], key, value)
}

/// Split the full child at `child_index` around its median.
///
/// The child keeps its lower `LOWER_BOUND_KEYNUM` entries, a new sibling
/// placed at `child_index + 1` takes the upper `LOWER_BOUND_KEYNUM` (and the
/// upper `MIN_DEGREE` children if internal), and the median moves up into
/// `parent` at `child_index`.
pub(super) fn split_child<K, V>(parent: &mut Node<K, V>, child_index: usize) {
    debug_assert!(!parent.is_full(), "parent of a split must have room");

    let (median, sibling) = {
        let child = &mut parent.children[child_index];
        debug_assert_eq!(child.key_count(), UPPER_BOUND_KEYNUM);

        let mut sibling = Node::new_leaf();
        sibling.entries.extend(child.entries.drain(MIN_DEGREE..));
        if !child.is_leaf() {
            sibling.children.extend(child.children.drain(MIN_DEGREE..));
        }

        let median = child.entries.remove(LOWER_BOUND_KEYNUM);
        (median, sibling)
    };

    parent.children.insert(child_index + 1, Box::new(sibling));
    parent.entries.insert(child_index, median);

    tracing::trace!(child_index, parent_keys = parent.key_count(), "split node");
}
