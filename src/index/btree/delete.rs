//! Deletion: predecessor swap, sibling borrowing, merging and the upward
//! rebalance pass.
//!
//! # Flow
//! ```text
//! delete(key)
//!   └─ locate: descend recording child indices (the trail)
//!        ├─ found in internal node → swap with in-order predecessor,
//!        │                           continue at the predecessor leaf
//!        └─ found in leaf          → slot in that leaf
//!   └─ remove from leaf
//!        ├─ root leaf, or leaf above minimum → plain removal
//!        └─ deficient → borrow left │ borrow right │ merge (left first)
//!             └─ merge left parent deficient → rebalance pass
//!   └─ collapse an emptied root
//! ```
//!
//! Nodes carry no parent pointers. Parent context is a path of child
//! indices from the root, re-walked whenever a parent is needed.

use std::mem;

use super::{BTree, Entry, Node};

/// How a deficient child was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Repair {
    /// Rotated one entry in from the left sibling.
    BorrowedLeft,
    /// Rotated one entry in from the right sibling.
    BorrowedRight,
    /// Absorbed into the left sibling; the parent lost one entry.
    MergedLeft,
    /// Absorbed the right sibling; the parent lost one entry.
    MergedRight,
}

impl Repair {
    #[inline]
    fn is_merge(self) -> bool {
        matches!(self, Repair::MergedLeft | Repair::MergedRight)
    }
}

/// Location of an in-order predecessor.
pub(super) struct Predecessor<'a, K, V> {
    /// Leaf whose last entry is the predecessor.
    pub(super) leaf: &'a mut Node<K, V>,

    /// Child indices from the node holding the searched key down to `leaf`.
    /// The last index is the leaf's position in its parent.
    pub(super) path: Vec<usize>,
}

impl<K: Ord, V> BTree<K, V> {
    /// Remove `key`, returning its value if it was present.
    ///
    /// The size shrinks by one only when a key is actually removed.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let root = self.root.as_deref_mut()?;

        let mut trail = Vec::new();
        let slot = locate_for_removal(root, key, &mut trail)?;

        let removed = match trail.split_last() {
            None => root.entries.remove(slot),
            Some((&leaf_index, parent_path)) => {
                let parent = root.descendant_mut(parent_path);
                let (removed, repair) = remove_from_leaf(parent, leaf_index, slot);

                let needs_pass = repair.is_some_and(Repair::is_merge)
                    && !parent_path.is_empty()
                    && parent.is_deficient();
                if needs_pass {
                    rebalance_path(root, parent_path);
                }
                removed
            }
        };

        self.len -= 1;
        self.collapse_root();
        Some(removed.into_value())
    }

    /// Drop a root left without entries.
    ///
    /// An empty leaf root empties the tree; an empty internal root has a
    /// single child after a merge, which becomes the new root.
    fn collapse_root(&mut self) {
        let Some(mut root) = self.root.take() else {
            return;
        };

        if root.key_count() > 0 {
            self.root = Some(root);
            return;
        }

        self.root = root.children.pop();
        if self.root.is_some() {
            tracing::trace!("root collapsed, tree shrank one level");
        }
    }
}

/// Descend towards `key`, recording the child index taken at each level.
///
/// When the key sits in an internal node it is swapped with its in-order
/// predecessor and the descent continues to the predecessor's leaf. Returns
/// the slot of the key in the leaf at the end of `trail`.
fn locate_for_removal<K: Ord, V>(node: &mut Node<K, V>, key: &K, trail: &mut Vec<usize>) -> Option<usize> {
    match node.search_key(key) {
        Ok(slot) if node.is_leaf() => Some(slot),
        Ok(slot) => {
            let predecessor = find_predecessor(&mut node.children, slot);
            let last = predecessor.leaf.key_count() - 1;
            mem::swap(&mut node.entries[slot], &mut predecessor.leaf.entries[last]);
            trail.extend(predecessor.path);
            Some(last)
        }
        Err(_) if node.is_leaf() => None,
        Err(_) => {
            let child_index = node.child_index(key);
            trail.push(child_index);
            locate_for_removal(&mut node.children[child_index], key, trail)
        }
    }
}

/// In-order predecessor of the entry at `key_index` of the node owning
/// `children`: the last entry of the rightmost leaf under the left child.
pub(super) fn find_predecessor<K, V>(children: &mut [Box<Node<K, V>>], key_index: usize) -> Predecessor<'_, K, V> {
    let mut path = vec![key_index];
    let mut node = &mut *children[key_index];

    while !node.is_leaf() {
        let last = node.children.len() - 1;
        path.push(last);
        node = &mut *node.children[last];
    }

    Predecessor { leaf: node, path }
}

/// Remove the entry at `slot` of the leaf `parent.children[leaf_index]`.
///
/// A leaf left below the minimum is repaired from its siblings; the repair
/// taken is returned alongside the removed entry.
fn remove_from_leaf<K, V>(parent: &mut Node<K, V>, leaf_index: usize, slot: usize) -> (Entry<K, V>, Option<Repair>) {
    let leaf = &mut parent.children[leaf_index];
    let removed = leaf.entries.remove(slot);

    if !leaf.is_deficient() {
        return (removed, None);
    }

    let repair = repair_child(parent, leaf_index);
    (removed, Some(repair))
}

/// Bring the deficient `parent.children[index]` back within bounds.
///
/// Borrowing is preferred to merging: left sibling first, then right. When
/// neither can lend, merge with the left sibling if there is one, otherwise
/// with the right.
pub(super) fn repair_child<K, V>(parent: &mut Node<K, V>, index: usize) -> Repair {
    if parent.left_sibling(index).is_some_and(Node::can_lend) {
        rotate_from_left(parent, index);
        return Repair::BorrowedLeft;
    }

    if parent.right_sibling(index).is_some_and(Node::can_lend) {
        rotate_from_right(parent, index);
        return Repair::BorrowedRight;
    }

    if index > 0 {
        merge_children(parent, index - 1);
        Repair::MergedLeft
    } else {
        merge_children(parent, index);
        Repair::MergedRight
    }
}

/// Move the separator `entries[index - 1]` down into the front of
/// `children[index]` and the left sibling's last entry up in its place.
/// For internal nodes the sibling's last child moves across too.
fn rotate_from_left<K, V>(parent: &mut Node<K, V>, index: usize) {
    let (left, right) = parent.children.split_at_mut(index);
    let sibling = &mut left[index - 1];
    let node = &mut right[0];

    let last = sibling.key_count() - 1;
    let lent = sibling.entries.remove(last);
    let separator = mem::replace(&mut parent.entries[index - 1], lent);
    node.entries.insert(0, separator);

    if let Some(child) = sibling.children.pop() {
        node.children.insert(0, child);
    }

    tracing::trace!(index, "borrowed from left sibling");
}

/// Move the separator `entries[index]` down onto the end of
/// `children[index]` and the right sibling's first entry up in its place.
/// For internal nodes the sibling's first child moves across too.
fn rotate_from_right<K, V>(parent: &mut Node<K, V>, index: usize) {
    let (left, right) = parent.children.split_at_mut(index + 1);
    let node = &mut left[index];
    let sibling = &mut right[0];

    let lent = sibling.entries.remove(0);
    let separator = mem::replace(&mut parent.entries[index], lent);
    node.entries.push(separator);

    if !sibling.is_leaf() {
        node.children.push(sibling.children.remove(0));
    }

    tracing::trace!(index, "borrowed from right sibling");
}

/// Merge `children[left_index + 1]` and the separator `entries[left_index]`
/// into `children[left_index]`. The right node is dropped.
fn merge_children<K, V>(parent: &mut Node<K, V>, left_index: usize) {
    let right = parent.children.remove(left_index + 1);
    let separator = parent.entries.remove(left_index);

    let left = &mut parent.children[left_index];
    left.entries.push(separator);

    let Node { entries, children } = *right;
    left.entries.extend(entries);
    left.children.extend(children);
    let merged_keys = left.key_count();

    tracing::trace!(
        left_index,
        merged_keys,
        parent_keys = parent.key_count(),
        "merged siblings"
    );
}

/// Walk back up from a node left deficient by a merge.
///
/// Re-descends from the root to the node at `lower_path`, steering by the
/// node's first key, and records the child index taken at each level on an
/// explicit stack. Frames are then popped bottom-up: each deficient node is
/// repaired through its parent, stopping at the first node within bounds,
/// after a borrow, or at the root.
fn rebalance_path<K: Ord, V>(root: &mut Node<K, V>, lower_path: &[usize]) {
    let mut stack = {
        let lower = root.descendant(lower_path);
        let pivot = &lower.entries[0].key;
        trace_to_pivot(root, pivot)
    };
    debug_assert_eq!(stack, lower_path);

    // After a pop, `stack` is the path to the popped frame's parent.
    while let Some(index) = stack.pop() {
        let parent = root.descendant_mut(&stack);
        if !parent.children[index].is_deficient() {
            break;
        }

        let repair = repair_child(parent, index);
        tracing::trace!(depth = stack.len(), index, ?repair, "rebalance step");

        if !repair.is_merge() || stack.is_empty() {
            break;
        }
    }
}

/// Child indices from `node` down to the node holding `pivot`.
fn trace_to_pivot<K: Ord, V>(node: &Node<K, V>, pivot: &K) -> Vec<usize> {
    let mut path = Vec::new();
    let mut node = node;

    while node.search_key(pivot).is_err() {
        let index = node.child_index(pivot);
        let Some(child) = node.children.get(index) else {
            break;
        };
        path.push(index);
        node = &**child;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::LOWER_BOUND_KEYNUM;

    fn leaf(keys: &[i32]) -> Node<i32, i32> {
        let mut node = Node::new_leaf();
        for &k in keys {
            node.entries.push(Entry::new(k, k));
        }
        node
    }

    fn internal(keys: &[i32], children: Vec<Node<i32, i32>>) -> Node<i32, i32> {
        let mut node = leaf(keys);
        for child in children {
            node.children.push(Box::new(child));
        }
        node
    }

    fn keys_of(node: &Node<i32, i32>) -> Vec<i32> {
        node.keys().copied().collect()
    }

    #[test]
    fn test_delete_from_empty_tree() {
        let mut tree: BTree<i32, i32> = BTree::new();
        assert_eq!(tree.delete(&1), None);
        assert_eq!(tree.size(), 0);
    }

    #[test]
    fn test_delete_missing_key_keeps_size() {
        let mut tree = BTree::new();
        for k in 0..30 {
            tree.insert(k * 2, k);
        }
        assert_eq!(tree.delete(&7), None);
        assert_eq!(tree.size(), 30);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_last_key_empties_tree() {
        let mut tree = BTree::new();
        tree.insert(1, "one");
        assert_eq!(tree.delete(&1), Some("one"));
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_rotate_from_left() {
        let mut parent = internal(&[10], vec![leaf(&[1, 2, 3, 4, 5]), leaf(&[11, 12, 13])]);

        assert_eq!(repair_child(&mut parent, 1), Repair::BorrowedLeft);
        assert_eq!(keys_of(&parent), vec![5]);
        assert_eq!(keys_of(&parent.children()[0]), vec![1, 2, 3, 4]);
        assert_eq!(keys_of(&parent.children()[1]), vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_rotate_from_right() {
        let mut parent = internal(&[10], vec![leaf(&[1, 2, 3]), leaf(&[11, 12, 13, 14, 15])]);

        assert_eq!(repair_child(&mut parent, 0), Repair::BorrowedRight);
        assert_eq!(keys_of(&parent), vec![11]);
        assert_eq!(keys_of(&parent.children()[0]), vec![1, 2, 3, 10]);
        assert_eq!(keys_of(&parent.children()[1]), vec![12, 13, 14, 15]);
    }

    #[test]
    fn test_merge_prefers_left_sibling() {
        let mut parent = internal(
            &[10, 20],
            vec![leaf(&[1, 2, 3, 4]), leaf(&[11, 12, 13]), leaf(&[21, 22, 23, 24])],
        );

        assert_eq!(repair_child(&mut parent, 1), Repair::MergedLeft);
        assert_eq!(keys_of(&parent), vec![20]);
        assert_eq!(parent.children().len(), 2);
        assert_eq!(keys_of(&parent.children()[0]), vec![1, 2, 3, 4, 10, 11, 12, 13]);
    }

    #[test]
    fn test_merge_with_right_for_first_child() {
        let mut parent = internal(&[10], vec![leaf(&[1, 2, 3]), leaf(&[11, 12, 13, 14])]);

        assert_eq!(repair_child(&mut parent, 0), Repair::MergedRight);
        assert_eq!(parent.key_count(), 0);
        assert_eq!(keys_of(&parent.children()[0]), vec![1, 2, 3, 10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_rotation_moves_internal_children() {
        let left = internal(
            &[2, 4, 6, 8, 10],
            (0..6).map(|i| leaf(&[i * 2 + 1])).collect(),
        );
        let right = internal(&[30, 40, 50], (0..4).map(|i| leaf(&[31 + i * 10])).collect());
        let mut parent = internal(&[20], vec![left, right]);

        assert_eq!(repair_child(&mut parent, 1), Repair::BorrowedLeft);
        let right = &parent.children()[1];
        assert_eq!(keys_of(right), vec![20, 30, 40, 50]);
        assert_eq!(right.children().len(), 5);
        assert_eq!(keys_of(&right.children()[0]), vec![11]);
        assert_eq!(keys_of(&parent), vec![10]);
    }

    #[test]
    fn test_find_predecessor_reaches_rightmost_leaf() {
        let mut node = internal(
            &[100],
            vec![
                internal(&[10, 20], vec![leaf(&[1]), leaf(&[11]), leaf(&[21, 22, 23])]),
                internal(&[200], vec![leaf(&[150]), leaf(&[250])]),
            ],
        );

        let predecessor = find_predecessor(&mut node.children, 0);
        assert_eq!(predecessor.path, vec![0, 2]);
        assert_eq!(keys_of(predecessor.leaf), vec![21, 22, 23]);
    }

    #[test]
    fn test_trace_to_pivot() {
        let node = internal(
            &[100],
            vec![
                internal(&[10, 20], vec![leaf(&[1]), leaf(&[11]), leaf(&[21])]),
                internal(&[200], vec![leaf(&[150]), leaf(&[250])]),
            ],
        );

        assert_eq!(trace_to_pivot(&node, &100), Vec::<usize>::new());
        assert_eq!(trace_to_pivot(&node, &20), vec![0]);
        assert_eq!(trace_to_pivot(&node, &250), vec![1, 1]);
    }

    #[test]
    fn test_delete_internal_key_uses_predecessor() {
        let mut tree = BTree::new();
        for k in 1..=10 {
            tree.insert(k, k * 100);
        }
        // Root is [5]; its predecessor is 4.
        assert_eq!(tree.delete(&5), Some(500));

        assert_eq!(tree.size(), 9);
        assert_eq!(tree.search(&5), None);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_merge_collapses_root() {
        let mut tree = BTree::new();
        for k in 1..=10 {
            tree.insert(k, k);
        }
        assert_eq!(tree.height(), 2);

        // Right leaf [6..10] gives up 10 directly; removing 1 leaves [2, 3, 4]
        // with no sibling able to lend, so both leaves merge under an empty root.
        tree.delete(&10);
        assert_eq!(tree.height(), 2);
        tree.delete(&1);

        assert_eq!(tree.height(), 1);
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(keys_of(root), vec![2, 3, 4, 5, 6, 7, 8, 9]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_rebalance_pass_propagates_upward() {
        let mut tree = BTree::new();
        for k in 0..2000 {
            tree.insert(k, k);
        }
        let height = tree.height();
        assert!(height >= 4);

        for k in 0..1990 {
            assert_eq!(tree.delete(&k), Some(k));
            tree.check_invariants().unwrap();
        }
        assert!(tree.height() < height);
        assert_eq!(tree.size(), 10);
    }

    #[test]
    fn test_leaf_above_minimum_removes_directly() {
        let mut tree = BTree::new();
        for k in 1..=12 {
            tree.insert(k, k);
        }
        // Right leaf [6..12] is above the minimum.
        assert!(tree.root().unwrap().children()[1].key_count() > LOWER_BOUND_KEYNUM);

        tree.delete(&12);
        let root = tree.root().unwrap();
        assert_eq!(keys_of(root), vec![5]);
        assert_eq!(keys_of(&root.children()[1]), vec![6, 7, 8, 9, 10, 11]);
    }
}
