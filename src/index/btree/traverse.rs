//! Ordered traversal.
//!
//! Two ways to walk the tree in ascending key order:
//! - [`BTree::traverse`] pushes each entry into a [`Visitor`], which can stop
//!   the walk early.
//! - [`BTree::iter`] returns a lazy [`Iter`] driven by an explicit stack.

use super::{BTree, Node};

/// Receives entries in ascending key order during [`BTree::traverse`].
///
/// Any `FnMut(&K, &V) -> bool` closure is a visitor.
pub trait Visitor<K, V> {
    /// Handle one entry. Return `false` to stop the traversal.
    fn visit(&mut self, key: &K, value: &V) -> bool;
}

impl<K, V, F> Visitor<K, V> for F
where
    F: FnMut(&K, &V) -> bool,
{
    #[inline]
    fn visit(&mut self, key: &K, value: &V) -> bool {
        self(key, value)
    }
}

impl<K, V> BTree<K, V> {
    /// Emit every entry to `visitor` in ascending key order.
    ///
    /// The walk ends as soon as the visitor returns `false`: no further
    /// entries are emitted and no further subtrees are entered.
    ///
    /// # Example
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new();
    /// for k in [3, 1, 2] {
    ///     tree.insert(k, k * 10);
    /// }
    ///
    /// let mut seen = Vec::new();
    /// tree.traverse(|k: &i32, v: &i32| {
    ///     seen.push((*k, *v));
    ///     true
    /// });
    /// assert_eq!(seen, vec![(1, 10), (2, 20), (3, 30)]);
    /// ```
    pub fn traverse<F: Visitor<K, V>>(&self, mut visitor: F) {
        if let Some(root) = self.root.as_deref() {
            walk_in_order(root, &mut visitor);
        }
    }

    /// Lazy iterator over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        if let Some(root) = self.root.as_deref() {
            iter.descend_leftmost(root);
        }
        iter
    }
}

/// Returns `false` once the visitor asked to stop.
fn walk_in_order<K, V, F: Visitor<K, V>>(node: &Node<K, V>, visitor: &mut F) -> bool {
    for (i, entry) in node.entries.iter().enumerate() {
        if let Some(child) = node.left_child(i) {
            if !walk_in_order(child, visitor) {
                return false;
            }
        }

        if !visitor.visit(&entry.key, &entry.value) {
            return false;
        }
    }

    match node.key_count().checked_sub(1).and_then(|last| node.right_child(last)) {
        Some(child) => walk_in_order(child, visitor),
        None => true,
    }
}

/// In-order iterator over a [`BTree`].
///
/// Each stack frame is a node and the index of its next entry to yield.
pub struct Iter<'a, K, V> {
    stack: Vec<(&'a Node<K, V>, usize)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn descend_leftmost(&mut self, mut node: &'a Node<K, V>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = &**child,
                None => break,
            }
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, index) = self.stack.pop()?;
            if index >= node.key_count() {
                continue;
            }

            self.stack.push((node, index + 1));
            if let Some(child) = node.right_child(index) {
                self.descend_leftmost(child);
            }

            self.remaining = self.remaining.saturating_sub(1);
            let entry = &node.entries[index];
            return Some((&entry.key, &entry.value));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a BTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
