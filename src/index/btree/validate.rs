//! Structural invariant checks.

use super::{BTree, Node};
use crate::common::config::{LOWER_BOUND_KEYNUM, UPPER_BOUND_KEYNUM};
use crate::common::{Error, Result};

impl<K: Ord, V> BTree<K, V> {
    /// Verify the structural invariants of the tree.
    ///
    /// Checks, in one depth-first walk:
    /// - every leaf sits at the same depth
    /// - every non-root node holds `LOWER_BOUND_KEYNUM..=UPPER_BOUND_KEYNUM`
    ///   entries, the root at most `UPPER_BOUND_KEYNUM`
    /// - every internal node has one more child than entries
    /// - entries ascend strictly and each subtree stays between its separators
    /// - `size()` matches the number of reachable keys
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let mut checker = Checker {
            leaf_depth: None,
            reachable: 0,
        };

        if let Some(root) = self.root.as_deref() {
            checker.check_node(root, 0, None, None)?;
        }

        if checker.reachable != self.len {
            return Err(Error::SizeMismatch {
                recorded: self.len,
                reachable: checker.reachable,
            });
        }

        Ok(())
    }
}

struct Checker {
    /// Depth of the first leaf reached.
    leaf_depth: Option<usize>,
    /// Entries counted so far.
    reachable: usize,
}

impl Checker {
    fn check_node<'a, K: Ord, V>(
        &mut self,
        node: &'a Node<K, V>,
        depth: usize,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
    ) -> Result<()> {
        let count = node.key_count();
        let min = if depth == 0 { 0 } else { LOWER_BOUND_KEYNUM };
        if count < min || count > UPPER_BOUND_KEYNUM {
            return Err(Error::FillBounds {
                depth,
                count,
                min,
                max: UPPER_BOUND_KEYNUM,
            });
        }

        if !node.is_leaf() && node.children.len() != count + 1 {
            return Err(Error::ChildCount {
                depth,
                entries: count,
                children: node.children.len(),
            });
        }

        for (index, entry) in node.entries.iter().enumerate() {
            let floor = match index {
                0 => lower,
                _ => Some(&node.entries[index - 1].key),
            };
            let above_floor = match floor {
                Some(floor) => entry.key > *floor,
                None => true,
            };
            let below_ceiling = match upper {
                Some(ceiling) => entry.key < *ceiling,
                None => true,
            };

            if !above_floor || !below_ceiling {
                return Err(Error::Ordering { depth, index });
            }
        }
        self.reachable += count;

        if node.is_leaf() {
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected != depth => Err(Error::UnbalancedLeaves {
                    expected,
                    found: depth,
                }),
                Some(_) => Ok(()),
            };
        }

        for (index, child) in node.children.iter().enumerate() {
            let child_lower = match index {
                0 => lower,
                _ => Some(&node.entries[index - 1].key),
            };
            let child_upper = match node.entries.get(index) {
                Some(entry) => Some(&entry.key),
                None => upper,
            };
            self.check_node(child, depth + 1, child_lower, child_upper)?;
        }

        Ok(())
    }
}
