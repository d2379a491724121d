//! Differential harness shared by the integration tests.
//!
//! Drives a [`BTree`] and a `std::collections::BTreeMap` with the same
//! operations and reports the first observable divergence as a
//! consistency-violation [`Error`].

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt::Debug;

use btree_index::{BTree, Error, Result};

pub struct Differential<K, V> {
    pub tree: BTree<K, V>,
    pub reference: BTreeMap<K, V>,
}

impl<K, V> Differential<K, V>
where
    K: Ord + Clone + Debug,
    V: Clone + PartialEq + Debug,
{
    pub fn new() -> Self {
        Self {
            tree: BTree::new(),
            reference: BTreeMap::new(),
        }
    }

    /// Insert into both maps; the previous values must agree.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let expected = self.reference.insert(key.clone(), value.clone());
        let actual = self.tree.insert(key.clone(), value);
        if expected != actual {
            return Err(value_mismatch(&key));
        }
        Ok(())
    }

    /// Delete from both maps; the removed values must agree.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        let expected = self.reference.remove(key);
        let actual = self.tree.delete(key);
        if expected != actual {
            return Err(value_mismatch(key));
        }
        Ok(())
    }

    /// Compare value per key, size and full traversal order, then the
    /// tree's own structural invariants.
    pub fn verify(&self) -> Result<()> {
        for (key, value) in &self.reference {
            if self.tree.search(key) != Some(value) {
                return Err(value_mismatch(key));
            }
        }

        if self.tree.size() != self.reference.len() {
            return Err(Error::LengthMismatch {
                expected: self.reference.len(),
                actual: self.tree.size(),
            });
        }

        let mut traversed = Vec::with_capacity(self.reference.len());
        self.tree.traverse(|k: &K, v: &V| {
            traversed.push((k.clone(), v.clone()));
            true
        });

        for (position, (actual, expected)) in traversed.iter().zip(&self.reference).enumerate() {
            if actual.0 != *expected.0 || actual.1 != *expected.1 {
                return Err(Error::TraversalMismatch {
                    position,
                    key: format!("{:?}", actual.0),
                });
            }
        }
        if traversed.len() != self.reference.len() {
            return Err(Error::LengthMismatch {
                expected: self.reference.len(),
                actual: traversed.len(),
            });
        }

        self.tree.check_invariants()
    }
}

fn value_mismatch<K: Debug>(key: &K) -> Error {
    Error::ValueMismatch {
        key: format!("{:?}", key),
    }
}

/// Deterministic permutation of `0..n` (multiplicative stride).
pub fn scrambled(n: u64) -> Vec<u64> {
    const STRIDE: u64 = 7919;
    assert!(n % STRIDE != 0);
    (0..n).map(|i| (i * STRIDE) % n).collect()
}
