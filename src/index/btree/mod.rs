//! In-memory B-tree with minimum degree [`MIN_DEGREE`](crate::common::config::MIN_DEGREE).
//!
//! # Structure
//! - `entry` - key/value pair stored in a node
//! - `node` - node storage, fill predicates, child navigation
//! - `tree` - the [`BTree`] handle, size, search
//! - `insert` - top-down insertion with pre-emptive splits
//! - `delete` - predecessor swap, borrow/merge repair, rebalance pass
//! - `traverse` - visitor traversal and the in-order [`Iter`]
//! - `validate` - [`BTree::check_invariants`]

mod delete;
mod entry;
mod insert;
mod node;
mod traverse;
mod tree;
mod validate;

pub use entry::Entry;
pub use node::Node;
pub use traverse::{Iter, Visitor};
pub use tree::BTree;
