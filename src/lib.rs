//! btree-index - An in-memory B-tree map with minimum degree 5.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          btree-index                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Shared Layer (index/shared.rs)                 │   │
//! │  │       SharedBTree: RwLock, one lock per operation        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Tree Layer (index/btree/)                   │   │
//! │  │   BTree: search | insert | delete | traverse | iter     │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  split on the way down │ borrow / merge / pass  │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Node Layer (index/btree/node.rs)            │   │
//! │  │   fixed-capacity entries + children, relative offsets    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - The B-tree and its thread-safe wrapper
//!
//! # Quick Start
//! ```
//! use btree_index::BTree;
//!
//! let mut tree = BTree::new();
//! for k in 1..=40 {
//!     tree.insert(k, k * 100);
//! }
//! tree.delete(&17);
//!
//! assert_eq!(tree.size(), 39);
//! assert_eq!(tree.search(&18), Some(&1800));
//! assert!(tree.check_invariants().is_ok());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{LOWER_BOUND_KEYNUM, MAX_CHILDREN, MIN_DEGREE, UPPER_BOUND_KEYNUM};
pub use common::{Error, Result};

pub use index::btree::{BTree, Entry, Iter, Node, Visitor};
pub use index::SharedBTree;
