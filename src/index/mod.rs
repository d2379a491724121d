//! Index structures.
//!
//! - [`btree`] - single-threaded in-memory B-tree
//! - [`SharedBTree`] - the same tree behind a read/write lock

pub mod btree;
mod shared;

pub use shared::SharedBTree;
