//! Error types for the B-tree index.
//!
//! Search, insert, delete and traversal never fail: a missing key is
//! reported as `None`. Errors only come from checking a tree, either
//! against its own structural invariants or against a trusted reference map.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors reported by the index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two leaves were found at different depths.
    #[error("leaves at different depths: {expected} and {found}")]
    UnbalancedLeaves { expected: usize, found: usize },

    /// A node holds fewer or more entries than its position allows.
    #[error("node at depth {depth} holds {count} entries, allowed {min}..={max}")]
    FillBounds {
        depth: usize,
        count: usize,
        min: usize,
        max: usize,
    },

    /// An internal node does not have exactly one more child than entries.
    #[error("internal node at depth {depth} has {entries} entries but {children} children")]
    ChildCount {
        depth: usize,
        entries: usize,
        children: usize,
    },

    /// Entries are not strictly ascending, or a subtree escapes its separators.
    #[error("entry {index} of a node at depth {depth} is out of order")]
    Ordering { depth: usize, index: usize },

    /// The recorded size differs from the number of reachable keys.
    #[error("size is {recorded} but {reachable} keys are reachable")]
    SizeMismatch { recorded: usize, reachable: usize },

    /// The tree returned a different value than the reference map for a key.
    #[error("consistency violation: value mismatch for key {key}")]
    ValueMismatch { key: String },

    /// The tree and the reference map disagree on the number of keys.
    #[error("consistency violation: tree holds {actual} keys, reference holds {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Traversal emitted a key out of order or different from the reference.
    #[error("consistency violation: traversal diverged at position {position} (key {key})")]
    TraversalMismatch { position: usize, key: String },
}
