//! Configuration constants for the B-tree index.

/// Minimum degree `t` of the tree.
///
/// Every node except the root holds between `t - 1` and `2t - 1` entries.
/// The value is fixed at compile time; node storage is sized from it.
pub const MIN_DEGREE: usize = 5;

/// Minimum number of entries in any non-root node (`t - 1`).
pub const LOWER_BOUND_KEYNUM: usize = MIN_DEGREE - 1;

/// Maximum number of entries in any node (`2t - 1`).
pub const UPPER_BOUND_KEYNUM: usize = MIN_DEGREE * 2 - 1;

/// Maximum number of children of an internal node.
pub const MAX_CHILDREN: usize = UPPER_BOUND_KEYNUM + 1;
