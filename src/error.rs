use std::fmt::Display;

/// Result alias used by every fallible tree operation.
pub type Result<T> = core::result::Result<T, TreeError>;

/// Errors reported by [`Tree`](crate::rb::tree::Tree) operations.
///
/// None of these leave the tree partially modified: every check happens
/// before the first link or color is touched.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// A rotation was requested on a node whose pivot child is the sentinel.
    InvalidRotation,
    /// The handle or key does not name a live node of this tree.
    NotFound,
    /// The tree holds no nodes, so there is no minimum, maximum or neighbour.
    EmptyTree,
}

impl Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRotation => write!(f, "Cannot rotate around a node without the pivot child"),
            Self::NotFound => write!(f, "Node is not present in this tree"),
            Self::EmptyTree => write!(f, "Tree is empty"),
        }
    }
}

impl std::error::Error for TreeError {}
