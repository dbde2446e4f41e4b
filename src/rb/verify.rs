use allocator_api2::alloc::Allocator;
use std::fmt::Display;

use crate::rb::{
    compare::TreeCompare,
    node::{ NodeColor, NIL },
    tree::Tree
};

/// First red-black or search-tree property found broken by
/// [`Tree::check_invariants`]. Node positions are arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    RedSentinel,
    RedRoot,
    RedChildOfRed { node: usize, parent: usize },
    BlackHeightMismatch { node: usize, left: usize, right: usize },
    OutOfOrder { node: usize },
    BrokenParentLink { node: usize },
    LengthMismatch { counted: usize, expected: usize }
}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RedSentinel => write!(f, "Sentinel is red"),
            Self::RedRoot => write!(f, "Root is red"),
            Self::RedChildOfRed { node, parent } => write!(f, "Red node {} has red parent {}", node, parent),
            Self::BlackHeightMismatch { node, left, right } =>
                write!(f, "Node {} has black height {} on the left and {} on the right", node, left, right),
            Self::OutOfOrder { node } => write!(f, "Node {} is out of key order", node),
            Self::BrokenParentLink { node } => write!(f, "Node {} does not point back to its parent", node),
            Self::LengthMismatch { counted, expected } =>
                write!(f, "Found {} nodes but the tree reports {}", counted, expected),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<K, C, A> Tree<K, C, A>
where A: Allocator
{
    /// Black height of the root, read off the leftmost path only.
    ///
    /// This is O(log n) and trusts that every path agrees; it does not check
    /// that they do. Use [`check_invariants`](Self::check_invariants) for that.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut n = self.root_index();
        while n != NIL {
            n = self.left_of(n);
            if self.color_of(n) == NodeColor::Black { height += 1 }
        }
        height
    }

    // Black height of n counted from below n down to and including the
    // sentinel, after checking both subtrees agree.
    fn checked_black_height(&self, n: usize) -> Result<usize, InvariantViolation> {
        if n == NIL { return Ok(0) }
        let mut heights = [0; 2];
        for (slot, child) in [self.left_of(n), self.right_of(n)].into_iter().enumerate() {
            if child != NIL {
                if self.parent_of(child) != n {
                    return Err(InvariantViolation::BrokenParentLink { node: child });
                }
                if self.color_of(child) == NodeColor::Red && self.color_of(n) == NodeColor::Red {
                    return Err(InvariantViolation::RedChildOfRed { node: child, parent: n });
                }
            }
            let below = self.checked_black_height(child)?;
            heights[slot] = below + (self.color_of(child) == NodeColor::Black) as usize;
        }
        match heights[0] == heights[1] {
            true => Ok(heights[0]),
            false => Err(InvariantViolation::BlackHeightMismatch { node: n, left: heights[0], right: heights[1] })
        }
    }
}

impl<K, C, A> Tree<K, C, A>
where C: TreeCompare<K>,
      A: Allocator
{
    /// Walks every root-to-sentinel path and checks all red-black and
    /// search-tree properties. Returns the black height of the root.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        if self.color_of(NIL) != NodeColor::Black {
            return Err(InvariantViolation::RedSentinel);
        }
        let root = self.root_index();
        if self.color_of(root) != NodeColor::Black {
            return Err(InvariantViolation::RedRoot);
        }
        if root != NIL && self.parent_of(root) != NIL {
            return Err(InvariantViolation::BrokenParentLink { node: root });
        }
        let height = self.checked_black_height(root)?;
        // in-order walk must never step down in key order
        let mut counted = 0;
        let mut previous: Option<&K> = None;
        let mut n = match root {
            NIL => NIL,
            _ => self.subtree_min_index(root)
        };
        while n != NIL {
            let data = match self.key_of(n) {
                Some(data) => data,
                None => return Err(InvariantViolation::OutOfOrder { node: n })
            };
            if let Some(prev) = previous {
                if C::less(data, prev) {
                    return Err(InvariantViolation::OutOfOrder { node: n });
                }
            }
            previous = Some(data);
            counted += 1;
            n = self.successor_index(n);
        }
        match counted == self.len() {
            true => Ok(height),
            false => Err(InvariantViolation::LengthMismatch { counted, expected: self.len() })
        }
    }
}
