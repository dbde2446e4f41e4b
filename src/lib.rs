//! Red-black tree with a per-tree sentinel node.
//!
//! Nodes live in an index arena owned by [`rb::tree::Tree`]; slot zero is the
//! shared black sentinel used in place of every missing child and as the
//! parent of the root. Callers hold [`rb::node::NodeRef`] handles, which are
//! checked against the arena before use.

pub mod error;
pub mod rb {
    pub mod compare;
    pub mod node;
    pub mod tree;
    pub mod rotate;
    pub mod fixup;
    pub mod traverse;
    pub mod verify;
    pub mod set;
    pub mod map;
}

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ Result, TreeError };
pub use rb::compare::{ ByKey, CompareGreater, CompareLess, TreeCompare };
pub use rb::map::{ Map, MapPair };
pub use rb::node::{ NodeColor, NodeDirection, NodeRef };
pub use rb::set::Set;
pub use rb::traverse::TreeIterator;
pub use rb::tree::Tree;
pub use rb::verify::InvariantViolation;
