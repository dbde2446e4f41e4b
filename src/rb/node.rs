/// Arena slot reserved for the sentinel. Every missing child, and the parent
/// of the root, points here.
pub(crate) const NIL: usize = 0;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeColor {
    Red = 0,
    Black
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeDirection {
    Left = 0,
    Right
}

impl NodeDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left
        }
    }
}

/// Handle to a node of a specific [`Tree`](crate::rb::tree::Tree).
///
/// A handle stays valid until its node is deleted or the tree is cleared.
/// After that every operation taking it reports
/// [`NotFound`](crate::error::TreeError::NotFound), even if the arena slot has
/// since been reused by another insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) tree: u64,
    pub(crate) index: usize,
    pub(crate) generation: u32
}

/// One arena slot. The sentinel and vacant slots hold no data; vacant slots
/// are chained through `right` into the tree's free list.
pub(crate) struct TreeNode<K> {
    pub(crate) left: usize,
    pub(crate) parent: usize,
    pub(crate) right: usize,
    pub(crate) color: NodeColor,
    pub(crate) generation: u32,
    pub(crate) data: Option<K>
}

impl<K> TreeNode<K> {
    pub(crate) fn new_nil() -> Self {
        Self {
            left: NIL,
            parent: NIL,
            right: NIL,
            color: NodeColor::Black,
            generation: 0,
            data: None
        }
    }

    // new nodes start red with both children on the sentinel
    pub(crate) fn new_node(data: K, generation: u32) -> Self {
        Self {
            left: NIL,
            parent: NIL,
            right: NIL,
            color: NodeColor::Red,
            generation,
            data: Some(data)
        }
    }

    pub(crate) fn is_live(&self) -> bool { self.data.is_some() }

    pub(crate) fn child(&self, dir: NodeDirection) -> usize {
        match dir {
            NodeDirection::Left => self.left,
            NodeDirection::Right => self.right
        }
    }

    pub(crate) fn set_child(&mut self, dir: NodeDirection, child: usize) {
        match dir {
            NodeDirection::Left => self.left = child,
            NodeDirection::Right => self.right = child
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::{ NodeColor, NodeDirection, TreeNode, NIL };
    use std::error::Error;

    type TestReturn = Result<(), Box<dyn Error>>;

    #[test]
    pub fn fresh_nodes() -> TestReturn {
        let nil: TreeNode<u32> = TreeNode::new_nil();
        assert!(nil.color == NodeColor::Black, "Sentinel must be black");
        assert!(!nil.is_live(), "Sentinel carries no key");
        let node = TreeNode::new_node(5u32, 3);
        assert!(node.color == NodeColor::Red, "Inserted nodes start red");
        assert!(node.left == NIL && node.right == NIL && node.parent == NIL, "New node links should be nil");
        assert!(node.generation == 3, "Generation should be kept");
        Ok(())
    }

    #[test]
    pub fn child_by_direction() -> TestReturn {
        let mut node = TreeNode::new_node(1u32, 0);
        node.set_child(NodeDirection::Left, 4);
        node.set_child(NodeDirection::Right, 7);
        assert!(node.child(NodeDirection::Left) == 4, "Left child should be 4");
        assert!(node.child(NodeDirection::Right) == 7, "Right child should be 7");
        assert!(NodeDirection::Left.opposite() == NodeDirection::Right, "Opposite of left is right");
        Ok(())
    }
}
