use allocator_api2::alloc::Allocator;
use log::trace;

use crate::{
    error::{ Result, TreeError },
    rb::{
        node::{ NodeDirection, NodeRef, NIL },
        tree::Tree
    }
};

impl<K, C, A> Tree<K, C, A>
where A: Allocator
{
    //
    //      p           p
    //     /           /
    //    n           r
    //   / \    =>   / \
    //  x   r       n   y
    //     / \     / \
    //    o  y    x   o
    //
    /// Rotates `node` down to the left, lifting its right child into its place.
    ///
    /// Only links change: the in-order sequence is preserved and colors are
    /// left alone, so the caller is responsible for the red-black properties.
    pub fn rotate_left(&mut self, node: NodeRef) -> Result<()> {
        self.checked_rotate(node, NodeDirection::Left)
    }

    //
    //        p           p
    //       /           /
    //      n           r
    //     / \    =>   / \
    //    r   y       x   n
    //   / \             / \
    //  x  o            o  y
    //
    /// Mirror of [`rotate_left`](Self::rotate_left): lifts the left child.
    pub fn rotate_right(&mut self, node: NodeRef) -> Result<()> {
        self.checked_rotate(node, NodeDirection::Right)
    }

    fn checked_rotate(&mut self, node: NodeRef, dir: NodeDirection) -> Result<()> {
        let n = self.resolve(node)?;
        if self.child_of(n, dir.opposite()) == NIL {
            return Err(TreeError::InvalidRotation);
        }
        self.rotate(n, dir);
        Ok(())
    }

    // Moves n down towards `dir`; its child on the other side (r) takes its
    // place and r's inner subtree (o) is handed over to n.
    // NOTE: Assume that r is a real node.
    pub(crate) fn rotate(&mut self, n: usize, dir: NodeDirection) {
        let up = dir.opposite();
        let r = self.child_of(n, up);
        debug_assert!(r != NIL, "Rotation pivot must not be the sentinel");
        trace!("rotate {:?} at {} (pivot {})", dir, n, r);
        let o = self.child_of(r, dir);
        self.set_child(n, up, o);
        if o != NIL { self.set_parent(o, n) }
        let p = self.parent_of(n);
        self.set_parent(r, p);
        if p == NIL {
            self.set_root(r);
        } else {
            match self.left_of(p) == n {
                true => self.set_child(p, NodeDirection::Left, r),
                false => self.set_child(p, NodeDirection::Right, r)
            }
        }
        self.set_child(r, dir, n);
        self.set_parent(n, r);
    }
}

#[cfg(test)]
pub mod tests {
    use crate::{
        error::TreeError,
        rb::tree::Tree,
        testing::init_logging
    };
    use std::error::Error;

    type TestReturn = Result<(), Box<dyn Error>>;

    fn three_node_tree() -> Tree<u32> {
        let mut tree = Tree::new();
        for key in [5, 3, 8] { tree.insert(key); }
        tree
    }

    #[test]
    pub fn rotate_left_at_root() -> TestReturn {
        init_logging();
        let mut tree = three_node_tree();
        let five = tree.root().ok_or("tree should have a root")?;
        let eight = tree.search(&8)?;
        tree.rotate_left(five)?;
        assert!(tree.root() == Some(eight), "8 should be the new root");
        assert!(tree.left(eight)? == Some(five), "5 should be the left child of 8");
        assert!(tree.parent(five)? == Some(eight), "5's parent should be 8");
        assert!(tree.parent(eight)? == None, "The new root has no parent");
        let three = tree.search(&3)?;
        assert!(tree.left(five)? == Some(three), "3 should stay under 5");
        assert!(tree.right(five)? == None, "8's old left subtree (nil) moves under 5");
        assert!(tree.to_vec() == vec![3, 5, 8], "Rotation must keep in-order sequence");
        Ok(())
    }

    #[test]
    pub fn rotations_are_inverse() -> TestReturn {
        init_logging();
        let mut tree: Tree<u32> = (1..=15).collect();
        let before = tree.to_vec();
        let root = tree.root().ok_or("tree should have a root")?;
        let left = tree.left(root)?.ok_or("root should have a left child")?;
        let right = tree.right(root)?.ok_or("root should have a right child")?;
        tree.rotate_right(root)?;
        assert!(tree.root() == Some(left), "Left child should be lifted to the root");
        tree.rotate_left(left)?;
        assert!(tree.root() == Some(root), "Root should be restored");
        assert!(tree.left(root)? == Some(left) && tree.right(root)? == Some(right), "Shape should be restored");
        assert!(tree.to_vec() == before, "Sequence should be unchanged");
        // rotations leave colors alone, so the restored tree is valid again
        tree.check_invariants()?;
        Ok(())
    }

    #[test]
    pub fn rotate_inner_node() -> TestReturn {
        let mut tree: Tree<u32> = (1..=31).collect();
        let before = tree.to_vec();
        let root = tree.root().ok_or("tree should have a root")?;
        // ascending inserts grow the right spine, so this has a right child
        let node = tree.right(root)?.ok_or("root should have a right child")?;
        let parent = tree.parent(node)?;
        let right = tree.right(node)?.ok_or("node should have a right child")?;
        tree.rotate_left(node)?;
        assert!(tree.parent(right)? == parent, "Pivot should take the old parent");
        assert!(tree.to_vec() == before, "Sequence should be unchanged");
        tree.rotate_right(right)?;
        assert!(tree.parent(node)? == parent, "Node should return under its parent");
        Ok(())
    }

    #[test]
    pub fn rotate_without_pivot() -> TestReturn {
        let mut tree: Tree<u32> = Tree::new();
        let only = tree.insert(1);
        assert!(tree.rotate_left(only) == Err(TreeError::InvalidRotation), "Leaf cannot rotate left");
        assert!(tree.rotate_right(only) == Err(TreeError::InvalidRotation), "Leaf cannot rotate right");
        tree.delete(only)?;
        assert!(tree.rotate_left(only) == Err(TreeError::NotFound), "Stale handle should be NotFound");
        Ok(())
    }
}
