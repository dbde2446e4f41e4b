use allocator_api2::alloc::Allocator;
use log::trace;

use crate::rb::{
    node::{ NodeColor, NodeDirection },
    tree::Tree
};

impl<K, C, A> Tree<K, C, A>
where A: Allocator
{
    // z is red, and the only possible violation is a red parent. Each pass
    // either pushes the violation two levels up (red uncle) or fixes it with
    // at most two rotations.
    pub(crate) fn insert_fixup(&mut self, mut z: usize) {
        // the sentinel is black, so this also stops at the root
        while self.color_of(self.parent_of(z)) == NodeColor::Red {
            let parent = self.parent_of(z);
            let grandparent = self.parent_of(parent);
            let side = self.direction_of(parent);
            let uncle = self.child_of(grandparent, side.opposite());
            if self.color_of(uncle) == NodeColor::Red {
                trace!("insert fixup at {}: red uncle {}, recolor", z, uncle);
                self.set_color(parent, NodeColor::Black);
                self.set_color(uncle, NodeColor::Black);
                self.set_color(grandparent, NodeColor::Red);
                // travel up 2 tree levels
                z = grandparent;
            } else {
                if self.direction_of(z) != side {
                    trace!("insert fixup at {}: inner grandchild, rotate parent {}", z, parent);
                    z = parent;
                    self.rotate(z, side);
                }
                let parent = self.parent_of(z);
                let grandparent = self.parent_of(parent);
                trace!("insert fixup at {}: outer grandchild, rotate grandparent {}", z, grandparent);
                self.set_color(parent, NodeColor::Black);
                self.set_color(grandparent, NodeColor::Red);
                self.rotate(grandparent, side.opposite());
            }
        }
        let root = self.root_index();
        self.set_color(root, NodeColor::Black);
    }

    // x carries an extra black. It may be the sentinel, whose parent field
    // was pointed at the splice position by the delete.
    pub(crate) fn delete_fixup(&mut self, mut x: usize) {
        while x != self.root_index() && self.color_of(x) == NodeColor::Black {
            let parent = self.parent_of(x);
            let side = match self.left_of(parent) == x {
                true => NodeDirection::Left,
                false => NodeDirection::Right
            };
            let far = side.opposite();
            let mut sibling = self.child_of(parent, far);
            if self.color_of(sibling) == NodeColor::Red {
                trace!("delete fixup at {}: red sibling {}", x, sibling);
                self.set_color(sibling, NodeColor::Black);
                self.set_color(parent, NodeColor::Red);
                self.rotate(parent, side);
                sibling = self.child_of(parent, far);
            }
            let near_child = self.child_of(sibling, side);
            let far_child = self.child_of(sibling, far);
            if self.color_of(near_child) == NodeColor::Black && self.color_of(far_child) == NodeColor::Black {
                trace!("delete fixup at {}: black nephews, push deficit to {}", x, parent);
                self.set_color(sibling, NodeColor::Red);
                x = parent;
                continue;
            }
            if self.color_of(far_child) == NodeColor::Black {
                trace!("delete fixup at {}: red near nephew {}", x, near_child);
                self.set_color(near_child, NodeColor::Black);
                self.set_color(sibling, NodeColor::Red);
                self.rotate(sibling, far);
                sibling = self.child_of(parent, far);
            }
            trace!("delete fixup at {}: red far nephew, rotate {}", x, parent);
            self.set_color(sibling, self.color_of(parent));
            self.set_color(parent, NodeColor::Black);
            let far_child = self.child_of(sibling, far);
            self.set_color(far_child, NodeColor::Black);
            self.rotate(parent, side);
            x = self.root_index();
        }
        self.set_color(x, NodeColor::Black);
    }
}

#[cfg(test)]
pub mod tests {
    use crate::{
        rb::{ node::NodeColor, tree::Tree },
        testing::init_logging
    };
    use std::error::Error;

    type TestReturn = Result<(), Box<dyn Error>>;

    #[test]
    pub fn ascending_inserts_stay_balanced() -> TestReturn {
        init_logging();
        let mut tree: Tree<u32> = Tree::new();
        for key in 0..1024 {
            tree.insert(key);
            tree.check_invariants()?;
        }
        // 2 * ceil(log2(n + 1))
        assert!(tree.height() <= 22, "Tree is too tall: {}", tree.height());
        Ok(())
    }

    #[test]
    pub fn descending_inserts_stay_balanced() -> TestReturn {
        let mut tree: Tree<u32> = Tree::new();
        for key in (0..1024).rev() {
            tree.insert(key);
            tree.check_invariants()?;
        }
        assert!(tree.height() <= 22, "Tree is too tall: {}", tree.height());
        Ok(())
    }

    #[test]
    pub fn red_sibling_case() -> TestReturn {
        init_logging();
        //        2B
        //      /    \
        //    1B      4R
        //           /  \
        //          3B   5B
        //                \
        //                 6R
        let mut tree: Tree<u32> = (1..=6).collect();
        let four = tree.search(&4)?;
        assert!(tree.color(four)? == NodeColor::Red, "4 should be red before the delete");
        // removing 1 sees red sibling 4 first
        tree.remove(&1)?;
        tree.check_invariants()?;
        let root = tree.root().ok_or("tree should have a root")?;
        assert!(*tree.key(root)? == 4, "4 should be rotated up to the root");
        assert!(tree.to_vec() == vec![2, 3, 4, 5, 6], "Unexpected contents {:?}", tree);
        Ok(())
    }

    #[test]
    pub fn red_near_nephew_case() -> TestReturn {
        init_logging();
        //      2B
        //     /  \
        //   1B    4B
        //        /
        //       3R
        let mut tree: Tree<u32> = [2, 1, 4, 3].into_iter().collect();
        tree.remove(&1)?;
        tree.check_invariants()?;
        // 3 is rotated to the right side first, then up to the root
        let root = tree.root().ok_or("tree should have a root")?;
        assert!(*tree.key(root)? == 3, "3 should end up at the root");
        assert!(tree.color(root)? == NodeColor::Black, "Root must be black");
        let two = tree.search(&2)?;
        let four = tree.search(&4)?;
        assert!(tree.color(two)? == NodeColor::Black && tree.color(four)? == NodeColor::Black,
            "Both children should be black");
        Ok(())
    }

    #[test]
    pub fn deficit_pushed_to_root() -> TestReturn {
        //    2B
        //   /  \
        //  1B  3B
        let mut tree: Tree<u32> = [2, 1, 3, 4].into_iter().collect();
        tree.remove(&4)?;
        tree.remove(&1)?;
        tree.check_invariants()?;
        let three = tree.search(&3)?;
        assert!(tree.color(three)? == NodeColor::Red, "Sibling should absorb the deficit by turning red");
        assert!(tree.black_height() == 1, "Black height should shrink to 1");
        Ok(())
    }
}
