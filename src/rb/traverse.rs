use allocator_api2::alloc::Allocator;

use crate::{
    error::{ Result, TreeError },
    rb::{
        node::{ NodeRef, NIL },
        tree::Tree
    }
};

impl<K, C, A> Tree<K, C, A>
where A: Allocator
{
    pub(crate) fn subtree_min_index(&self, mut n: usize) -> usize {
        while self.left_of(n) != NIL { n = self.left_of(n) }
        n
    }

    pub(crate) fn subtree_max_index(&self, mut n: usize) -> usize {
        while self.right_of(n) != NIL { n = self.right_of(n) }
        n
    }

    // Returns NIL past the last node: the walk climbs until it is no longer
    // a right child, and the sentinel above the root stops it.
    pub(crate) fn successor_index(&self, mut n: usize) -> usize {
        if self.right_of(n) != NIL {
            return self.subtree_min_index(self.right_of(n));
        }
        let mut parent = self.parent_of(n);
        while parent != NIL && n == self.right_of(parent) {
            n = parent;
            parent = self.parent_of(parent);
        }
        parent
    }

    pub(crate) fn predecessor_index(&self, mut n: usize) -> usize {
        if self.left_of(n) != NIL {
            return self.subtree_max_index(self.left_of(n));
        }
        let mut parent = self.parent_of(n);
        while parent != NIL && n == self.left_of(parent) {
            n = parent;
            parent = self.parent_of(parent);
        }
        parent
    }

    fn non_empty_root(&self) -> Result<usize> {
        match self.root_index() {
            NIL => Err(TreeError::EmptyTree),
            root => Ok(root)
        }
    }

    // an empty tree reports EmptyTree before the handle is looked at
    fn resolve_in_non_empty(&self, node: NodeRef) -> Result<usize> {
        self.non_empty_root()?;
        self.resolve(node)
    }

    /// Node holding the smallest key.
    pub fn minimum(&self) -> Result<NodeRef> {
        let root = self.non_empty_root()?;
        Ok(self.handle(self.subtree_min_index(root)))
    }

    /// Node holding the largest key.
    pub fn maximum(&self) -> Result<NodeRef> {
        let root = self.non_empty_root()?;
        Ok(self.handle(self.subtree_max_index(root)))
    }

    pub fn subtree_minimum(&self, node: NodeRef) -> Result<NodeRef> {
        let n = self.resolve_in_non_empty(node)?;
        Ok(self.handle(self.subtree_min_index(n)))
    }

    pub fn subtree_maximum(&self, node: NodeRef) -> Result<NodeRef> {
        let n = self.resolve_in_non_empty(node)?;
        Ok(self.handle(self.subtree_max_index(n)))
    }

    /// Next node in key order, or `Ok(None)` after the last one.
    pub fn successor(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        let n = self.resolve_in_non_empty(node)?;
        Ok(self.link(self.successor_index(n)))
    }

    /// Previous node in key order, or `Ok(None)` before the first one.
    pub fn predecessor(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        let n = self.resolve_in_non_empty(node)?;
        Ok(self.link(self.predecessor_index(n)))
    }

    /// Height in nodes of the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root_index(), 1)];
        while let Some((n, depth)) = stack.pop() {
            if n == NIL { continue }
            deepest = deepest.max(depth);
            stack.push((self.left_of(n), depth + 1));
            stack.push((self.right_of(n), depth + 1));
        }
        deepest
    }

    pub fn iter(&self) -> TreeIterator<'_, K, C, A> { self.into_iter() }
}

impl<K, C, A> Tree<K, C, A>
where K: Clone,
      A: Allocator
{
    /// All keys in order.
    pub fn to_vec(&self) -> Vec<K> {
        self.iter().cloned().collect()
    }
}

impl<'a, K, C, A> IntoIterator for &'a Tree<K, C, A>
where A: Allocator
{
    type Item = &'a K;
    type IntoIter = TreeIterator<'a, K, C, A>;
    fn into_iter(self) -> Self::IntoIter {
        // inorder traversal, so get leftmost node
        let mut iter = TreeIterator { tree: self, stack: vec![], remaining: self.len() };
        iter.push_left_spine(self.root_index());
        iter
    }
}

/// In-order iterator over the keys of a [`Tree`].
///
/// Holds its own stack of pending ancestors, so any number of iterators can
/// walk the same tree at once.
pub struct TreeIterator<'a, K, C, A>
where A: Allocator
{
    tree: &'a Tree<K, C, A>,
    stack: Vec<usize>,
    remaining: usize
}

impl<'a, K, C, A> TreeIterator<'a, K, C, A>
where A: Allocator
{
    fn push_left_spine(&mut self, mut n: usize) {
        while n != NIL {
            self.stack.push(n);
            n = self.tree.left_of(n);
        }
    }
}

impl<'a, K, C, A> Iterator for TreeIterator<'a, K, C, A>
where A: Allocator
{
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let out = self.stack.pop()?;
        self.push_left_spine(tree.right_of(out));
        self.remaining -= 1;
        tree.key_of(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, C, A> ExactSizeIterator for TreeIterator<'a, K, C, A>
where A: Allocator
{}
