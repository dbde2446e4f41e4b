use allocator_api2::{
    alloc::{ Allocator, Global },
    vec::Vec
};
use log::debug;
use std::{
    cmp::Ordering,
    fmt::Debug,
    marker::PhantomData,
    sync::atomic::{ AtomicU64, Ordering as AtomicOrdering }
};

use crate::{
    error::{ Result, TreeError },
    rb::{
        compare::{ CompareLess, TreeCompare },
        node::{ NodeColor, NodeDirection, NodeRef, TreeNode, NIL }
    }
};

// Handles carry the id of the tree that issued them.
static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Red-black tree over keys of type `K`, ordered by `C` and allocating its
/// node arena from `A`.
///
/// Duplicate keys are allowed; an equal key is placed to the right of the
/// existing ones. Node slots freed by deletion are recycled by later inserts.
pub struct Tree<K, C = CompareLess, A = Global>
where A: Allocator
{
    nodes: Vec<TreeNode<K>, A>,
    root: usize,
    free: usize,
    size: usize,
    id: u64,
    _comparison: PhantomData<C>
}

impl<K, C> Tree<K, C, Global> {
    pub fn new() -> Self { Self::new_in(Global) }
    pub fn with_capacity(capacity: usize) -> Self { Self::with_capacity_in(capacity, Global) }
}

impl<K, C> Default for Tree<K, C, Global> {
    fn default() -> Self { Self::new() }
}

impl<K, C, A> Tree<K, C, A>
where A: Allocator
{
    pub fn new_in(alloc: A) -> Self { Self::with_capacity_in(0, alloc) }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let mut nodes = Vec::with_capacity_in(capacity + 1, alloc);
        nodes.push(TreeNode::new_nil());
        Self {
            nodes,
            root: NIL,
            free: NIL,
            size: 0,
            id: NEXT_TREE_ID.fetch_add(1, AtomicOrdering::Relaxed),
            _comparison: PhantomData
        }
    }

    pub fn len(&self) -> usize { self.size }
    pub fn is_empty(&self) -> bool { self.size == 0 }

    /// Drops every key. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        for index in 1..self.nodes.len() {
            if self.nodes[index].is_live() {
                self.release_node(index);
            }
        }
        self.root = NIL;
        self.size = 0;
        self.reset_nil();
        debug!("cleared tree {}", self.id);
    }

    pub fn root(&self) -> Option<NodeRef> { self.link(self.root) }

    pub fn key(&self, node: NodeRef) -> Result<&K> {
        let index = self.resolve(node)?;
        self.key_of(index).ok_or(TreeError::NotFound)
    }

    pub fn color(&self, node: NodeRef) -> Result<NodeColor> {
        self.resolve(node).map(|index| self.color_of(index))
    }

    pub fn left(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        self.resolve(node).map(|index| self.link(self.left_of(index)))
    }

    pub fn right(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        self.resolve(node).map(|index| self.link(self.right_of(index)))
    }

    /// `None` for the root, whose parent is the sentinel.
    pub fn parent(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        self.resolve(node).map(|index| self.link(self.parent_of(index)))
    }

    // Keys must not change order relative to their neighbours; only map
    // values are mutated through this.
    pub(crate) fn key_mut(&mut self, node: NodeRef) -> Result<&mut K> {
        let index = self.resolve(node)?;
        self.nodes[index].data.as_mut().ok_or(TreeError::NotFound)
    }

    pub(crate) fn resolve(&self, node: NodeRef) -> Result<usize> {
        if node.tree != self.id || node.index == NIL { return Err(TreeError::NotFound) }
        match self.nodes.get(node.index) {
            Some(n) if n.is_live() && n.generation == node.generation => Ok(node.index),
            _ => Err(TreeError::NotFound)
        }
    }

    pub(crate) fn handle(&self, index: usize) -> NodeRef {
        NodeRef { tree: self.id, index, generation: self.nodes[index].generation }
    }

    pub(crate) fn link(&self, index: usize) -> Option<NodeRef> {
        match index {
            NIL => None,
            _ => Some(self.handle(index))
        }
    }

    pub(crate) fn root_index(&self) -> usize { self.root }
    pub(crate) fn set_root(&mut self, index: usize) { self.root = index }

    pub(crate) fn key_of(&self, n: usize) -> Option<&K> { self.nodes[n].data.as_ref() }
    pub(crate) fn color_of(&self, n: usize) -> NodeColor { self.nodes[n].color }
    pub(crate) fn left_of(&self, n: usize) -> usize { self.nodes[n].left }
    pub(crate) fn right_of(&self, n: usize) -> usize { self.nodes[n].right }
    pub(crate) fn parent_of(&self, n: usize) -> usize { self.nodes[n].parent }
    pub(crate) fn child_of(&self, n: usize, dir: NodeDirection) -> usize { self.nodes[n].child(dir) }

    pub(crate) fn set_color(&mut self, n: usize, color: NodeColor) {
        debug_assert!(n != NIL || color == NodeColor::Black, "Sentinel must stay black");
        self.nodes[n].color = color;
    }
    pub(crate) fn set_parent(&mut self, n: usize, parent: usize) { self.nodes[n].parent = parent }
    pub(crate) fn set_child(&mut self, n: usize, dir: NodeDirection, child: usize) {
        self.nodes[n].set_child(dir, child)
    }

    // NOTE: Assume that n is a real node. The root reports Left.
    pub(crate) fn direction_of(&self, n: usize) -> NodeDirection {
        match self.right_of(self.parent_of(n)) == n {
            true => NodeDirection::Right,
            false => NodeDirection::Left
        }
    }

    fn alloc_node(&mut self, data: K) -> usize {
        if self.free != NIL {
            let index = self.free;
            let slot = &mut self.nodes[index];
            self.free = slot.right;
            *slot = TreeNode::new_node(data, slot.generation);
            index
        } else {
            self.nodes.push(TreeNode::new_node(data, 0));
            self.nodes.len() - 1
        }
    }

    // Bumping the generation is what invalidates handles to this slot.
    fn release_node(&mut self, index: usize) -> Option<K> {
        let free = self.free;
        let slot = &mut self.nodes[index];
        let data = slot.data.take();
        slot.generation = slot.generation.wrapping_add(1);
        slot.left = NIL;
        slot.parent = NIL;
        slot.right = free;
        slot.color = NodeColor::Black;
        self.free = index;
        data
    }

    // sentinel links are scratch space; keep them tidy between operations
    fn reset_nil(&mut self) {
        let nil = &mut self.nodes[NIL];
        nil.left = NIL;
        nil.parent = NIL;
        nil.right = NIL;
        nil.color = NodeColor::Black;
    }

    // Puts v where u was under u's parent. v may be the sentinel, in which
    // case its parent field is set anyway so delete-fixup can climb from it.
    fn transplant(&mut self, u: usize, v: usize) {
        let parent = self.parent_of(u);
        if parent == NIL {
            self.root = v;
        } else if self.left_of(parent) == u {
            self.set_child(parent, NodeDirection::Left, v);
        } else {
            self.set_child(parent, NodeDirection::Right, v);
        }
        self.set_parent(v, parent);
    }
}

impl<K, C, A> Tree<K, C, A>
where C: TreeCompare<K>,
      A: Allocator
{
    /// Finds a node using `f`, which reports how each visited entry orders
    /// relative to the target (the convention of `slice::binary_search_by`).
    pub fn search_by<F>(&self, mut f: F) -> Result<NodeRef>
    where F: FnMut(&K) -> Ordering
    {
        let mut current = self.root;
        // the sentinel holds no key, which ends the walk
        while let Some(data) = self.key_of(current) {
            current = match f(data) {
                Ordering::Less => self.right_of(current),
                Ordering::Greater => self.left_of(current),
                Ordering::Equal => return Ok(self.handle(current))
            };
        }
        Err(TreeError::NotFound)
    }

    pub fn search(&self, key: &K) -> Result<NodeRef> {
        self.search_by(|entry| C::order(entry, key))
    }

    pub fn contains(&self, key: &K) -> bool { self.search(key).is_ok() }

    pub fn find(&self, key: &K) -> Option<&K> {
        self.search(key).ok().and_then(|n| self.key(n).ok())
    }

    /// Inserts `data` as a red leaf, then restores the red-black properties.
    pub fn insert(&mut self, data: K) -> NodeRef {
        let mut parent = NIL;
        let mut dir = NodeDirection::Left;
        let mut current = self.root;
        while let Some(existing) = self.key_of(current) {
            parent = current;
            // ties go right
            dir = match C::less(&data, existing) {
                true => NodeDirection::Left,
                false => NodeDirection::Right
            };
            current = self.child_of(current, dir);
        }
        let node = self.alloc_node(data);
        self.set_parent(node, parent);
        match parent {
            NIL => self.root = node,
            _ => self.set_child(parent, dir, node)
        };
        self.size += 1;
        self.insert_fixup(node);
        debug!("inserted node {} into tree {} (len {})", node, self.id, self.size);
        self.handle(node)
    }

    /// Unlinks `node`, rebalances, and returns its key.
    ///
    /// A node with two children is replaced by its in-order successor, which
    /// is moved into its place rather than having its key copied across. Only
    /// the handle to `node` goes stale; handles to every other node, the
    /// successor included, keep resolving to the same keys.
    pub fn delete(&mut self, node: NodeRef) -> Result<K> {
        let z = self.resolve(node)?;
        let mut removed_color = self.color_of(z);
        let x;
        if self.left_of(z) == NIL {
            x = self.right_of(z);
            self.transplant(z, x);
        } else if self.right_of(z) == NIL {
            x = self.left_of(z);
            self.transplant(z, x);
        } else {
            // two children: the successor y takes z's place and z's color
            let y = self.subtree_min_index(self.right_of(z));
            removed_color = self.color_of(y);
            x = self.right_of(y);
            if self.parent_of(y) == z {
                self.set_parent(x, y);
            } else {
                self.transplant(y, x);
                let right = self.right_of(z);
                self.set_child(y, NodeDirection::Right, right);
                self.set_parent(right, y);
            }
            self.transplant(z, y);
            let left = self.left_of(z);
            self.set_child(y, NodeDirection::Left, left);
            self.set_parent(left, y);
            self.set_color(y, self.color_of(z));
        }
        if removed_color == NodeColor::Black {
            self.delete_fixup(x);
        }
        self.reset_nil();
        self.size -= 1;
        debug!("deleted node {} from tree {} (len {})", z, self.id, self.size);
        self.release_node(z).ok_or(TreeError::NotFound)
    }

    pub fn remove(&mut self, key: &K) -> Result<K> {
        let node = self.search(key)?;
        self.delete(node)
    }
}

impl<K, C, A> Extend<K> for Tree<K, C, A>
where C: TreeCompare<K>,
      A: Allocator
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for data in iter { self.insert(data); }
    }
}

impl<K, C> FromIterator<K> for Tree<K, C, Global>
where C: TreeCompare<K>
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, C, A> Debug for Tree<K, C, A>
where K: Debug,
      A: Allocator
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
