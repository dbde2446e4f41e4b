use allocator_api2::alloc::{ Allocator, Global };

use crate::rb::{
    compare::{ CompareLess, TreeCompare },
    traverse::TreeIterator,
    tree::Tree
};

/// Ordered set of unique values.
pub struct Set<T, C = CompareLess, A = Global>
where A: Allocator
{
    _impl: Tree<T, C, A>
}

impl<T, C> Set<T, C, Global>
where C: TreeCompare<T>
{
    pub fn new() -> Self { Self::new_in(Global) }
}

impl<T, C> Default for Set<T, C, Global>
where C: TreeCompare<T>
{
    fn default() -> Self { Self::new() }
}

impl<T, C, A> Set<T, C, A>
where C: TreeCompare<T>,
      A: Allocator
{
    pub fn new_in(alloc: A) -> Self { Self { _impl: Tree::new_in(alloc) } }
    /// Returns false, leaving the set unchanged, if an equal value is present.
    pub fn insert(&mut self, value: T) -> bool {
        if self._impl.contains(&value) { return false }
        self._impl.insert(value);
        true
    }
    pub fn remove(&mut self, value: &T) -> bool { self._impl.remove(value).is_ok() }
    pub fn len(&self) -> usize { self._impl.len() }
    pub fn is_empty(&self) -> bool { self._impl.is_empty() }
    pub fn clear(&mut self) { self._impl.clear() }
    pub fn contains(&self, value: &T) -> bool { self._impl.contains(value) }
    pub fn find(&self, value: &T) -> Option<&T> { self._impl.find(value) }
    pub fn first(&self) -> Option<&T> { self._impl.minimum().ok().and_then(|n| self._impl.key(n).ok()) }
    pub fn last(&self) -> Option<&T> { self._impl.maximum().ok().and_then(|n| self._impl.key(n).ok()) }
    pub fn iter(&self) -> TreeIterator<'_, T, C, A> { self._impl.iter() }
}

impl<T, C, A> Set<T, C, A>
where T: Clone,
      C: TreeCompare<T>,
      A: Allocator
{
    pub fn to_vec(&self) -> Vec<T> { self._impl.to_vec() }
}

impl<T, C> FromIterator<T> for Set<T, C, Global>
where C: TreeCompare<T>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter { set.insert(value); }
        set
    }
}

impl<'a, T, C, A> IntoIterator for &'a Set<T, C, A>
where C: TreeCompare<T>,
      A: Allocator
{
    type Item = &'a T;
    type IntoIter = TreeIterator<'a, T, C, A>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[cfg(test)]
pub mod tests {
    use super::Set;
    use crate::rb::compare::CompareGreater;
    use std::error::Error;

    type TestReturn = Result<(), Box<dyn Error>>;

    #[test]
    pub fn set_rejects_duplicates() -> TestReturn {
        let mut set: Set<u32> = Set::new();
        assert!(set.insert(4), "First insert should succeed");
        assert!(!set.insert(4), "Duplicate insert should be rejected");
        assert!(set.insert(2), "New value should be inserted");
        assert!(set.len() == 2, "Set should hold 2 values instead of {}", set.len());
        assert!(set.to_vec() == vec![2, 4], "Set should be ordered");
        Ok(())
    }

    #[test]
    pub fn set_remove_and_bounds() -> TestReturn {
        let mut set: Set<&str> = ["pear", "apple", "fig", "apple"].into_iter().collect();
        assert!(set.len() == 3, "Duplicate apple should be dropped");
        assert!(set.first() == Some(&"apple") && set.last() == Some(&"pear"), "Bounds are wrong");
        assert!(set.remove(&"fig"), "fig should be removed");
        assert!(!set.remove(&"fig"), "fig is already gone");
        assert!(!set.contains(&"fig"), "fig should not be found");
        let collected: Vec<&str> = set.iter().copied().collect();
        assert!(collected == vec!["apple", "pear"], "Unexpected contents {:?}", collected);
        set.clear();
        assert!(set.is_empty() && set.first().is_none(), "Cleared set should be empty");
        Ok(())
    }

    #[test]
    pub fn set_with_descending_order() -> TestReturn {
        let set: Set<i32, CompareGreater> = [1, 5, -3, 5].into_iter().collect();
        assert!(set.to_vec() == vec![5, 1, -3], "Set should iterate high to low");
        assert!(set.find(&-3) == Some(&-3), "find should return the stored value");
        Ok(())
    }
}
