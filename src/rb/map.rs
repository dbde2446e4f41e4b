use allocator_api2::alloc::{ Allocator, Global };

use crate::rb::{
    compare::{ ByKey, CompareLess, TreeCompare },
    node::NodeRef,
    tree::Tree
};

/// Key/value entry stored by [`Map`]. Ordered by key only.
#[derive(Debug, Clone)]
pub struct MapPair<K, V> {
    key: K,
    value: V
}

impl<K, V> MapPair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
    pub fn get_key(&self) -> &K { &self.key }
    pub fn get_value(&self) -> &V { &self.value }
    pub fn get_value_mut(&mut self) -> &mut V { &mut self.value }
    pub fn into_inner(self) -> (K, V) { (self.key, self.value) }
}

/// Ordered map with unique keys, ordered by `C`.
pub struct Map<K, V, C = CompareLess, A = Global>
where A: Allocator
{
    _impl: Tree<MapPair<K, V>, ByKey<C>, A>
}

impl<K, V, C> Map<K, V, C, Global>
where C: TreeCompare<K>
{
    pub fn new() -> Self { Self::new_in(Global) }
}

impl<K, V, C> Default for Map<K, V, C, Global>
where C: TreeCompare<K>
{
    fn default() -> Self { Self::new() }
}

impl<K, V, C, A> Map<K, V, C, A>
where C: TreeCompare<K>,
      A: Allocator
{
    pub fn new_in(alloc: A) -> Self { Self { _impl: Tree::new_in(alloc) } }
    pub fn len(&self) -> usize { self._impl.len() }
    pub fn is_empty(&self) -> bool { self._impl.is_empty() }
    pub fn clear(&mut self) { self._impl.clear() }

    fn search(&self, key: &K) -> Option<NodeRef> {
        self._impl.search_by(|entry| C::order(entry.get_key(), key)).ok()
    }

    /// Inserts or replaces, returning the previous value for `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(node) = self.search(&key) {
            if let Ok(pair) = self._impl.key_mut(node) {
                return Some(std::mem::replace(pair.get_value_mut(), value));
            }
        }
        self._impl.insert(MapPair::new(key, value));
        None
    }
    pub fn contains_key(&self, key: &K) -> bool { self.search(key).is_some() }
    pub fn get(&self, key: &K) -> Option<&V> {
        let node = self.search(key)?;
        self._impl.key(node).ok().map(|v| v.get_value())
    }
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.search(key)?;
        self._impl.key_mut(node).ok().map(|v| v.get_value_mut())
    }
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.search(key)?;
        self._impl.delete(node).ok().map(|v| v.into_inner().1)
    }
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self._impl.minimum().ok()?;
        self._impl.key(node).ok().map(|v| (v.get_key(), v.get_value()))
    }
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self._impl.maximum().ok()?;
        self._impl.key(node).ok().map(|v| (v.get_key(), v.get_value()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self._impl.iter().map(|v| (v.get_key(), v.get_value()))
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ { self.iter().map(|(k, _)| k) }
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ { self.iter().map(|(_, v)| v) }
}

impl<K, V, C> FromIterator<(K, V)> for Map<K, V, C, Global>
where C: TreeCompare<K>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter { map.insert(key, value); }
        map
    }
}
