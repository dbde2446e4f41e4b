use std::{
    cmp::Ordering,
    marker::PhantomData
};

use crate::rb::map::MapPair;

/// Total order over stored entries, supplied as a type rather than a value so
/// the tree carries no comparator state.
pub trait TreeCompare<T: ?Sized> {
    fn less(d0: &T, d1: &T) -> bool;

    /// Equal when neither entry is less than the other.
    fn order(d0: &T, d1: &T) -> Ordering {
        if Self::less(d0, d1) {
            Ordering::Less
        } else if Self::less(d1, d0) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

pub struct CompareLess; // ascending
impl<T> TreeCompare<T> for CompareLess
where T: PartialOrd + ?Sized
{
    fn less(d0: &T, d1: &T) -> bool { d0 < d1 }
}

pub struct CompareGreater; // descending
impl<T> TreeCompare<T> for CompareGreater
where T: PartialOrd + ?Sized
{
    fn less(d0: &T, d1: &T) -> bool { d0 > d1 }
}

/// Orders [`MapPair`] entries by key only, using the key comparator `C`.
pub struct ByKey<C>(PhantomData<C>);
impl<C, K, V> TreeCompare<MapPair<K, V>> for ByKey<C>
where C: TreeCompare<K>
{
    fn less(d0: &MapPair<K, V>, d1: &MapPair<K, V>) -> bool {
        C::less(d0.get_key(), d1.get_key())
    }
}

#[cfg(test)]
pub mod tests {
    use super::{ ByKey, CompareGreater, CompareLess, TreeCompare };
    use crate::rb::map::MapPair;
    use std::{ cmp::Ordering, error::Error };

    type TestReturn = Result<(), Box<dyn Error>>;

    #[test]
    pub fn derived_order() -> TestReturn {
        assert!(<CompareLess as TreeCompare<u32>>::order(&1, &2) == Ordering::Less, "1 < 2 ascending");
        assert!(<CompareLess as TreeCompare<u32>>::order(&2, &2) == Ordering::Equal, "2 == 2 ascending");
        assert!(<CompareGreater as TreeCompare<u32>>::order(&1, &2) == Ordering::Greater, "1 sorts after 2 descending");
        assert!(<CompareLess as TreeCompare<str>>::less("abc", "abd"), "str should compare lexically");
        Ok(())
    }

    #[test]
    pub fn pairs_compare_by_key() -> TestReturn {
        let a = MapPair::new(3, "zzz");
        let b = MapPair::new(5, "aaa");
        assert!(<ByKey<CompareLess> as TreeCompare<MapPair<u32, &str>>>::less(&a, &b), "Value must not affect order");
        let c = MapPair::new(3, "aaa");
        assert!(<ByKey<CompareLess> as TreeCompare<MapPair<u32, &str>>>::order(&a, &c) == Ordering::Equal,
            "Same key should be equal regardless of value");
        Ok(())
    }
}
