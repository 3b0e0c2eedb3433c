use std::cmp::Ordering;

/// Three-way key ordering used by [`SplayTree`](crate::index::SplayTree).
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator, so key types without an `Ord`
/// implementation (or needing a different order) can still be indexed.
pub trait KeyComparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> KeyComparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> KeyComparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
