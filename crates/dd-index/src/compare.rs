//! Injected total orders.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator; named unit structs
/// implementing the trait are preferable when the tree lives in a struct
/// field and the type must be spelled out.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders values by their own `Ord` impl.
#[derive(Copy, Clone, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
