/// Key equality policy injected into a cache.
///
/// Lookups scan entries with this policy instead of hashing or structural identity, so two keys
/// may be considered equal even if their representations differ.
pub trait Equality<T: ?Sized> {
    fn are_equal(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Equality<T> for F {
    fn are_equal(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// [`Equality`] that delegates to [`PartialEq`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralEq;

impl<T: PartialEq + ?Sized> Equality<T> for StructuralEq {
    fn are_equal(&self, a: &T, b: &T) -> bool {
        a == b
    }
}
