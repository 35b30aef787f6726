//! Collaborator seams of the queue: the transformation callback and the
//! optional key-extension hook.

use std::marker::PhantomData;

use crate::types::Scoped;

/// Transformation applied by the queue to a contiguous run of elements.
///
/// `prefix` is the scope context the run was grouped under. The returned
/// sequence replaces the run in the output and may have any length.
///
/// Any `Fn(Vec<T>, &[T::Scope]) -> Result<Vec<T>, E>` is a callback.
pub trait Callback<T: Scoped, E> {
    fn apply(&self, elements: Vec<T>, prefix: &[T::Scope]) -> Result<Vec<T>, E>;
}

impl<T, E, F> Callback<T, E> for F
where
    T: Scoped,
    F: Fn(Vec<T>, &[T::Scope]) -> Result<Vec<T>, E>,
{
    fn apply(&self, elements: Vec<T>, prefix: &[T::Scope]) -> Result<Vec<T>, E> {
        self(elements, prefix)
    }
}

/// Extra key component appended to the scope prefix when grouping at a level.
///
/// Two adjacent elements with equal scope prefixes still end up in different
/// runs when their sub-keys differ.
pub trait KeyHook<T: Scoped, E> {
    type SubKey: PartialEq;

    fn sub_key(&self, element: &T, level: usize) -> Result<Self::SubKey, E>;
}

/// Default hook: contributes nothing to the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoKeyHook;

impl<T: Scoped, E> KeyHook<T, E> for NoKeyHook {
    type SubKey = ();

    fn sub_key(&self, _element: &T, _level: usize) -> Result<(), E> {
        Ok(())
    }
}

/// Adapts a closure `Fn(&T, usize) -> Result<K, E>` into a [`KeyHook`].
pub struct FnKeyHook<F, K> {
    hook: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> FnKeyHook<F, K> {
    pub fn new(hook: F) -> Self {
        Self {
            hook,
            _key: PhantomData,
        }
    }
}

impl<F: Clone, K> Clone for FnKeyHook<F, K> {
    fn clone(&self) -> Self {
        Self::new(self.hook.clone())
    }
}

impl<F, K> std::fmt::Debug for FnKeyHook<F, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnKeyHook").finish_non_exhaustive()
    }
}

impl<T, E, K, F> KeyHook<T, E> for FnKeyHook<F, K>
where
    T: Scoped,
    K: PartialEq,
    F: Fn(&T, usize) -> Result<K, E>,
{
    type SubKey = K;

    fn sub_key(&self, element: &T, level: usize) -> Result<K, E> {
        (self.hook)(element, level)
    }
}
