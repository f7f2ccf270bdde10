//! An optional value as a two-alternative choice: "no value" at index 0,
//! the value at index 1.

use core::mem;

use crate::{
    storage::{Niched, Storage},
    tag::{U0, U1},
    Choice,
};

/// An optional `T`. When the compiler knows of a niche in `T`, "no value"
/// lives there and `Maybe<T>` is exactly as large as `T`.
///
/// ```rust
/// use core::mem::size_of;
/// use choice::Maybe;
///
/// assert_eq!(size_of::<Maybe<&u8>>(), size_of::<&u8>());
/// assert_eq!(size_of::<Maybe<u64>>(), 16);
/// ```
pub type Maybe<T> = Choice![(), T];

/// An optional `T` that stores "no value" in the [`Niche`] of `T`, so it is
/// exactly as large as `T`, including for niches only declared through
/// [`Niche`].
///
/// [`Niche`]: crate::niche::Niche
///
/// ```rust
/// use core::mem::size_of;
/// use choice::NicheMaybe;
///
/// assert_eq!(size_of::<NicheMaybe<&u32>>(), size_of::<&u32>());
///
/// let x = 7u32;
/// let m = NicheMaybe::some(&x);
/// assert_eq!(m.as_option(), Some(&&7));
/// ```
pub type NicheMaybe<T> = Choice![niched: (), T];

impl<T, S> Choice<((), (T, ())), S>
where
    S: Storage<List = ((), (T, ()))>,
{
    pub fn none() -> Self {
        Self::new::<(), U0>(())
    }

    pub fn some(value: T) -> Self {
        Self::new::<T, U1>(value)
    }

    pub fn is_some(&self) -> bool {
        self.is::<T, U1>()
    }

    pub fn is_none(&self) -> bool {
        self.is::<(), U0>()
    }

    pub fn as_option(&self) -> Option<&T> {
        self.get::<T, U1>()
    }

    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        self.get_mut::<T, U1>()
    }

    pub fn into_option(self) -> Option<T> {
        self.try_unwrap::<T, U1>().ok()
    }

    /// Stores `value`, dropping any previous one.
    pub fn insert(&mut self, value: T) -> &mut T {
        self.emplace::<T, U1>(value)
    }

    /// Takes the value out, leaving "no value" behind.
    pub fn take(&mut self) -> Option<T> {
        mem::replace(self, Self::none()).into_option()
    }
}

impl<T, S> From<Option<T>> for Choice<((), (T, ())), S>
where
    S: Storage<List = ((), (T, ()))>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::some(value),
            None => Self::none(),
        }
    }
}

impl<T, S> From<Choice<((), (T, ())), S>> for Option<T>
where
    S: Storage<List = ((), (T, ()))>,
{
    fn from(value: Choice<((), (T, ())), S>) -> Self {
        value.into_option()
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T: crate::Niche> Default for Choice<((), (T, ())), Niched<((), (T, ()))>> {
    fn default() -> Self {
        Self::none()
    }
}
