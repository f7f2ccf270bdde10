//! Visiting the active alternative with one case per alternative.
//!
//! Cases are passed positionally, as a list built with [`t!`]: the `i`-th case
//! handles the `i`-th alternative, and a list of the wrong length does not
//! type-check. Exactly one case runs per call.
//!
//! A case is one of:
//!
//! | Form | Called as | Alternatives |
//! |---|---|---|
//! | closure `FnOnce(T) -> R` | `f(value)` | any |
//! | [`Indexed`] `FnOnce(usize, T) -> R` | `f(index, value)` | any |
//! | [`IndexOnly`] `FnOnce(usize) -> R` | `f(index)` | unit only |
//! | [`Nullary`] `FnOnce() -> R` | `f()` | unit only |
//!
//! `T` is `&A`, `&mut A` or `A` for [`Choice::dispatch`],
//! [`Choice::dispatch_mut`] and [`Choice::dispatch_into`] respectively. A unit
//! alternative may also use the first two forms, taking `()` as its value.
//!
//! [`t!`]: crate::t
//! [`Choice::dispatch`]: crate::Choice::dispatch
//! [`Choice::dispatch_mut`]: crate::Choice::dispatch_mut
//! [`Choice::dispatch_into`]: crate::Choice::dispatch_into

use core::ptr;

use crate::repr::SumList;

/// A callback for one alternative.
pub trait Case<T, R> {
    fn call(self, index: usize, value: T) -> R;
}

impl<F, T, R> Case<T, R> for F
where
    F: FnOnce(T) -> R,
{
    fn call(self, _: usize, value: T) -> R {
        self(value)
    }
}

/// A case that also receives the index of the alternative.
pub struct Indexed<F>(pub F);

impl<F, T, R> Case<T, R> for Indexed<F>
where
    F: FnOnce(usize, T) -> R,
{
    fn call(self, index: usize, value: T) -> R {
        (self.0)(index, value)
    }
}

/// A case for a unit alternative that only receives its index.
pub struct IndexOnly<F>(pub F);

/// A case for a unit alternative that receives nothing.
pub struct Nullary<F>(pub F);

macro_rules! unit_cases {
    ($($unit:ty),*) => {$(
        impl<'a, F, R> Case<$unit, R> for IndexOnly<F>
        where
            F: FnOnce(usize) -> R,
        {
            fn call(self, index: usize, _: $unit) -> R {
                (self.0)(index)
            }
        }

        impl<'a, F, R> Case<$unit, R> for Nullary<F>
        where
            F: FnOnce() -> R,
        {
            fn call(self, _: usize, _: $unit) -> R {
                (self.0)()
            }
        }
    )*};
}

unit_cases!(&'a (), &'a mut (), ());

pub trait DispatchRef<'a, C, R>: SumList {
    #[doc(hidden)]
    unsafe fn dispatch_ref(this: *const (), tag: u8, index: usize, cases: C) -> R;
}

pub trait DispatchMut<'a, C, R>: SumList {
    #[doc(hidden)]
    unsafe fn dispatch_mut(this: *mut (), tag: u8, index: usize, cases: C) -> R;
}

pub trait DispatchInto<C, R>: SumList {
    /// Moves the active alternative out of `this` and into its case.
    #[doc(hidden)]
    unsafe fn dispatch_into(this: *mut (), tag: u8, index: usize, cases: C) -> R;
}

impl<'a, R> DispatchRef<'a, (), R> for () {
    unsafe fn dispatch_ref(_: *const (), tag: u8, index: usize, _: ()) -> R {
        unreachable!("alternative {} is out of range", index + tag as usize)
    }
}

impl<'a, R> DispatchMut<'a, (), R> for () {
    unsafe fn dispatch_mut(_: *mut (), tag: u8, index: usize, _: ()) -> R {
        unreachable!("alternative {} is out of range", index + tag as usize)
    }
}

impl<R> DispatchInto<(), R> for () {
    unsafe fn dispatch_into(_: *mut (), tag: u8, index: usize, _: ()) -> R {
        unreachable!("alternative {} is out of range", index + tag as usize)
    }
}

impl<'a, Head: 'a, Tail, C, Cs, R> DispatchRef<'a, (C, Cs), R> for (Head, Tail)
where
    C: Case<&'a Head, R>,
    Tail: DispatchRef<'a, Cs, R>,
{
    unsafe fn dispatch_ref(this: *const (), tag: u8, index: usize, (case, rest): (C, Cs)) -> R {
        if tag == 0 {
            case.call(index, unsafe { &*this.cast::<Head>() })
        } else {
            unsafe { Tail::dispatch_ref(this, tag - 1, index + 1, rest) }
        }
    }
}

impl<'a, Head: 'a, Tail, C, Cs, R> DispatchMut<'a, (C, Cs), R> for (Head, Tail)
where
    C: Case<&'a mut Head, R>,
    Tail: DispatchMut<'a, Cs, R>,
{
    unsafe fn dispatch_mut(this: *mut (), tag: u8, index: usize, (case, rest): (C, Cs)) -> R {
        if tag == 0 {
            case.call(index, unsafe { &mut *this.cast::<Head>() })
        } else {
            unsafe { Tail::dispatch_mut(this, tag - 1, index + 1, rest) }
        }
    }
}

impl<Head, Tail, C, Cs, R> DispatchInto<(C, Cs), R> for (Head, Tail)
where
    C: Case<Head, R>,
    Tail: DispatchInto<Cs, R>,
{
    unsafe fn dispatch_into(this: *mut (), tag: u8, index: usize, (case, rest): (C, Cs)) -> R {
        if tag == 0 {
            case.call(index, unsafe { ptr::read(this.cast::<Head>()) })
        } else {
            unsafe { Tail::dispatch_into(this, tag - 1, index + 1, rest) }
        }
    }
}
