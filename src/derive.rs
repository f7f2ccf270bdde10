//! Per-alternative implementations of the standard traits, resolved at run
//! time by the active tag.
//!
//! Each function receives untyped pointers to the active slot; see
//! [`crate::repr`] for why one pointer serves every index.

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use crate::repr::SumList;

pub trait SumClone: SumList {
    #[doc(hidden)]
    unsafe fn clone_at(src: *const (), dst: *mut (), tag: u8);

    #[doc(hidden)]
    unsafe fn clone_from_at(dst: *mut (), src: *const (), tag: u8);
}

impl SumClone for () {
    unsafe fn clone_at(_: *const (), _: *mut (), _: u8) {}

    unsafe fn clone_from_at(_: *mut (), _: *const (), _: u8) {}
}

impl<Head: Clone, Tail: SumClone> SumClone for (Head, Tail) {
    unsafe fn clone_at(src: *const (), dst: *mut (), tag: u8) {
        if tag == 0 {
            unsafe { dst.cast::<Head>().write((*src.cast::<Head>()).clone()) }
        } else {
            unsafe { Tail::clone_at(src, dst, tag - 1) }
        }
    }

    unsafe fn clone_from_at(dst: *mut (), src: *const (), tag: u8) {
        if tag == 0 {
            unsafe { (*dst.cast::<Head>()).clone_from(&*src.cast::<Head>()) }
        } else {
            unsafe { Tail::clone_from_at(dst, src, tag - 1) }
        }
    }
}

pub trait SumPartialEq<Rhs: SumList = Self>: SumList {
    #[doc(hidden)]
    unsafe fn eq_at(this: *const (), that: *const (), tag: u8) -> bool;
}

impl SumPartialEq for () {
    unsafe fn eq_at(_: *const (), _: *const (), _: u8) -> bool {
        true
    }
}

impl<Head, Tail, Head2, Tail2> SumPartialEq<(Head2, Tail2)> for (Head, Tail)
where
    Head: PartialEq<Head2>,
    Tail: SumPartialEq<Tail2>,
    Tail2: SumList,
{
    unsafe fn eq_at(this: *const (), that: *const (), tag: u8) -> bool {
        if tag == 0 {
            unsafe { *this.cast::<Head>() == *that.cast::<Head2>() }
        } else {
            unsafe { Tail::eq_at(this, that, tag - 1) }
        }
    }
}

pub trait SumPartialOrd<Rhs: SumList = Self>: SumPartialEq<Rhs> {
    #[doc(hidden)]
    unsafe fn partial_cmp_at(this: *const (), that: *const (), tag: u8) -> Option<Ordering>;
}

impl SumPartialOrd for () {
    unsafe fn partial_cmp_at(_: *const (), _: *const (), _: u8) -> Option<Ordering> {
        Some(Ordering::Equal)
    }
}

impl<Head, Tail, Head2, Tail2> SumPartialOrd<(Head2, Tail2)> for (Head, Tail)
where
    Head: PartialOrd<Head2>,
    Tail: SumPartialOrd<Tail2>,
    Tail2: SumList,
{
    unsafe fn partial_cmp_at(this: *const (), that: *const (), tag: u8) -> Option<Ordering> {
        if tag == 0 {
            unsafe { (*this.cast::<Head>()).partial_cmp(&*that.cast::<Head2>()) }
        } else {
            unsafe { Tail::partial_cmp_at(this, that, tag - 1) }
        }
    }
}

pub trait SumOrd: SumPartialOrd {
    #[doc(hidden)]
    unsafe fn cmp_at(this: *const (), that: *const (), tag: u8) -> Ordering;
}

impl SumOrd for () {
    unsafe fn cmp_at(_: *const (), _: *const (), _: u8) -> Ordering {
        Ordering::Equal
    }
}

impl<Head: Ord, Tail: SumOrd> SumOrd for (Head, Tail) {
    unsafe fn cmp_at(this: *const (), that: *const (), tag: u8) -> Ordering {
        if tag == 0 {
            unsafe { (*this.cast::<Head>()).cmp(&*that.cast::<Head>()) }
        } else {
            unsafe { Tail::cmp_at(this, that, tag - 1) }
        }
    }
}

pub trait SumHash: SumList {
    #[doc(hidden)]
    unsafe fn hash_at<H: Hasher>(this: *const (), tag: u8, state: &mut H);
}

impl SumHash for () {
    unsafe fn hash_at<H: Hasher>(_: *const (), _: u8, _: &mut H) {}
}

impl<Head: Hash, Tail: SumHash> SumHash for (Head, Tail) {
    unsafe fn hash_at<H: Hasher>(this: *const (), tag: u8, state: &mut H) {
        if tag == 0 {
            unsafe { (*this.cast::<Head>()).hash(state) }
        } else {
            unsafe { Tail::hash_at(this, tag - 1, state) }
        }
    }
}

pub trait SumDebug: SumList {
    #[doc(hidden)]
    unsafe fn debug_at(this: *const (), tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl SumDebug for () {
    unsafe fn debug_at(_: *const (), _: u8, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl<Head: fmt::Debug, Tail: SumDebug> SumDebug for (Head, Tail) {
    unsafe fn debug_at(this: *const (), tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if tag == 0 {
            fmt::Debug::fmt(unsafe { &*this.cast::<Head>() }, f)
        } else {
            unsafe { Tail::debug_at(this, tag - 1, f) }
        }
    }
}
