//! Niche representations.
//!
//! A niche of a type `T` is a bit pattern that no valid `T` can ever have. A
//! slot holding the niche is not a `T` at all: it must never be read as one,
//! and it needs no destructor. The only valid operations on it are writing a
//! real value over it and asking [`Niche::is_niche`].
//!
//! Niches let a two-alternative [`Choice`] drop its discriminant entirely, see
//! [`Niched`].
//!
//! [`Choice`]: crate::Choice
//! [`Niched`]: crate::storage::Niched

use core::{
    cmp::Ordering,
    marker::PhantomData,
    num::{
        NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU128,
        NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize,
    },
    ptr::{self, NonNull},
};

/// Types with a reserved invalid bit pattern.
///
/// # Safety
///
/// - [`write_niche`] must write a bit pattern that differs from every valid
///   value of `Self`, and that stays so for as long as the slot is not written
///   again.
/// - [`is_niche`] must return `true` for a slot written by [`write_niche`] and
///   `false` for a slot holding any valid value.
/// - Neither function may read or write outside of `size_of::<Self>()` bytes
///   at `slot`.
///
/// [`write_niche`]: Niche::write_niche
/// [`is_niche`]: Niche::is_niche
pub unsafe trait Niche: Sized {
    /// Writes the niche into `slot` without dropping its previous contents.
    ///
    /// `slot` must be valid for writes and aligned.
    fn write_niche(slot: *mut Self);

    /// Whether `slot` holds the niche.
    ///
    /// # Safety
    ///
    /// `slot` must point to either a valid value or a niche written by
    /// [`Niche::write_niche`].
    unsafe fn is_niche(slot: *const Self) -> bool;
}

// Reference-like types are niched by null.

unsafe impl<T> Niche for &T {
    fn write_niche(slot: *mut Self) {
        unsafe { slot.cast::<*const T>().write(ptr::null()) }
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { slot.cast::<*const T>().read().is_null() }
    }
}

unsafe impl<T> Niche for &mut T {
    fn write_niche(slot: *mut Self) {
        unsafe { slot.cast::<*mut T>().write(ptr::null_mut()) }
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { slot.cast::<*mut T>().read().is_null() }
    }
}

unsafe impl<T> Niche for NonNull<T> {
    fn write_niche(slot: *mut Self) {
        unsafe { slot.cast::<*mut T>().write(ptr::null_mut()) }
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { slot.cast::<*mut T>().read().is_null() }
    }
}

#[cfg(feature = "alloc")]
unsafe impl<T> Niche for alloc::boxed::Box<T> {
    fn write_niche(slot: *mut Self) {
        unsafe { slot.cast::<*mut T>().write(ptr::null_mut()) }
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { slot.cast::<*mut T>().read().is_null() }
    }
}

macro_rules! nonzero_niche {
    ($($nz:ty => $int:ty),* $(,)?) => {$(
        unsafe impl Niche for $nz {
            fn write_niche(slot: *mut Self) {
                unsafe { slot.cast::<$int>().write(0) }
            }

            unsafe fn is_niche(slot: *const Self) -> bool {
                unsafe { slot.cast::<$int>().read() == 0 }
            }
        }
    )*};
}

nonzero_niche! {
    NonZeroU8 => u8,
    NonZeroU16 => u16,
    NonZeroU32 => u32,
    NonZeroU64 => u64,
    NonZeroU128 => u128,
    NonZeroUsize => usize,
    NonZeroI8 => i8,
    NonZeroI16 => i16,
    NonZeroI32 => i32,
    NonZeroI64 => i64,
    NonZeroI128 => i128,
    NonZeroIsize => isize,
}

unsafe impl Niche for bool {
    fn write_niche(slot: *mut Self) {
        unsafe { slot.cast::<u8>().write(2) }
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { slot.cast::<u8>().read() > 1 }
    }
}

unsafe impl Niche for char {
    fn write_niche(slot: *mut Self) {
        unsafe { slot.cast::<u32>().write(0x11_0000) }
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { slot.cast::<u32>().read() > char::MAX as u32 }
    }
}

unsafe impl Niche for Ordering {
    fn write_niche(slot: *mut Self) {
        unsafe { slot.cast::<i8>().write(2) }
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { !(-1..=1).contains(&slot.cast::<i8>().read()) }
    }
}

/// Zero-sized "no value" markers that can stand next to a [`Niche`] in a
/// [`Niched`] layout.
///
/// A niched choice keeps no bytes for the marker, so reading it conjures a
/// value from nothing. That is what `Copy + Default` vouches for.
///
/// # Safety
///
/// `Self` must be zero-sized.
///
/// [`Niched`]: crate::storage::Niched
pub unsafe trait Unit: Copy + Default {}

unsafe impl Unit for () {}

unsafe impl<T: ?Sized> Unit for PhantomData<T> {}

#[cfg(test)]
mod tests {
    use core::mem::MaybeUninit;

    use super::*;

    fn check<T: Niche>(value: T) {
        let mut slot = MaybeUninit::new(value);
        assert!(!unsafe { T::is_niche(slot.as_ptr()) });
        unsafe { slot.assume_init_drop() };

        T::write_niche(slot.as_mut_ptr());
        assert!(unsafe { T::is_niche(slot.as_ptr()) });
    }

    #[test]
    fn builtin() {
        let x = 5;
        let mut y = 6;
        check(&x);
        check(&mut y);
        check(NonNull::from(&x));
        check(NonZeroU32::new(7).unwrap());
        check(NonZeroI64::new(-1).unwrap());
        check(true);
        check(false);
        check('x');
        check(char::MAX);
        check(Ordering::Less);
        check(Ordering::Greater);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn boxed() {
        check(alloc::boxed::Box::new(12u64));
    }
}
