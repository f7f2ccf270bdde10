//! The object wrapper: a slot that may or may not hold a value.
//!
//! Every alternative of a [`Choice`] lives in an [`Object`]. The slot itself
//! never knows whether it is initialized; the layer that owns it does.
//!
//! [`Choice`]: crate::Choice

use core::mem::MaybeUninit;

use crate::niche::Niche;

/// A possibly-uninitialized storage unit for a `T`.
///
/// `Object<T>` has the same layout as `T`. It is `Copy` exactly when `T` is,
/// so aggregates of objects keep bitwise copies whenever their contents allow
/// them.
#[repr(transparent)]
pub struct Object<T> {
    value: MaybeUninit<T>,
}

impl<T: Copy> Clone for Object<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy> Copy for Object<T> {}

impl<T> Object<T> {
    /// An object that holds nothing yet.
    pub const fn uninit() -> Self {
        Object {
            value: MaybeUninit::uninit(),
        }
    }

    /// An object holding `value`.
    pub const fn new(value: T) -> Self {
        Object {
            value: MaybeUninit::new(value),
        }
    }

    /// An object holding the niche of `T`.
    pub fn niche() -> Self
    where
        T: Niche,
    {
        let mut this = Self::uninit();
        this.construct_niche();
        this
    }

    pub const fn as_ptr(&self) -> *const T {
        self.value.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.value.as_mut_ptr()
    }

    /// Initializes the slot with `value`, returning a reference to it.
    ///
    /// Previous contents are overwritten without being dropped.
    pub fn construct_in_place(&mut self, value: T) -> &mut T {
        self.value.write(value)
    }

    /// Like [`Object::construct_in_place`], but builds the value with `f`.
    pub fn construct_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        self.value.write(f())
    }

    /// Writes the niche of `T` into the slot.
    ///
    /// Afterwards only another `construct_*` call or [`Object::is_niche`] are
    /// meaningful.
    pub fn construct_niche(&mut self)
    where
        T: Niche,
    {
        T::write_niche(self.value.as_mut_ptr());
    }

    /// Runs the destructor of the contained value.
    ///
    /// # Safety
    ///
    /// The slot must hold a valid `T`, which is left logically uninitialized.
    pub unsafe fn destroy_in_place(&mut self) {
        unsafe { self.value.assume_init_drop() }
    }

    /// Assigns `value` over the contained value, dropping the old one.
    ///
    /// # Safety
    ///
    /// The slot must hold a valid `T`.
    pub unsafe fn assign(&mut self, value: T) -> &mut T {
        let slot = unsafe { self.value.assume_init_mut() };
        *slot = value;
        slot
    }

    /// Whether the slot holds the niche of `T`.
    ///
    /// # Safety
    ///
    /// The slot must hold either a valid `T` or the niche.
    pub unsafe fn is_niche(&self) -> bool
    where
        T: Niche,
    {
        unsafe { T::is_niche(self.value.as_ptr()) }
    }

    /// # Safety
    ///
    /// The slot must hold a valid `T`.
    pub unsafe fn assume_init_ref(&self) -> &T {
        unsafe { self.value.assume_init_ref() }
    }

    /// # Safety
    ///
    /// The slot must hold a valid `T`.
    pub unsafe fn assume_init_mut(&mut self) -> &mut T {
        unsafe { self.value.assume_init_mut() }
    }

    /// Moves the value out, leaving the slot logically uninitialized.
    ///
    /// # Safety
    ///
    /// The slot must hold a valid `T`.
    pub unsafe fn take(&mut self) -> T {
        unsafe { self.value.assume_init_read() }
    }
}

#[cfg(test)]
mod tests {
    use std::{rc::Rc, string::String};

    use super::*;

    #[test]
    fn lifecycle() {
        let tracker = Rc::new(());
        let mut obj = Object::new(tracker.clone());
        assert_eq!(Rc::strong_count(&tracker), 2);

        unsafe { obj.assign(tracker.clone()) };
        assert_eq!(Rc::strong_count(&tracker), 2);

        unsafe { obj.destroy_in_place() };
        assert_eq!(Rc::strong_count(&tracker), 1);

        obj.construct_with(|| tracker.clone());
        let taken = unsafe { obj.take() };
        assert_eq!(Rc::strong_count(&taken), 2);
    }

    #[test]
    fn niche() {
        let x = 42;
        let mut obj = Object::<&i32>::niche();
        assert!(unsafe { obj.is_niche() });

        obj.construct_in_place(&x);
        assert!(!unsafe { obj.is_niche() });
        assert_eq!(**unsafe { obj.assume_init_ref() }, 42);
    }

    #[test]
    fn copy_follows_contents() {
        let obj = Object::new(7u64);
        let copy = obj;
        assert_eq!(unsafe { *obj.assume_init_ref() }, 7);
        assert_eq!(unsafe { *copy.assume_init_ref() }, 7);

        let mut s = Object::new(String::from("owned"));
        assert_eq!(unsafe { s.take() }, "owned");
    }
}
