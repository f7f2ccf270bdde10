//! The raw, untagged representation of a [`Choice`].
//!
//! # Implementation details
//!
//! A type list is laid out as nested unions, one slot per alternative:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::ManuallyDrop;
//! # use choice::object::Object;
//!
//! struct Nil(Infallible);
//! #[repr(C)]
//! union Cons<T, Next> {
//!     data: ManuallyDrop<Object<T>>,
//!     next: ManuallyDrop<Next>,
//! }
//! ```
//!
//! Every union is `#[repr(C)]`, so every slot starts at offset 0 of the whole
//! representation. Code that knows the active index at run time can therefore
//! address the active slot with a single untyped pointer, see [`SumList`].
//!
//! A union never runs a destructor. It is `Copy` exactly when every
//! alternative is `Copy`, and the owner above it (a [`Storage`]) decides which
//! slot to drop.
//!
//! [`Choice`]: crate::Choice
//! [`Storage`]: crate::storage::Storage

use core::{
    convert::Infallible,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr,
};

use crate::{
    object::Object,
    tag::{Count, Tag, UInt, UTerm},
};

/// The terminator type of the underlying union of the [`Choice`] type.
///
/// [`Choice`]: crate::Choice
#[derive(Clone, Copy)]
pub struct Nil(pub(crate) Infallible);

/// The accumulator type of the underlying union of the [`Choice`] type.
///
/// [`Choice`]: crate::Choice
#[repr(C)]
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<Object<T>>,
    pub(crate) next: ManuallyDrop<U>,
}

impl<T: Copy, U: Copy> Clone for Cons<T, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, U: Copy> Copy for Cons<T, U> {}

/// The trait that type lists implement to support its corresponding untagged
/// union representation.
pub trait SumList: Count + Sized {
    /// The underlying representation.
    type Repr;

    /// The same alternatives as nested enums, see [`Node`].
    type Enum: EnumRepr;

    /// Whether any alternative needs its destructor run.
    const NEEDS_DROP: bool;

    /// Rejects lists too long for a one-byte discriminant.
    #[doc(hidden)]
    const FITS: () = assert!(
        Self::LEN <= u8::MAX as usize + 1,
        "too many alternatives for a one-byte discriminant"
    );

    /// Drops the alternative at `tag`, living at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a representation of this list whose active
    /// alternative is `tag`.
    #[doc(hidden)]
    unsafe fn drop_at(ptr: *mut (), tag: u8);

    /// The size of the alternative at `tag`.
    #[doc(hidden)]
    fn size_at(tag: u8) -> usize;
}

impl SumList for () {
    type Repr = Nil;
    type Enum = Nil;
    const NEEDS_DROP: bool = false;

    unsafe fn drop_at(_: *mut (), _: u8) {}

    fn size_at(_: u8) -> usize {
        0
    }
}

impl<Head, Tail> SumList for (Head, Tail)
where
    Tail: SumList,
{
    type Repr = Cons<Head, Tail::Repr>;
    type Enum = Node<Head, Tail::Enum>;
    const NEEDS_DROP: bool = mem::needs_drop::<Head>() || Tail::NEEDS_DROP;

    unsafe fn drop_at(ptr: *mut (), tag: u8) {
        if tag == 0 {
            unsafe { (*ptr.cast::<Object<Head>>()).destroy_in_place() };
        } else {
            unsafe { Tail::drop_at(ptr, tag - 1) }
        }
    }

    fn size_at(tag: u8) -> usize {
        if tag == 0 {
            mem::size_of::<Head>()
        } else {
            Tail::size_at(tag - 1)
        }
    }
}

/// The enum counterpart of [`Cons`].
///
/// Unlike a union, an enum lets the compiler pick the discriminant encoding,
/// including hiding it in an unused bit pattern of some alternative. With
/// [`Nil`] being uninhabited, `Node<(), Node<&u8, Nil>>` is as large as `&u8`.
/// Payloads are `ManuallyDrop`, which keeps their niches but never drops
/// them.
pub enum Node<T, U> {
    Here(ManuallyDrop<T>),
    There(U),
}

impl<T: Copy, U: Copy> Clone for Node<T, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, U: Copy> Copy for Node<T, U> {}

/// Walks the variants of a nested enum built from [`Node`]s.
///
/// # Safety
///
/// `build(tag, ..)` must return a value whose [`tag`] is `tag`, and the
/// pointers must address the payload of the active variant.
///
/// [`tag`]: EnumRepr::tag
pub unsafe trait EnumRepr: Sized {
    fn tag(&self) -> u8;

    fn as_ptr(&self) -> *const ();

    fn as_mut_ptr(&mut self) -> *mut ();

    /// # Safety
    ///
    /// `tag` must be in range and `init` must initialize the slot it is given.
    unsafe fn build(tag: u8, init: impl FnOnce(*mut ())) -> Self;
}

unsafe impl EnumRepr for Nil {
    fn tag(&self) -> u8 {
        match self.0 {}
    }

    fn as_ptr(&self) -> *const () {
        match self.0 {}
    }

    fn as_mut_ptr(&mut self) -> *mut () {
        match self.0 {}
    }

    unsafe fn build(tag: u8, _: impl FnOnce(*mut ())) -> Self {
        unreachable!("alternative index {tag} out of range")
    }
}

unsafe impl<T, U: EnumRepr> EnumRepr for Node<T, U> {
    fn tag(&self) -> u8 {
        match self {
            Node::Here(_) => 0,
            Node::There(next) => next.tag() + 1,
        }
    }

    fn as_ptr(&self) -> *const () {
        match self {
            Node::Here(value) => ptr::from_ref::<T>(value).cast(),
            Node::There(next) => next.as_ptr(),
        }
    }

    fn as_mut_ptr(&mut self) -> *mut () {
        match self {
            Node::Here(value) => ptr::from_mut::<T>(value).cast(),
            Node::There(next) => next.as_mut_ptr(),
        }
    }

    unsafe fn build(tag: u8, init: impl FnOnce(*mut ())) -> Self {
        if tag == 0 {
            let mut slot = MaybeUninit::<T>::uninit();
            init(slot.as_mut_ptr().cast());
            Node::Here(ManuallyDrop::new(unsafe { slot.assume_init() }))
        } else {
            Node::There(unsafe { U::build(tag - 1, init) })
        }
    }
}

/// The trait that type lists implement to support manipulating a specified
/// alternative of type `T` marked by index tag `U`.
pub trait Split<T, U: Tag>: SumList {
    #[doc(hidden)]
    fn from_data(data: T) -> Self::Repr;

    #[doc(hidden)]
    fn as_ptr(this: &Self::Repr) -> *const Object<T>;

    #[doc(hidden)]
    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Object<T>;

    /// The remainder type list from splitting type list `Self` with type `T`
    /// and its index tag `U`.
    type Remainder: SumList;

    #[doc(hidden)]
    fn from_remainder(tag: u8) -> u8;

    #[doc(hidden)]
    fn try_unwrap(tag: u8) -> Result<(), u8>;
}

impl<Head, Tail> Split<Head, UTerm> for (Head, Tail)
where
    Tail: SumList,
{
    fn from_data(data: Head) -> Self::Repr {
        Cons {
            data: ManuallyDrop::new(Object::new(data)),
        }
    }

    fn as_ptr(this: &Self::Repr) -> *const Object<Head> {
        let ptr = ptr::addr_of!(this.data).cast::<Object<Head>>();
        debug_assert_eq!(ptr.cast(), this as *const Self::Repr);
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Object<Head> {
        let ptr = ptr::addr_of_mut!(this.data).cast::<Object<Head>>();
        debug_assert_eq!(ptr.cast(), this as *mut Self::Repr);
        ptr
    }

    type Remainder = Tail;

    fn from_remainder(tag: u8) -> u8 {
        tag + 1
    }

    fn try_unwrap(tag: u8) -> Result<(), u8> {
        match tag.checked_sub(1) {
            None => Ok(()),
            Some(tag) => Err(tag),
        }
    }
}

impl<Head, Tail, T, U: Tag> Split<T, UInt<U>> for (Head, Tail)
where
    Tail: Split<T, U>,
{
    fn from_data(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_data(data)),
        }
    }

    fn as_ptr(this: &Self::Repr) -> *const Object<T> {
        let ptr = Tail::as_ptr(unsafe { &this.next });
        debug_assert_eq!(ptr.cast(), this as *const Self::Repr);
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Object<T> {
        let ptr = Tail::as_mut_ptr(unsafe { &mut this.next });
        debug_assert_eq!(ptr.cast(), this as *mut Self::Repr);
        ptr
    }

    type Remainder = (Head, <Tail as Split<T, U>>::Remainder);

    fn from_remainder(tag: u8) -> u8 {
        if tag < UInt::<U>::VALUE {
            tag
        } else {
            tag + 1
        }
    }

    fn try_unwrap(tag: u8) -> Result<(), u8> {
        let cur = UInt::<U>::VALUE;
        match tag.cmp(&cur) {
            core::cmp::Ordering::Equal => Ok(()),
            core::cmp::Ordering::Less => Err(tag),
            core::cmp::Ordering::Greater => Err(tag - 1),
        }
    }
}

/// An untagged union over the type list `L`, for type-punning.
///
/// A `Pun` does not know which of its slots holds a value, so it never drops
/// anything: dropping a `Pun` leaks its contents. It is `Copy` whenever every
/// alternative is.
///
/// ```rust
/// use choice::{repr::Pun, tag::U1, T};
///
/// let pun = Pun::<T![u32, f32]>::new::<f32, U1>(1.5);
/// assert_eq!(unsafe { *pun.get::<f32, U1>() }, 1.5);
/// ```
#[repr(transparent)]
pub struct Pun<L: SumList> {
    repr: MaybeUninit<L::Repr>,
}

impl<L: SumList> Clone for Pun<L>
where
    L::Repr: Copy,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: SumList> Copy for Pun<L> where L::Repr: Copy {}

impl<L: SumList> Pun<L> {
    /// A pun with no alternative selected.
    pub const fn uninit() -> Self {
        Pun {
            repr: MaybeUninit::uninit(),
        }
    }

    /// Constructs the alternative `T` at index `U`.
    pub fn new<T, U: Tag>(value: T) -> Self
    where
        L: Split<T, U>,
    {
        Pun {
            repr: MaybeUninit::new(L::from_data(value)),
        }
    }

    /// Gets the alternative at index `U`.
    ///
    /// # Safety
    ///
    /// That alternative must be the one that was last written.
    pub unsafe fn get<T, U: Tag>(&self) -> &T
    where
        L: Split<T, U>,
    {
        unsafe { (*L::as_ptr(self.repr.assume_init_ref())).assume_init_ref() }
    }

    /// # Safety
    ///
    /// See [`Pun::get`].
    pub unsafe fn get_mut<T, U: Tag>(&mut self) -> &mut T
    where
        L: Split<T, U>,
    {
        unsafe { (*L::as_mut_ptr(self.repr.assume_init_mut())).assume_init_mut() }
    }

    /// The slot of index `U`, initialized or not.
    pub fn object<T, U: Tag>(&self) -> &Object<T>
    where
        L: Split<T, U>,
    {
        unsafe { &*self.repr.as_ptr().cast::<Object<T>>() }
    }

    pub fn object_mut<T, U: Tag>(&mut self) -> &mut Object<T>
    where
        L: Split<T, U>,
    {
        unsafe { &mut *self.repr.as_mut_ptr().cast::<Object<T>>() }
    }

    /// The address shared by all slots.
    pub fn as_ptr(&self) -> *const () {
        self.repr.as_ptr().cast()
    }

    pub fn as_mut_ptr(&mut self) -> *mut () {
        self.repr.as_mut_ptr().cast()
    }
}

#[cfg(test)]
mod tests {
    use std::string::{String, ToString};

    use super::*;
    use crate::tag::*;

    #[test]
    fn slots_share_address() {
        type L = (u8, (String, (u64, ())));
        let mut pun = Pun::<L>::new::<String, U1>("pun".to_string());
        let base = pun.as_ptr();
        assert_eq!(pun.object::<u8, U0>().as_ptr().cast::<()>(), base);
        assert_eq!(pun.object::<u64, U2>().as_ptr().cast::<()>(), base);
        assert_eq!(unsafe { pun.get::<String, U1>() }, "pun");

        unsafe { L::drop_at(pun.as_mut_ptr(), 1) };
    }

    #[test]
    fn tag_arithmetic() {
        type L = (u8, (u16, (u32, ())));
        assert_eq!(<L as Split<u16, U1>>::try_unwrap(1), Ok(()));
        assert_eq!(<L as Split<u16, U1>>::try_unwrap(0), Err(0));
        assert_eq!(<L as Split<u16, U1>>::try_unwrap(2), Err(1));
        assert_eq!(<L as Split<u16, U1>>::from_remainder(1), 2);
        assert_eq!(<L as Split<u8, U0>>::from_remainder(0), 1);
        assert_eq!(L::size_at(2), 4);
    }

    #[test]
    fn needs_drop() {
        assert!(!<(u8, (f64, ())) as SumList>::NEEDS_DROP);
        assert!(<(u8, (String, ())) as SumList>::NEEDS_DROP);
    }

    #[test]
    fn enum_variants() {
        type E = <(u8, (String, (u64, ()))) as SumList>::Enum;
        let mut e = unsafe {
            E::build(1, |slot| slot.cast::<String>().write("enum".to_string()))
        };
        assert_eq!(e.tag(), 1);
        assert_eq!(unsafe { &*e.as_ptr().cast::<String>() }, "enum");
        assert!(matches!(e, Node::There(Node::Here(_))));

        unsafe { <(u8, (String, (u64, ())))>::drop_at(e.as_mut_ptr(), 1) };
    }

    #[test]
    fn enum_niches() {
        use core::mem::size_of;

        assert_eq!(size_of::<<((), (&u8, ())) as SumList>::Enum>(), size_of::<&u8>());
        assert_eq!(size_of::<<(&u8, ((), ())) as SumList>::Enum>(), size_of::<&u8>());
        assert_eq!(size_of::<<(u32, ()) as SumList>::Enum>(), 4);
    }

    #[test]
    fn copy_when_all_copy() {
        fn is_copy<T: Copy>(_: &T) {}
        let pun = Pun::<(u8, (f64, ()))>::new::<f64, U1>(2.5);
        is_copy(&pun);
        let copy = pun;
        assert_eq!(unsafe { *copy.get::<f64, U1>() }, 2.5);
        assert_eq!(unsafe { *pun.get::<f64, U1>() }, 2.5);
    }
}
