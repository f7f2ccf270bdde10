//! Physical layouts for a [`Choice`], and the rule that picks one.
//!
//! There are three layouts:
//!
//! - [`Nested`], the default: one enum variant per alternative, nested. The
//!   compiler chooses the discriminant encoding, so an alternative with an
//!   unused bit pattern (a reference, a `NonZero*`, a `bool`, ...) next to a
//!   unit alternative costs no extra bytes.
//! - [`Tagged`]: a [`Pun`] over every alternative plus a one-byte
//!   discriminant. Every alternative lives at offset 0. `Choice![tagged: ...]`
//!   selects it.
//! - [`Niched`]: only for two-alternative lists of a [`Unit`] marker and a
//!   `T: Niche`. The marker is encoded as the niche of `T`, which also covers
//!   niches the compiler cannot see. `Choice![niched: ...]` selects it, and
//!   `Niched<L>` is a type error for any `L` that is not a [`NicheList`].
//!
//! [`Choice`]: crate::Choice
//! [`Unit`]: crate::niche::Unit

use core::{marker::PhantomData, ptr::NonNull};

use crate::{
    niche::{Niche, Unit},
    object::Object,
    repr::{EnumRepr, Pun, Split, SumList},
    tag::Tag,
};

/// A physical layout that holds exactly one alternative of `List` and knows
/// which one.
///
/// Storages do not drop their contents; the owning [`Choice`] does.
///
/// # Safety
///
/// - [`tag`] must always report the alternative last written by [`build`].
/// - [`as_ptr`] and [`as_mut_ptr`] must point to the active alternative, typed
///   as that alternative's type and suitably aligned.
///
/// [`Choice`]: crate::Choice
/// [`tag`]: Storage::tag
/// [`build`]: Storage::build
/// [`as_ptr`]: Storage::as_ptr
/// [`as_mut_ptr`]: Storage::as_mut_ptr
pub unsafe trait Storage: Sized {
    /// The alternatives this storage holds one of.
    type List: SumList;

    /// The index of the active alternative.
    fn tag(&self) -> u8;

    /// The address of the active alternative.
    fn as_ptr(&self) -> *const ();

    fn as_mut_ptr(&mut self) -> *mut ();

    /// Builds a storage with alternative `tag` active.
    ///
    /// # Safety
    ///
    /// `tag` must be in range, and `init` must fully initialize the pointed-to
    /// slot as a valid value of alternative `tag`.
    unsafe fn build(tag: u8, init: impl FnOnce(*mut ())) -> Self;

    /// Builds a storage holding `value` as the alternative at index `U`.
    fn new<T, U: Tag>(value: T) -> Self
    where
        Self::List: Split<T, U>,
    {
        unsafe {
            Self::build(U::VALUE, |slot| {
                (*slot.cast::<Object<T>>()).construct_in_place(value);
            })
        }
    }
}

/// A union of every alternative plus an explicit discriminant.
pub struct Tagged<L: SumList> {
    data: Pun<L>,
    tag: u8,
}

impl<L: SumList> Clone for Tagged<L>
where
    L::Repr: Copy,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: SumList> Copy for Tagged<L> where L::Repr: Copy {}

impl<L: SumList> Tagged<L> {
    /// The untagged union underneath.
    pub fn pun(&self) -> &Pun<L> {
        &self.data
    }
}

unsafe impl<L: SumList> Storage for Tagged<L> {
    type List = L;

    fn tag(&self) -> u8 {
        self.tag
    }

    fn as_ptr(&self) -> *const () {
        self.data.as_ptr()
    }

    fn as_mut_ptr(&mut self) -> *mut () {
        self.data.as_mut_ptr()
    }

    unsafe fn build(tag: u8, init: impl FnOnce(*mut ())) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = L::FITS;
        debug_assert!((tag as usize) < L::LEN);

        let mut data = Pun::uninit();
        init(data.as_mut_ptr());
        Tagged { data, tag }
    }
}

/// Nested enums over every alternative, see [`Node`](crate::repr::Node).
pub struct Nested<L: SumList> {
    pub(crate) node: L::Enum,
}

impl<L: SumList> Clone for Nested<L>
where
    L::Enum: Copy,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: SumList> Copy for Nested<L> where L::Enum: Copy {}

unsafe impl<L: SumList> Storage for Nested<L> {
    type List = L;

    fn tag(&self) -> u8 {
        self.node.tag()
    }

    fn as_ptr(&self) -> *const () {
        self.node.as_ptr()
    }

    fn as_mut_ptr(&mut self) -> *mut () {
        self.node.as_mut_ptr()
    }

    unsafe fn build(tag: u8, init: impl FnOnce(*mut ())) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = L::FITS;
        debug_assert!((tag as usize) < L::LEN);

        Nested {
            node: unsafe { <L::Enum as EnumRepr>::build(tag, init) },
        }
    }
}

/// Two-alternative lists that can be niched: a [`Unit`] marker next to an
/// alternative with a niche.
///
/// Any `Unit` may come first; second, only `()` and `PhantomData`.
pub trait NicheList: SumList {
    /// The alternative that is actually stored.
    type Value: Niche;

    /// The marker the niche stands for.
    type Empty: Unit;

    /// The index of the unit alternative.
    const EMPTY: u8;

    /// The index of the stored alternative.
    const VALUE: u8 = 1 - Self::EMPTY;
}

impl<E: Unit, T: Niche> NicheList for (E, (T, ())) {
    type Value = T;
    type Empty = E;
    const EMPTY: u8 = 0;
}

impl<T: Niche> NicheList for (T, ((), ())) {
    type Value = T;
    type Empty = ();
    const EMPTY: u8 = 1;
}

impl<T: Niche, X: ?Sized> NicheList for (T, (PhantomData<X>, ())) {
    type Value = T;
    type Empty = PhantomData<X>;
    const EMPTY: u8 = 1;
}

/// A single slot whose niche stands for the unit alternative.
pub struct Niched<L: NicheList> {
    slot: Object<L::Value>,
}

impl<L: NicheList> Clone for Niched<L>
where
    L::Value: Copy,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: NicheList> Copy for Niched<L> where L::Value: Copy {}

impl<L: NicheList> Niched<L> {
    fn is_empty(&self) -> bool {
        // The slot holds either a real value or the niche at all times; it is
        // only ever rewritten as a whole.
        unsafe { self.slot.is_niche() }
    }
}

unsafe impl<L: NicheList> Storage for Niched<L> {
    type List = L;

    fn tag(&self) -> u8 {
        if self.is_empty() {
            L::EMPTY
        } else {
            L::VALUE
        }
    }

    fn as_ptr(&self) -> *const () {
        if self.is_empty() {
            NonNull::<L::Empty>::dangling().as_ptr().cast::<()>()
        } else {
            self.slot.as_ptr().cast()
        }
    }

    fn as_mut_ptr(&mut self) -> *mut () {
        if self.is_empty() {
            NonNull::<L::Empty>::dangling().as_ptr().cast::<()>()
        } else {
            self.slot.as_mut_ptr().cast()
        }
    }

    unsafe fn build(tag: u8, init: impl FnOnce(*mut ())) -> Self {
        if tag == L::EMPTY {
            init(NonNull::<L::Empty>::dangling().as_ptr().cast::<()>());
            Niched {
                slot: Object::niche(),
            }
        } else {
            let mut slot = Object::<L::Value>::uninit();
            init(slot.as_mut_ptr().cast());
            Niched { slot }
        }
    }
}
