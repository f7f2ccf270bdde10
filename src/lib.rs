#![doc = include_str!("../README.md")]
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(rust_2024_compatibility)]
#![allow(edition_2024_expr_fragment_specifier)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(test)]
extern crate std;

use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::{ManuallyDrop, MaybeUninit},
    ops::{Deref, DerefMut},
    ptr,
};

#[macro_use]
mod macros;

mod crash;
pub mod derive;
pub mod dispatch;
pub mod niche;
pub mod object;
pub mod option;
pub mod permute;
pub mod repr;
pub mod result;
pub mod storage;
pub mod tag;

pub use choice_macros::match_choice;

pub use self::{
    crash::AccessError,
    dispatch::{IndexOnly, Indexed, Nullary},
    niche::{Niche, Unit},
    option::{Maybe, NicheMaybe},
    result::Outcome,
    storage::{Nested, Niched, Storage, Tagged},
};
use self::{
    crash::AbortOnUnwind,
    dispatch::{DispatchInto, DispatchMut, DispatchRef},
    object::Object,
    permute::Permutation,
    repr::{Split, SumList},
    tag::Tag,
};

pub type Rem<L, T, U> = <L as Split<T, U>>::Remainder;
pub type Permuted<L, P> = <P as Permutation<L>>::Output;

/// A runtime choice among the alternatives of the type list `L`.
///
/// Exactly one alternative is active at any time. A choice is never
/// default-constructible: it is built with a value for one specific
/// alternative, by type with [`Choice::new`] when that type occurs once, or by
/// index with [`Choice::new`]`::<_, U>` otherwise.
///
/// `S` is the physical layout. The default, [`Nested`], lets the compiler
/// hide the discriminant in a niche of an alternative when it can; see
/// [`storage`] for the explicit [`Tagged`] and [`Niched`] layouts.
///
/// # Access
///
/// ```rust
/// use choice::{tag::*, Choice};
///
/// let mut c = <Choice![i32, i32, &str]>::new::<_, U1>(42);
///
/// // Crashes on the wrong alternative.
/// *c.at_mut::<i32, U1>() += 1;
///
/// // `None` on the wrong alternative.
/// assert_eq!(c.get::<i32, U1>(), Some(&43));
/// assert_eq!(c.get::<i32, U0>(), None);
///
/// // Unchecked. Undefined Behavior on the wrong alternative.
/// assert_eq!(unsafe { *c.get_unchecked::<i32, U1>() }, 43);
///
/// // Null on the wrong alternative.
/// assert!(c.as_ptr::<&str, _>().is_null());
/// ```
///
/// Choices over different lists are comparable when the lists have the same
/// length and each pair of alternatives is comparable. Lower indices order
/// first; payloads are compared only when the indices agree.
pub struct Choice<L: SumList, S: Storage<List = L> = Nested<L>> {
    storage: S,
    marker: PhantomData<L>,
}

impl<T> From<T> for Choice![T] {
    /// Construct a `Choice` of one type from a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use choice::Choice;
    ///
    /// let c: Choice![i32] = 42.into();
    /// assert_eq!(*c, 42);
    /// ```
    fn from(value: T) -> Self {
        Choice::new(value)
    }
}

impl<T> Deref for Choice![T] {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { self.get_unchecked::<T, tag::U0>() }
    }
}

impl<T> DerefMut for Choice![T] {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { self.get_unchecked_mut::<T, tag::U0>() }
    }
}

impl<T> Choice![T] {
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        unsafe { ptr::read(this.storage.as_mut_ptr().cast::<T>()) }
    }
}

impl Choice![] {
    pub fn unreachable(self) -> ! {
        match self.storage.node.0 {}
    }
}

impl<L: SumList, S: Storage<List = L>> Choice<L, S> {
    fn from_storage(storage: S) -> Self {
        Choice {
            storage,
            marker: PhantomData,
        }
    }

    /// Constructs the alternative `T` at index `U`.
    ///
    /// `U` can be left out when `T` occurs only once in the list.
    ///
    /// ```rust
    /// use choice::{tag::U1, Choice};
    ///
    /// let by_type = <Choice![u8, &str]>::new("x");
    /// let by_index = <Choice![u8, u8]>::new::<_, U1>(3);
    /// assert_eq!((by_type.which(), by_index.which()), (1, 1));
    /// ```
    ///
    /// A repeated type has no single index to infer:
    ///
    /// ```rust,compile_fail
    /// use choice::Choice;
    ///
    /// let c = <Choice![i32, i32]>::new(1);
    /// ```
    pub fn new<T, U>(value: T) -> Self
    where
        L: Split<T, U>,
        U: Tag,
    {
        Self::from_storage(S::new(value))
    }

    /// Uninitialized space for a choice, for delayed initialization with
    /// [`Choice::write_at`].
    pub fn uninit() -> MaybeUninit<Self> {
        MaybeUninit::uninit()
    }

    /// Constructs the alternative `T` at index `U` into `place`.
    pub fn write_at<T, U>(place: &mut MaybeUninit<Self>, value: T) -> &mut Self
    where
        L: Split<T, U>,
        U: Tag,
    {
        place.write(Self::new(value))
    }

    /// The index of the active alternative.
    pub fn which(&self) -> usize {
        self.storage.tag() as usize
    }

    /// Whether alternative `U` is the active one.
    pub fn is<T, U>(&self) -> bool
    where
        L: Split<T, U>,
        U: Tag,
    {
        self.storage.tag() == U::VALUE
    }

    /// The physical layout underneath.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get<T, U>(&self) -> Option<&T>
    where
        L: Split<T, U>,
        U: Tag,
    {
        self.is::<T, U>()
            .then(|| unsafe { self.get_unchecked::<T, U>() })
    }

    pub fn get_mut<T, U>(&mut self) -> Option<&mut T>
    where
        L: Split<T, U>,
        U: Tag,
    {
        if self.is::<T, U>() {
            Some(unsafe { self.get_unchecked_mut::<T, U>() })
        } else {
            None
        }
    }

    /// Like [`Choice::get`], but reports the mismatch.
    pub fn try_get<T, U>(&self) -> Result<&T, AccessError>
    where
        L: Split<T, U>,
        U: Tag,
    {
        self.get::<T, U>().ok_or(AccessError {
            expected: U::VALUE as usize,
            actual: self.which(),
        })
    }

    #[track_caller]
    fn check<T, U>(&self)
    where
        L: Split<T, U>,
        U: Tag,
    {
        let actual = self.storage.tag();
        if actual != U::VALUE {
            crash::wrong_alternative(U::VALUE as usize, actual as usize)
        }
    }

    /// Gets alternative `U`, crashing if it is not the active one.
    ///
    /// The crash is a panic after an `error` record on the `choice` log
    /// target; built with `panic = "abort"` it ends the process. Nothing is
    /// modified before it, so a caller that catches the unwind still holds an
    /// intact choice. Use [`Choice::try_get`] to handle the mismatch instead.
    #[track_caller]
    pub fn at<T, U>(&self) -> &T
    where
        L: Split<T, U>,
        U: Tag,
    {
        self.check::<T, U>();
        unsafe { self.get_unchecked::<T, U>() }
    }

    #[track_caller]
    pub fn at_mut<T, U>(&mut self) -> &mut T
    where
        L: Split<T, U>,
        U: Tag,
    {
        self.check::<T, U>();
        unsafe { self.get_unchecked_mut::<T, U>() }
    }

    /// # Safety
    ///
    /// Alternative `U` must be the active one.
    pub unsafe fn get_unchecked<T, U>(&self) -> &T
    where
        L: Split<T, U>,
        U: Tag,
    {
        debug_assert_eq!(self.storage.tag(), U::VALUE);
        unsafe { &*self.storage.as_ptr().cast::<T>() }
    }

    /// # Safety
    ///
    /// Alternative `U` must be the active one.
    pub unsafe fn get_unchecked_mut<T, U>(&mut self) -> &mut T
    where
        L: Split<T, U>,
        U: Tag,
    {
        debug_assert_eq!(self.storage.tag(), U::VALUE);
        unsafe { &mut *self.storage.as_mut_ptr().cast::<T>() }
    }

    /// A pointer to alternative `U`, or null if it is not the active one.
    pub fn as_ptr<T, U>(&self) -> *const T
    where
        L: Split<T, U>,
        U: Tag,
    {
        match self.is::<T, U>() {
            true => self.storage.as_ptr().cast(),
            false => ptr::null(),
        }
    }

    pub fn as_mut_ptr<T, U>(&mut self) -> *mut T
    where
        L: Split<T, U>,
        U: Tag,
    {
        match self.is::<T, U>() {
            true => self.storage.as_mut_ptr().cast(),
            false => ptr::null_mut(),
        }
    }

    /// Makes `value` the active alternative at index `U`, returning a reference
    /// to it.
    ///
    /// If `U` is already active, `value` is assigned over the current value, so
    /// its address does not change. Otherwise the current alternative is
    /// dropped and `value` is moved into its place.
    pub fn emplace<T, U>(&mut self, value: T) -> &mut T
    where
        L: Split<T, U>,
        U: Tag,
    {
        if self.is::<T, U>() {
            let slot = self.storage.as_mut_ptr().cast::<Object<T>>();
            return unsafe { (*slot).assign(value) };
        }
        self.replace_with::<T, U>(|| value)
    }

    /// Drops the current alternative and constructs alternative `U` in place
    /// with `f`, even if `U` is already active.
    ///
    /// A panic inside `f` or inside the old value's destructor aborts.
    pub fn emplace_with<T, U>(&mut self, f: impl FnOnce() -> T) -> &mut T
    where
        L: Split<T, U>,
        U: Tag,
    {
        self.replace_with::<T, U>(f)
    }

    fn replace_with<T, U>(&mut self, f: impl FnOnce() -> T) -> &mut T
    where
        L: Split<T, U>,
        U: Tag,
    {
        let guard = AbortOnUnwind;
        if L::NEEDS_DROP {
            unsafe { L::drop_at(self.storage.as_mut_ptr(), self.storage.tag()) };
        }
        let storage = unsafe {
            S::build(U::VALUE, |slot| {
                (*slot.cast::<Object<T>>()).construct_with(f);
            })
        };
        unsafe { ptr::write(&mut self.storage, storage) };
        guard.disarm();

        unsafe { self.get_unchecked_mut::<T, U>() }
    }

    /// Takes alternative `U` out, or returns a choice over the remaining
    /// alternatives.
    pub fn try_unwrap<T, U>(self) -> Result<T, Choice<Rem<L, T, U>>>
    where
        L: Split<T, U>,
        U: Tag,
    {
        let mut this = ManuallyDrop::new(self);
        let tag = this.storage.tag();
        match L::try_unwrap(tag) {
            Ok(()) => Ok(unsafe { ptr::read(this.storage.as_mut_ptr().cast::<T>()) }),
            Err(rem) => Err(Choice::from_storage(unsafe { this.move_into(rem) })),
        }
    }

    /// Like [`Choice::try_unwrap`], but hands back the whole choice when `U` is
    /// not the active alternative.
    #[doc(hidden)]
    pub fn try_take<T, U>(self) -> Result<T, Self>
    where
        L: Split<T, U>,
        U: Tag,
    {
        if !self.is::<T, U>() {
            return Err(self);
        }
        let this = ManuallyDrop::new(self);
        Ok(unsafe { ptr::read(this.storage.as_ptr().cast::<T>()) })
    }

    /// The inverse of [`Choice::try_unwrap`]: embeds this choice into the list
    /// `L2` that `T` at index `U` was split off.
    pub fn restore<L2, S2, T, U>(self) -> Choice<L2, S2>
    where
        L2: Split<T, U, Remainder = L>,
        S2: Storage<List = L2>,
        U: Tag,
    {
        let this = ManuallyDrop::new(self);
        let tag = L2::from_remainder(this.storage.tag());
        Choice::from_storage(unsafe { this.move_into(tag) })
    }

    /// Moves the active value into a fresh storage under index `tag`.
    ///
    /// The caller must forget `self` afterwards, and `tag` must denote the same
    /// type in `S2::List`.
    unsafe fn move_into<S2: Storage>(&self, tag: u8) -> S2 {
        let src = self.storage.as_ptr().cast::<u8>();
        let size = L::size_at(self.storage.tag());
        unsafe { S2::build(tag, |dst| ptr::copy_nonoverlapping(src, dst.cast::<u8>(), size)) }
    }

    /// Calls the case of the active alternative with a shared reference to it.
    ///
    /// ```rust
    /// use choice::{t, tag::*, Choice, Nullary};
    ///
    /// let c = <Choice![i32, &str, ()]>::new::<_, U1>("four");
    /// let len = c.dispatch(t![
    ///     |x: &i32| *x as usize,
    ///     |s: &&str| s.len(),
    ///     Nullary(|| 0),
    /// ]);
    /// assert_eq!(len, 4);
    /// ```
    ///
    /// See [`dispatch`] for the accepted forms of a case.
    pub fn dispatch<'a, C, R>(&'a self, cases: C) -> R
    where
        L: DispatchRef<'a, C, R>,
    {
        unsafe { L::dispatch_ref(self.storage.as_ptr(), self.storage.tag(), 0, cases) }
    }

    pub fn dispatch_mut<'a, C, R>(&'a mut self, cases: C) -> R
    where
        L: DispatchMut<'a, C, R>,
    {
        let tag = self.storage.tag();
        unsafe { L::dispatch_mut(self.storage.as_mut_ptr(), tag, 0, cases) }
    }

    pub fn dispatch_into<C, R>(self, cases: C) -> R
    where
        L: DispatchInto<C, R>,
    {
        let mut this = ManuallyDrop::new(self);
        let tag = this.storage.tag();
        unsafe { L::dispatch_into(this.storage.as_mut_ptr(), tag, 0, cases) }
    }

    /// Reorders the alternatives by the index list `P`.
    ///
    /// ```rust
    /// use choice::{tag::*, Choice, T};
    ///
    /// let c = <Choice![i32, f32, char]>::new(42.5f32);
    /// let p: Choice![char, i32, f32] = c.permute::<T![U2, U0, U1]>();
    /// assert_eq!(p.which(), 2);
    /// assert_eq!(p.get::<f32, _>(), Some(&42.5));
    /// ```
    ///
    /// `P` must name every index exactly once:
    ///
    /// ```rust,compile_fail
    /// use choice::{tag::*, Choice, T};
    ///
    /// let c = <Choice![i32, f32, char]>::new('c');
    /// let _ = c.permute::<T![U0, U0, U1]>();
    /// ```
    ///
    /// ```rust,compile_fail
    /// use choice::{tag::*, Choice, T};
    ///
    /// let c = <Choice![i32, f32, char]>::new('c');
    /// let _ = c.permute::<T![U1, U0]>();
    /// ```
    pub fn permute<P>(self) -> Choice<Permuted<L, P>>
    where
        P: Permutation<L>,
    {
        self.permute_into::<P, Nested<Permuted<L, P>>>()
    }

    /// Like [`Choice::permute`], with a chosen output layout.
    pub fn permute_into<P, S2>(self) -> Choice<Permuted<L, P>, S2>
    where
        P: Permutation<L>,
        S2: Storage<List = Permuted<L, P>>,
    {
        #[allow(clippy::let_unit_value)]
        let () = P::CHECK;

        let this = ManuallyDrop::new(self);
        let tag = match P::position(this.storage.tag()) {
            Some(tag) => tag,
            None => unreachable!("permutations are checked to be bijective"),
        };
        Choice::from_storage(unsafe { this.move_into(tag) })
    }

    /// A bitwise copy, for lists whose alternatives are all `Copy`.
    pub fn copied(&self) -> Self
    where
        S: Copy,
    {
        Self::from_storage(self.storage)
    }

    #[doc(hidden)]
    pub fn exhaust(self) -> Result<Choice![], Self> {
        Err(self)
    }
}

impl<L: SumList, S: Storage<List = L>> Drop for Choice<L, S> {
    fn drop(&mut self) {
        if L::NEEDS_DROP {
            let tag = self.storage.tag();
            unsafe { L::drop_at(self.storage.as_mut_ptr(), tag) }
        }
    }
}

impl<L: derive::SumClone, S: Storage<List = L>> Clone for Choice<L, S> {
    fn clone(&self) -> Self {
        let tag = self.storage.tag();
        let src = self.storage.as_ptr();
        Self::from_storage(unsafe { S::build(tag, |dst| L::clone_at(src, dst, tag)) })
    }

    fn clone_from(&mut self, source: &Self) {
        let tag = source.storage.tag();
        if self.storage.tag() == tag {
            unsafe { L::clone_from_at(self.storage.as_mut_ptr(), source.storage.as_ptr(), tag) }
        } else {
            *self = source.clone();
        }
    }
}

impl<L, S, L2, S2> PartialEq<Choice<L2, S2>> for Choice<L, S>
where
    L: derive::SumPartialEq<L2>,
    S: Storage<List = L>,
    L2: SumList,
    S2: Storage<List = L2>,
{
    fn eq(&self, other: &Choice<L2, S2>) -> bool {
        let tag = self.storage.tag();
        tag == other.storage.tag()
            && unsafe { L::eq_at(self.storage.as_ptr(), other.storage.as_ptr(), tag) }
    }
}

impl<L: derive::SumPartialEq + Eq, S: Storage<List = L>> Eq for Choice<L, S> {}

impl<L, S, L2, S2> PartialOrd<Choice<L2, S2>> for Choice<L, S>
where
    L: derive::SumPartialOrd<L2>,
    S: Storage<List = L>,
    L2: SumList,
    S2: Storage<List = L2>,
{
    fn partial_cmp(&self, other: &Choice<L2, S2>) -> Option<core::cmp::Ordering> {
        let tag = self.storage.tag();
        match tag.cmp(&other.storage.tag()) {
            core::cmp::Ordering::Equal => unsafe {
                L::partial_cmp_at(self.storage.as_ptr(), other.storage.as_ptr(), tag)
            },
            other => Some(other),
        }
    }
}

impl<L: derive::SumOrd + Eq, S: Storage<List = L>> Ord for Choice<L, S> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        let tag = self.storage.tag();
        tag.cmp(&other.storage.tag())
            .then_with(|| unsafe { L::cmp_at(self.storage.as_ptr(), other.storage.as_ptr(), tag) })
    }
}

impl<L: derive::SumHash, S: Storage<List = L>> Hash for Choice<L, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let tag = self.storage.tag();
        tag.hash(state);
        unsafe { L::hash_at(self.storage.as_ptr(), tag, state) }
    }
}

impl<L: derive::SumDebug, S: Storage<List = L>> fmt::Debug for Choice<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.storage.tag();
        write!(f, "Choice<{tag}>(")?;
        unsafe { L::debug_at(self.storage.as_ptr(), tag, f) }?;
        f.write_str(")")
    }
}
