/// Constructs a [`struct@Choice`] type from a list of alternative types.
///
/// The default layout is [`Nested`]. A leading `tagged:` selects [`Tagged`],
/// and `niched:` selects [`Niched`], which is only available for a [`Unit`]
/// marker next to a `T` with a [`Niche`].
///
/// # Examples
///
/// ```rust
/// use choice::Choice;
///
/// type MyChoice = Choice![i32, u32, f64];
/// let c: MyChoice = MyChoice::new(42u32);
/// assert_eq!(c.which(), 1);
///
/// type Ref<'a> = Choice![(), &'a u8];
/// assert_eq!(core::mem::size_of::<Ref<'_>>(), core::mem::size_of::<&u8>());
///
/// type Flat = Choice![tagged: u8, u16];
/// assert_eq!(core::mem::size_of::<Flat>(), 4);
/// ```
///
/// [`Nested`]: crate::storage::Nested
/// [`Tagged`]: crate::storage::Tagged
/// [`Niched`]: crate::storage::Niched
/// [`Unit`]: crate::niche::Unit
/// [`Niche`]: crate::niche::Niche
#[macro_export]
macro_rules! Choice {
    [tagged: $($t:ty),* $(,)?] => [
        $crate::Choice::<$crate::T![$($t,)*], $crate::storage::Tagged<$crate::T![$($t,)*]>>
    ];
    [niched: $($t:ty),* $(,)?] => [
        $crate::Choice::<$crate::T![$($t,)*], $crate::storage::Niched<$crate::T![$($t,)*]>>
    ];
    [$($t:ty),* $(,)?] => [$crate::Choice::<$crate::T![$($t,)*]>];
}

/// Spells an alternative list: `T![A, B, C]` is `(A, (B, (C, ())))`.
///
/// Index lists for [`Choice::permute`](crate::Choice::permute) use the same
/// shape. [`t`] builds values of it.
///
/// ```rust
/// use choice::{tag::*, T};
///
/// let cases: T![u8, char] = (1, ('c', ()));
/// type Rotate = T![U1, U2, U0];
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$first:ty $(, $rest:ty)* $(,)?] => [($first, $crate::T![$($rest),*])];
}

/// Builds a value of a [`T`] list, most often the cases of
/// [`Choice::dispatch`](crate::Choice::dispatch).
///
/// ```rust
/// use choice::{t, Choice};
///
/// let c = <Choice![u8, char]>::new('c');
/// let n = c.dispatch(t![|x: &u8| u32::from(*x), |c: &char| u32::from(*c)]);
/// assert_eq!(n, 99);
/// ```
#[macro_export]
macro_rules! t {
    [] => [()];
    [$first:expr $(, $rest:expr)* $(,)?] => [($first, $crate::t![$($rest),*])];
}
