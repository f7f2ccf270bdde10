//! Type-level alternative indices.
//!
//! An index is a Peano number: [`UTerm`] is zero and [`UInt<U>`] is `U + 1`.
//! The aliases `U0` to `U31` cover the lists that are practical to spell by
//! hand; longer lists can still nest [`UInt`] directly.

#![allow(missing_docs)]

use core::marker::PhantomData;

pub struct UTerm;

pub struct UInt<U>(PhantomData<U>);

pub trait Tag {
    const VALUE: u8;
}

impl Tag for UTerm {
    const VALUE: u8 = 0;
}

impl<U: Tag> Tag for UInt<U> {
    const VALUE: u8 = 1 + U::VALUE;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
pub type U8 = UInt<U7>;
pub type U9 = UInt<U8>;

pub type U10 = UInt<U9>;
pub type U11 = UInt<U10>;
pub type U12 = UInt<U11>;
pub type U13 = UInt<U12>;
pub type U14 = UInt<U13>;
pub type U15 = UInt<U14>;
pub type U16 = UInt<U15>;
pub type U17 = UInt<U16>;
pub type U18 = UInt<U17>;
pub type U19 = UInt<U18>;

pub type U20 = UInt<U19>;
pub type U21 = UInt<U20>;
pub type U22 = UInt<U21>;
pub type U23 = UInt<U22>;
pub type U24 = UInt<U23>;
pub type U25 = UInt<U24>;
pub type U26 = UInt<U25>;
pub type U27 = UInt<U26>;
pub type U28 = UInt<U27>;
pub type U29 = UInt<U28>;

pub type U30 = UInt<U29>;
pub type U31 = UInt<U30>;

/// Counts the number of elements in a type list.
pub trait Count {
    const LEN: usize;
}

impl Count for () {
    const LEN: usize = 0;
}

impl<Head, Tail> Count for (Head, Tail)
where
    Tail: Count,
{
    const LEN: usize = 1 + Tail::LEN;
}

/// Looks up the type at index `U` of a type list.
///
/// Indexing past the end of the list is a type error.
pub trait At<U> {
    type Output;
}

impl<Head, Tail> At<UTerm> for (Head, Tail) {
    type Output = Head;
}

impl<Head, Tail, U> At<UInt<U>> for (Head, Tail)
where
    Tail: At<U>,
{
    type Output = Tail::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(U0::VALUE, 0);
        assert_eq!(U7::VALUE, 7);
        assert_eq!(U31::VALUE, 31);
        assert_eq!(<(u8, (u16, (u32, ()))) as Count>::LEN, 3);
        assert_eq!(<() as Count>::LEN, 0);
    }

    #[test]
    fn lookup() {
        fn same<A: 'static, B: 'static>() -> bool {
            core::any::TypeId::of::<A>() == core::any::TypeId::of::<B>()
        }
        type L = (u8, (u16, (u32, ())));
        assert!(same::<<L as At<U0>>::Output, u8>());
        assert!(same::<<L as At<U2>>::Output, u32>());
    }
}
