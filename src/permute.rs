//! Reordering the alternatives of a type list.
//!
//! A permutation is itself a type list of indices: `T![U2, U0, U1]` applied to
//! `T![A, B, C]` yields `T![C, A, B]`, i.e. the `i`-th alternative of the
//! result is alternative `P[i]` of the source. An index past the end of the
//! source list is a type error, and a list that is not a bijection fails
//! [`Permutation::CHECK`] during compilation.

use crate::{
    repr::SumList,
    tag::{At, Tag},
};

/// Index lists that can reorder the type list `L`.
pub trait Permutation<L: SumList> {
    /// The reordered type list.
    type Output: SumList;

    /// The number of indices in this list.
    const LEN: usize;

    /// Which source indices this list mentions.
    const SEEN: [bool; 256];

    /// Whether no source index is mentioned twice.
    const DISTINCT: bool;

    /// Evaluates to `()` for a bijection on `0..L::LEN`; fails to compile
    /// otherwise.
    const CHECK: () = assert!(
        Self::LEN == L::LEN && Self::DISTINCT,
        "the index list is not a permutation of the alternatives"
    );

    /// The position in this list of source index `tag`, i.e. the inverse
    /// permutation.
    fn position(tag: u8) -> Option<u8>;
}

impl<L: SumList> Permutation<L> for () {
    type Output = ();
    const LEN: usize = 0;
    const SEEN: [bool; 256] = [false; 256];
    const DISTINCT: bool = true;

    fn position(_: u8) -> Option<u8> {
        None
    }
}

impl<L, P, Ps> Permutation<L> for (P, Ps)
where
    L: SumList + At<P>,
    P: Tag,
    Ps: Permutation<L>,
{
    type Output = (<L as At<P>>::Output, Ps::Output);
    const LEN: usize = 1 + Ps::LEN;
    const SEEN: [bool; 256] = {
        let mut seen = Ps::SEEN;
        seen[P::VALUE as usize] = true;
        seen
    };
    const DISTINCT: bool = Ps::DISTINCT && !Ps::SEEN[P::VALUE as usize];

    fn position(tag: u8) -> Option<u8> {
        if P::VALUE == tag {
            Some(0)
        } else {
            Ps::position(tag).map(|pos| pos + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::*;

    type L = (u8, (u16, (u32, ())));

    #[test]
    fn inverse() {
        type P = (U2, (U0, (U1, ())));
        assert!(<P as Permutation<L>>::DISTINCT);
        assert_eq!(<P as Permutation<L>>::position(1), Some(2));
        assert_eq!(<P as Permutation<L>>::position(2), Some(0));
        assert_eq!(<P as Permutation<L>>::position(0), Some(1));
    }

    #[test]
    fn duplicates() {
        type P = (U2, (U2, (U1, ())));
        assert!(!<P as Permutation<L>>::DISTINCT);
        assert_eq!(<P as Permutation<L>>::LEN, 3);
    }
}
