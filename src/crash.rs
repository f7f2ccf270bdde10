//! Fatal diagnostics.
//!
//! Accessing the wrong alternative through a checked accessor is a
//! programmer error, not a recoverable one: it logs an `error` record on the
//! `choice` target and panics. The panic is the crate's one fatal path. Under
//! `panic = "abort"` it ends the process; under unwinding it reaches whatever
//! boundary catches panics, and the choice it came from is left untouched.
//! Callers that would rather branch get an [`AccessError`] from
//! [`Choice::try_get`].
//!
//! [`Choice::try_get`]: crate::Choice::try_get

use core::panic::Location;

/// The requested alternative is not the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("attempted access of incorrect alternative of Choice; {expected} != {actual}")]
pub struct AccessError {
    /// The index that was asked for.
    pub expected: usize,
    /// The index that is active.
    pub actual: usize,
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn wrong_alternative(expected: usize, actual: usize) -> ! {
    let err = AccessError { expected, actual };
    let loc = Location::caller();
    log::error!(target: "choice", "{loc}: {err}");
    panic!("{err}")
}

/// Escalates a panic to an abort while it is alive.
///
/// Armed around destructor calls that happen between tearing down one
/// alternative and constructing the next, where unwinding would expose a
/// choice with nothing in it.
pub(crate) struct AbortOnUnwind;

impl AbortOnUnwind {
    pub(crate) fn disarm(self) {
        core::mem::forget(self);
    }
}

impl Drop for AbortOnUnwind {
    fn drop(&mut self) {
        panic!("a destructor panicked while replacing the active alternative of a Choice");
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn message() {
        let err = AccessError {
            expected: 1,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "attempted access of incorrect alternative of Choice; 1 != 0"
        );
    }

    #[test]
    #[should_panic(expected = "3 != 1")]
    fn crashes() {
        wrong_alternative(3, 1);
    }
}
