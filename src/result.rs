//! A success-or-failure value as a two-alternative choice: the value at index
//! 0, the error at index 1.

use crate::{
    storage::Storage,
    tag::{U0, U1},
    Choice,
};

pub type Outcome<T, E> = Choice![T, E];

impl<T, E, S> Choice<(T, (E, ())), S>
where
    S: Storage<List = (T, (E, ()))>,
{
    pub fn ok(value: T) -> Self {
        Self::new::<T, U0>(value)
    }

    pub fn err(error: E) -> Self {
        Self::new::<E, U1>(error)
    }

    pub fn is_ok(&self) -> bool {
        self.which() == 0
    }

    pub fn is_err(&self) -> bool {
        self.which() == 1
    }

    pub fn as_result(&self) -> Result<&T, &E> {
        match self.get::<T, U0>() {
            Some(value) => Ok(value),
            None => Err(unsafe { self.get_unchecked::<E, U1>() }),
        }
    }

    pub fn as_result_mut(&mut self) -> Result<&mut T, &mut E> {
        if self.is_ok() {
            Ok(unsafe { self.get_unchecked_mut::<T, U0>() })
        } else {
            Err(unsafe { self.get_unchecked_mut::<E, U1>() })
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        self.try_unwrap::<T, U0>().map_err(Choice::into_inner)
    }
}

impl<T, E, S> From<Result<T, E>> for Choice<(T, (E, ())), S>
where
    S: Storage<List = (T, (E, ()))>,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Self::ok(value),
            Err(error) => Self::err(error),
        }
    }
}

impl<T, E, S> From<Choice<(T, (E, ())), S>> for Result<T, E>
where
    S: Storage<List = (T, (E, ()))>,
{
    fn from(value: Choice<(T, (E, ())), S>) -> Self {
        value.into_result()
    }
}
