// Shared helpers for the integration tests

#![allow(dead_code)]

use std::{cell::Cell, num::NonZeroU32, ptr, rc::Rc};

use choice::{tag::*, Choice, Niche};
use proptest::prelude::*;

/// Counts live instances, so tests can check that every value is dropped
/// exactly once.
pub fn counter() -> Rc<Cell<i64>> {
    Rc::new(Cell::new(0))
}

#[derive(Debug)]
pub struct Tracked {
    pub id: u32,
    live: Rc<Cell<i64>>,
}

impl Tracked {
    pub fn new(id: u32, live: &Rc<Cell<i64>>) -> Self {
        live.set(live.get() + 1);
        Tracked {
            id,
            live: live.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(self.id, &self.live)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A `Tracked` behind a non-zero key, so both the compiler and `Niche` see
/// a niche in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed {
    pub key: NonZeroU32,
    pub tracked: Tracked,
}

impl Keyed {
    pub fn new(id: u32, live: &Rc<Cell<i64>>) -> Self {
        Keyed {
            key: NonZeroU32::new(id).expect("keys are non-zero"),
            tracked: Tracked::new(id, live),
        }
    }
}

unsafe impl Niche for Keyed {
    fn write_niche(slot: *mut Self) {
        NonZeroU32::write_niche(unsafe { ptr::addr_of_mut!((*slot).key) })
    }

    unsafe fn is_niche(slot: *const Self) -> bool {
        unsafe { NonZeroU32::is_niche(ptr::addr_of!((*slot).key)) }
    }
}

pub type Small = Choice![u8, i32, ()];

/// Generate values of every alternative of `Small`
pub fn arb_small() -> impl Strategy<Value = Small> {
    prop_oneof![
        any::<u8>().prop_map(|x| Small::new::<_, U0>(x)),
        any::<i32>().prop_map(|x| Small::new::<_, U1>(x)),
        Just(()).prop_map(|x| Small::new::<_, U2>(x)),
    ]
}

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Emplace,
    EmplaceWith,
    CloneFrom,
}

/// One write into a choice: which operation, which alternative, which id.
#[derive(Debug, Clone)]
pub struct Step {
    pub action: Action,
    pub index: usize,
    pub id: u32,
}

/// Generate write sequences over the alternatives `0..width`
pub fn arb_steps(width: usize) -> impl Strategy<Value = Vec<Step>> {
    let action = prop_oneof![
        Just(Action::Emplace),
        Just(Action::EmplaceWith),
        Just(Action::CloneFrom),
    ];
    let step = (action, 0..width, 1..1000u32).prop_map(|(action, index, id)| Step {
        action,
        index,
        id,
    });
    prop::collection::vec(step, 0..32)
}
