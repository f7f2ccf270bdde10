// Construction, replacement and destruction of choices

mod common;

use choice::{tag::*, Choice};
use common::*;

type C = Choice![u32, Tracked, Tracked];

#[test]
fn drops_exactly_once() {
    let live = counter();
    {
        let c = C::new::<_, U1>(Tracked::new(1, &live));
        assert_eq!(live.get(), 1);

        let d = c.clone();
        assert_eq!(live.get(), 2);
        assert_eq!(d.which(), 1);
        assert_eq!(d, c);
    }
    assert_eq!(live.get(), 0);
}

#[test]
fn emplace_same_index_keeps_address() {
    let live = counter();
    let mut c = C::new::<_, U2>(Tracked::new(1, &live));
    let before = c.as_ptr::<Tracked, U2>();

    let slot = c.emplace::<_, U2>(Tracked::new(2, &live));
    assert_eq!(slot.id, 2);
    assert_eq!(c.as_ptr::<Tracked, U2>(), before);
    assert_eq!(live.get(), 1);
}

#[test]
fn emplace_other_index() {
    let live = counter();
    let mut c = C::new::<_, U1>(Tracked::new(1, &live));

    assert_eq!(*c.emplace(7u32), 7);
    assert_eq!(live.get(), 0);
    assert_eq!(c.which(), 0);

    c.emplace::<_, U2>(Tracked::new(3, &live));
    assert_eq!(c.get::<Tracked, U2>().map(|t| t.id), Some(3));
    assert_eq!(c.get::<Tracked, U1>(), None);
    assert!(c.as_ptr::<u32, _>().is_null());
    assert_eq!(live.get(), 1);
}

#[test]
fn emplace_with_rebuilds() {
    let live = counter();
    let mut c = C::new::<_, U1>(Tracked::new(1, &live));
    let t = c.emplace_with::<_, U1>(|| Tracked::new(2, &live));
    assert_eq!(t.id, 2);
    assert_eq!(live.get(), 1);
}

#[test]
fn clone_from() {
    let live = counter();
    let src = C::new::<_, U1>(Tracked::new(5, &live));

    let mut other = C::new(9u32);
    other.clone_from(&src);
    assert_eq!(other, src);
    assert_eq!(live.get(), 2);

    let mut same = C::new::<_, U1>(Tracked::new(6, &live));
    same.clone_from(&src);
    assert_eq!(same.at::<Tracked, U1>().id, 5);
    assert_eq!(live.get(), 3);
}

#[test]
fn copied_when_trivial() {
    let c = <Choice![u8, f64, char]>::new('x');
    let d = c.copied();
    assert_eq!(c, d);
    assert_eq!(c.at::<char, _>(), &'x');
}

#[test]
fn unwrap_and_restore() {
    let live = counter();
    let c = C::new::<_, U2>(Tracked::new(4, &live));

    let rem = c.try_unwrap::<u32, _>().unwrap_err();
    assert_eq!(rem.which(), 1);

    let c: C = rem.restore::<_, _, u32, _>();
    assert_eq!(c.which(), 2);

    let rem = c.try_unwrap::<u32, _>().unwrap_err();
    let last = rem.try_unwrap::<Tracked, U0>().unwrap_err();
    assert_eq!(last.id, 4);
    assert_eq!(live.get(), 1);

    drop(last.into_inner());
    assert_eq!(live.get(), 0);
}

#[test]
fn delayed_init() {
    let live = counter();
    let mut place = C::uninit();
    C::write_at::<_, U2>(&mut place, Tracked::new(8, &live));

    let c = unsafe { place.assume_init() };
    assert_eq!(c.at::<Tracked, U2>().id, 8);
    drop(c);
    assert_eq!(live.get(), 0);
}

#[test]
fn unchecked_access() {
    let mut c = <Choice![i32, i32]>::new::<_, U1>(1);
    unsafe { *c.get_unchecked_mut::<i32, U1>() += 1 };
    assert_eq!(unsafe { *c.get_unchecked::<i32, U1>() }, 2);
    assert_eq!(c.get_mut::<i32, U0>(), None);
}

#[test]
#[should_panic(expected = "1 != 0")]
fn wrong_alternative_crashes() {
    let c = C::new(1u32);
    c.at::<Tracked, U1>();
}

#[test]
fn wrong_alternative_leaves_choice_intact() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let live = counter();
    let mut c = C::new::<_, U2>(Tracked::new(4, &live));
    let caught = catch_unwind(AssertUnwindSafe(|| {
        c.at_mut::<Tracked, U1>().id = 0;
    }));
    assert!(caught.is_err());

    assert_eq!(c.which(), 2);
    assert_eq!(c.at::<Tracked, U2>().id, 4);
    assert_eq!(live.get(), 1);
    drop(c);
    assert_eq!(live.get(), 0);
}

#[test]
fn layouts_share_lifecycle() {
    let live = counter();
    type Flat = Choice![tagged: u32, Tracked, Tracked];
    let mut tagged = Flat::new::<_, U1>(Tracked::new(1, &live));
    let mut nested = C::new::<_, U1>(Tracked::new(1, &live));
    assert_eq!(live.get(), 2);

    tagged.emplace::<_, U2>(Tracked::new(2, &live));
    nested.emplace::<_, U2>(Tracked::new(2, &live));
    assert_eq!(live.get(), 2);
    assert_eq!(tagged, nested);

    tagged.emplace(7u32);
    nested.emplace(7u32);
    assert_eq!(live.get(), 0);
    assert_eq!(tagged, nested);
}
