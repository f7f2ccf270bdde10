// Visiting the active alternative

mod common;

use choice::{t, tag::*, Choice, IndexOnly, Indexed, Nullary};
use common::*;

#[test]
fn single() {
    let c = <Choice![i32]>::new(5);
    assert_eq!(c.dispatch(t![|x: &i32| *x * 2]), 10);
}

#[test]
fn two() {
    let c = <Choice![i32, String]>::new("ab".to_string());
    let r = c.dispatch(t![|x: &i32| x.to_string(), |s: &String| s.clone()]);
    assert_eq!(r, "ab");
}

#[test]
fn many_with_index() {
    type C = Choice![u8, u16, u32, u64, ()];
    let values = [
        C::new(1u8),
        C::new(2u16),
        C::new(3u32),
        C::new(4u64),
        C::new(()),
    ];
    for (i, c) in values.iter().enumerate() {
        let (index, value) = c.dispatch(t![
            Indexed(|i: usize, x: &u8| (i, *x as u64)),
            Indexed(|i: usize, x: &u16| (i, *x as u64)),
            Indexed(|i: usize, x: &u32| (i, *x as u64)),
            Indexed(|i: usize, x: &u64| (i, *x)),
            IndexOnly(|i: usize| (i, 0u64)),
        ]);
        assert_eq!(index, i);
        assert_eq!(value, if i == 4 { 0 } else { i as u64 + 1 });
    }
}

#[test]
fn repeated_types() {
    let c = <Choice![i32, i32, i32]>::new::<_, U2>(7);
    let r = c.dispatch(t![|_: &i32| 'a', |_: &i32| 'b', |_: &i32| 'c']);
    assert_eq!(r, 'c');
}

#[test]
fn mutate() {
    let mut c = <Choice![i32, String]>::new(5);
    c.dispatch_mut(t![|x: &mut i32| *x += 1, |s: &mut String| s.push('!')]);
    assert_eq!(c.get::<i32, _>(), Some(&6));
}

#[test]
fn consume() {
    let c = <Choice![i32, String, ()]>::new("own".to_string());
    let s = c.dispatch_into(t![
        |x: i32| x.to_string(),
        |s: String| s,
        Nullary(String::new),
    ]);
    assert_eq!(s, "own");
}

#[test]
fn consume_drops_once() {
    let live = counter();
    let c = <Choice![u8, Tracked]>::new(Tracked::new(1, &live));
    c.dispatch_into(t![|_: u8| (), drop::<Tracked>]);
    assert_eq!(live.get(), 0);
}
