// Pattern matching by alternative type

use choice::{match_choice, Choice, Maybe};

#[derive(Debug, Clone, PartialEq)]
struct Circle(f64);

#[derive(Debug, Clone, PartialEq)]
struct Rect {
    w: f64,
    h: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Empty;

type Shape = Choice![Circle, Rect, Empty];

fn describe(s: Shape) -> &'static str {
    match_choice!(s {
        Circle(r) if r == 0.0 => "dot",
        Circle(_) => "circle",
        Rect { w, h } if w == h => "square",
        Rect { .. } => "rect",
        Empty => "empty",
    })
}

#[test]
fn by_type() {
    assert_eq!(describe(Shape::new(Circle(0.0))), "dot");
    assert_eq!(describe(Shape::new(Circle(1.0))), "circle");
    assert_eq!(describe(Shape::new(Rect { w: 2.0, h: 2.0 })), "square");
    assert_eq!(describe(Shape::new(Rect { w: 2.0, h: 3.0 })), "rect");
    assert_eq!(describe(Shape::new(Empty)), "empty");
}

#[test]
fn literals_and_wildcard() {
    type C = Choice![u32, &'static str, Empty];

    let name = |c: C| {
        match_choice!(c {
            0u32 => "zero",
            "hi" => "greeting",
            Empty => "empty",
            _ => "other",
        })
    };

    assert_eq!(name(C::new(0u32)), "zero");
    assert_eq!(name(C::new(5u32)), "other");
    assert_eq!(name(C::new("hi")), "greeting");
    assert_eq!(name(C::new("bye")), "other");
    assert_eq!(name(C::new(Empty)), "empty");
}

#[test]
fn root_binding_and_unit() {
    let area = |m: Maybe<Rect>| {
        match_choice!(m {
            r @ Rect { .. } => r.w * r.h,
            () => 0.0,
        })
    };

    assert_eq!(area(Maybe::some(Rect { w: 2.0, h: 4.0 })), 8.0);
    assert_eq!(area(Maybe::none()), 0.0);
}

#[test]
fn rejected_values_are_kept() {
    type C = Choice![tagged: u32, Rect];

    let kind = |c: C| {
        match_choice!(c {
            1u32 => "one",
            Rect { w, .. } if w > 1.0 => "wide",
            Rect { .. } => "narrow",
            _ => "big",
        })
    };

    assert_eq!(kind(C::new(1u32)), "one");
    assert_eq!(kind(C::new(40u32)), "big");
    assert_eq!(kind(C::new(Rect { w: 2.0, h: 1.0 })), "wide");
    assert_eq!(kind(C::new(Rect { w: 0.5, h: 1.0 })), "narrow");
}
