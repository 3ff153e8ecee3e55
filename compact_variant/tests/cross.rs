use compact_variant::{
    Error,
    Variant,
};
use quickcheck_macros::quickcheck;

fn valueless<L: compact_variant::AlternativeSet>(mut v: Variant<L>) -> Variant<L> {
    drop(v.take());
    v
}

#[test]
fn test_equal_across_sets() {
    let a: Variant<(i32, bool)> = Variant::new(7_i32);
    let b: Variant<(i32, bool, f64)> = Variant::new(7_i32);
    assert!(a == b);
    assert!(b == a);
    assert!(a <= b && a >= b);
}

#[test]
fn test_same_number_different_type() {
    let a: Variant<(i32, bool)> = Variant::new(7_i32);
    let b: Variant<(i32, bool, f64)> = Variant::new(7.0_f64);
    assert!(a != b);
    assert!(!(a < b) && !(a > b));
}

#[test]
fn test_same_type_at_different_positions() {
    let a: Variant<(bool, String)> = Variant::new(String::from("sea"));
    let b: Variant<(String, u8)> = Variant::new(String::from("sea"));
    let c: Variant<(String, u8)> = Variant::new(String::from("tac"));

    assert!(a == b);
    assert!(a < c);
}

#[test]
fn test_valueless_across_sets() {
    let a = valueless(Variant::<(i32, bool)>::new(true));
    let b = valueless(Variant::<(f64,)>::new(1.0_f64));
    let c: Variant<(f64,)> = Variant::new(f64::MIN);

    assert!(a == b);
    assert!(a != c);
    assert!(a < c);
}

#[test]
fn test_bad_assignment_leaves_destination() {
    let mut dest: Variant<(i32, bool)> = Variant::new(false);
    let err = dest
        .try_assign_across(&Variant::<(f64,)>::new(7.9_f64))
        .unwrap_err();

    assert!(matches!(err, Error::BadAssignment(_)));
    assert_eq!(
        err.to_string(),
        "bad variant assignment: `f64` is not an alternative of the destination"
    );
    assert_eq!(dest.get::<1>(), Ok(&false));
}

#[test]
fn test_assign_across_then_compare() {
    let mut dest: Variant<(i32, bool)> = Variant::new(false);
    let source: Variant<(f64, i32)> = Variant::new(-3_i32);

    dest.try_assign_across(&source).unwrap();
    assert_eq!(dest.index(), 0);
    assert!(dest == source);
}

#[quickcheck]
fn quickcheck_assign_across_agrees_with_eq(value: i32, flag: bool) -> bool {
    let mut dest: Variant<(bool, i32)> = Variant::new(flag);
    let source: Variant<(i32, char)> = Variant::new(value);

    dest.try_assign_across(&source).is_ok() && dest == source
}
