use std::mem::{
    self,
    ManuallyDrop,
};
use std::rc::Rc;

use compact_variant::{
    Alternatives,
    CopyVariant,
    Discriminant,
    Empty,
    Variant,
};
use static_assertions::{
    assert_impl_all,
    assert_not_impl_any,
    const_assert,
};

type Number = CopyVariant<(i32, f32)>;

// trivially copyable alternatives make a trivially copyable variant
assert_impl_all!(Number: Copy, Clone, Send, Sync, PartialEq, PartialOrd);
const_assert!(!mem::needs_drop::<Number>());

// a single alternative with drop glue is enough to rule it out
assert_not_impl_any!(Variant<(i32, String)>: Copy);
assert_impl_all!(Variant<(i32, String)>: Clone, Send, Sync, Eq, Ord, std::hash::Hash);

// `f32` has no total order, and `Rc` is neither `Send` nor `Sync`
assert_not_impl_any!(Variant<(i32, f32)>: Eq, Ord);
assert_not_impl_any!(Variant<(i32, std::rc::Rc<u8>)>: Send, Sync);
assert_not_impl_any!(Variant<(std::cell::Cell<u8>,)>: Sync);

/// Neither `Copy` nor `Clone`, and without drop glue.
struct Point {
    x: i32,
    y: i32,
}

type Plain = (Point, u64);
type Handles = (ManuallyDrop<Rc<i32>>, Point);

// trivially destructible without being copyable, so only the destructor table is skipped
const_assert!(!<Plain as Alternatives>::NEEDS_DROP);
const_assert!(!<Handles as Alternatives>::NEEDS_DROP);
assert_not_impl_any!(Point: Copy, Clone);
assert_not_impl_any!(Variant<Plain>: Copy, Clone);

const EMPTY: Number = CopyVariant::new();
const_assert!(EMPTY.is_empty());

#[test]
fn test_const_empty() {
    assert!(EMPTY.is_empty());
    assert_eq!(EMPTY.which(), Discriminant::EMPTY);
    assert_eq!(EMPTY.try_get::<Empty, _>(), Some(&Empty));
}

#[test]
fn test_trivially_copyable_scenario() {
    let float = Number::from_value(2.5_f32);
    let copy = float;

    assert_eq!(copy.which(), float.which());
    assert_eq!(copy.get_copied::<f32, _>(), Some(2.5));
    assert_eq!(copy, float);
}

#[test]
fn test_copy_variant_into_variant() {
    let float = Number::from_value(2.5_f32);
    let variant: Variant<(i32, f32)> = float.into();

    assert_eq!(variant.which(), float.which());
    assert_eq!(variant.try_get::<f32, _>(), Some(&2.5));
}

/// Building and overwriting alternatives at compile time needs `&mut` in `const`.
#[rustversion::since(1.83)]
mod constant {
    use compact_variant::{
        CopyVariant,
        Discriminant,
        Variant,
        P1,
    };
    use static_assertions::const_assert;

    use super::{
        Number,
        EMPTY,
    };

    const INT: Number = CopyVariant::from_value(1_i32);
    const FLOAT: Number = CopyVariant::from_value(2.5_f32);

    const FLOAT_VALUE: Option<f32> = FLOAT.get_copied();
    const FLOAT_WHICH: Discriminant = FLOAT.which();
    const_assert!(INT.holds::<i32, P1>());

    const REASSIGNED: Number = {
        let mut number = INT;
        number.set(0.5_f32);
        if let Some(value) = number.try_get_mut::<f32, _>() {
            *value *= 4.0;
        }
        number
    };

    #[test]
    fn test_const_constructed() {
        assert_eq!(FLOAT_VALUE, Some(2.5));
        assert_eq!(FLOAT_WHICH.position(), 2);
        assert_eq!(INT.get_copied::<i32, _>(), Some(1));
        assert_eq!(INT.get_copied::<f32, _>(), None);
        assert!(EMPTY < INT && INT < FLOAT);
    }

    #[test]
    fn test_const_reassigned() {
        assert_eq!(REASSIGNED.get_copied::<f32, _>(), Some(2.0));
        assert_eq!(REASSIGNED.get_copied::<i32, _>(), None);
    }

    #[test]
    fn test_const_general_tier_with_value() {
        const ANSWER: Variant<(i32, String)> = Variant::from_value(42_i32);
        assert_eq!(ANSWER.try_get::<i32, _>(), Some(&42));
    }
}

#[test]
fn test_const_general_tier() {
    const NOTHING: Variant<(i32, String)> = Variant::new();
    assert!(NOTHING.is_empty());
}

#[test]
fn test_layout_matches_largest_alternative() {
    assert_eq!(mem::size_of::<Number>(), 8);
    assert_eq!(mem::size_of::<CopyVariant<(u8, u16)>>(), 4);
    assert_eq!(mem::size_of::<Variant<(u8, [u8; 7])>>(), 8);
    assert_eq!(mem::size_of::<Variant<([u32; 3], u8)>>(), 16);
    assert_eq!(mem::align_of::<Variant<(u8, u64)>>(), mem::align_of::<u64>());
}

#[test]
fn test_trivially_destructible_not_copyable() {
    let mut variant = Variant::<Plain>::from_value(Point { x: 1, y: -1 });
    assert_eq!(variant.try_get::<Point, _>().map(|p| (p.x, p.y)), Some((1, -1)));

    if let Some(point) = variant.try_get_mut::<Point, _>() {
        point.y = 7;
    }
    let point = variant.replace(3_u64).into_value::<Point, _>().ok();
    assert_eq!(point.map(|p| (p.x, p.y)), Some((1, 7)));

    variant.reset();
    assert!(variant.is_empty());
}

#[test]
fn test_trivially_destructible_reset_skips_destructors() {
    let rc = Rc::new(5);
    let mut variant = Variant::<Handles>::from_value(ManuallyDrop::new(Rc::clone(&rc)));
    assert_eq!(Rc::strong_count(&rc), 2);

    // leaving the alternative runs no destructor, not even through the drop table
    variant.emplace(Point { x: 0, y: 0 });
    assert_eq!(Rc::strong_count(&rc), 2);

    variant.emplace(ManuallyDrop::new(Rc::clone(&rc)));
    drop(variant);
    assert_eq!(Rc::strong_count(&rc), 3);

    // SAFETY: both clones above were leaked on purpose
    unsafe {
        Rc::decrement_strong_count(Rc::as_ptr(&rc));
        Rc::decrement_strong_count(Rc::as_ptr(&rc));
    }
    assert_eq!(Rc::strong_count(&rc), 1);
}
