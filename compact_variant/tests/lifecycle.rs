use std::cell::{
    Cell,
    RefCell,
};
use std::collections::BTreeSet;
use std::panic::{
    self,
    AssertUnwindSafe,
};
use std::rc::Rc;

use compact_variant::{
    Empty,
    Variant,
};

/// Records which instrumented values are alive, and panics on a double destroy.
#[derive(Default)]
struct Ledger {
    next: Cell<usize>,
    live: RefCell<BTreeSet<usize>>,
    destroyed: Cell<usize>,
}

impl Ledger {
    fn live(&self) -> usize {
        self.live.borrow().len()
    }
}

/// An alternative that reports its construction and destruction to a [`Ledger`].
struct Tracked {
    id: usize,
    value: i32,
    ledger: Rc<Ledger>,
    panic_on_clone: bool,
}

impl Tracked {
    fn new(ledger: &Rc<Ledger>, value: i32) -> Self {
        let id = ledger.next.get();
        ledger.next.set(id + 1);
        assert!(ledger.live.borrow_mut().insert(id), "{id} constructed twice");

        Tracked {
            id,
            value,
            ledger: Rc::clone(ledger),
            panic_on_clone: false,
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if self.panic_on_clone {
            panic!("clone of {} failed", self.id);
        }
        Tracked::new(&self.ledger, self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        assert!(self.ledger.live.borrow_mut().remove(&self.id), "{} destroyed twice", self.id);
        self.ledger.destroyed.set(self.ledger.destroyed.get() + 1);
    }
}

type Sample = Variant<(i32, Tracked, String)>;

#[test]
fn test_construct_then_destroy_is_symmetric() {
    let ledger = Rc::new(Ledger::default());

    let variant = Sample::from_value(Tracked::new(&ledger, 1));
    assert_eq!(ledger.live(), 1);

    drop(variant);
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.destroyed.get(), 1);
}

#[test]
fn test_emplace_destroys_previous_exactly_once() {
    let ledger = Rc::new(Ledger::default());
    let mut variant = Sample::new();

    variant.emplace(Tracked::new(&ledger, 1));
    variant.emplace(Tracked::new(&ledger, 2));
    assert_eq!(ledger.destroyed.get(), 1);
    assert_eq!(ledger.live(), 1);
    assert_eq!(variant.try_get::<Tracked, _>().map(|t| t.value), Some(2));

    variant.emplace(String::from("hi"));
    assert_eq!(ledger.destroyed.get(), 2);
    assert_eq!(ledger.live(), 0);

    variant.reset();
    assert!(variant.is_empty());
    assert_eq!(ledger.destroyed.get(), 2);
}

#[test]
fn test_default_emplace_int_then_string() {
    let mut variant = Variant::<(i32, String)>::default();
    assert_eq!(variant.which().position(), 0);

    variant.emplace(42);
    assert_eq!(variant.which().position(), 1);
    assert_eq!(variant.try_get::<i32, _>(), Some(&42));
    assert_eq!(variant.try_get::<String, _>(), None);

    variant.emplace(String::from("hi"));
    assert_eq!(variant.which().position(), 2);
    assert_eq!(variant.try_get::<i32, _>(), None);
    assert_eq!(variant.try_get::<String, _>().map(String::as_str), Some("hi"));
}

#[test]
fn test_clone_is_independent() {
    let ledger = Rc::new(Ledger::default());

    let original = Sample::from_value(Tracked::new(&ledger, 7));
    let clone = original.clone();
    assert_eq!(ledger.live(), 2);
    assert_eq!(clone.which(), original.which());
    assert_eq!(clone.try_get::<Tracked, _>().map(|t| t.value), Some(7));

    drop(original);
    assert_eq!(ledger.live(), 1);
    drop(clone);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_moves_do_not_destroy() {
    let ledger = Rc::new(Ledger::default());

    let variant = Sample::from_value(Tracked::new(&ledger, 3));
    let moved = variant;
    let boxed = Box::new(moved);
    assert_eq!(ledger.destroyed.get(), 0);

    let tracked = (*boxed).into_value::<Tracked, _>().ok().map(|t| t.value);
    assert_eq!(tracked, Some(3));
    assert_eq!(ledger.destroyed.get(), 1);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_into_value_moves_out() {
    let ledger = Rc::new(Ledger::default());

    let variant = Sample::from_value(Tracked::new(&ledger, 4));
    let variant = match variant.into_value::<String, _>() {
        Ok(_) => panic!("String is not live"),
        Err(variant) => variant,
    };
    assert_eq!(ledger.live(), 1);

    let tracked = variant.into_value::<Tracked, _>().ok();
    assert_eq!(ledger.destroyed.get(), 0);
    assert_eq!(tracked.as_ref().map(|t| t.value), Some(4));

    drop(tracked);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_replace_hands_back_previous() {
    let ledger = Rc::new(Ledger::default());

    let mut variant = Sample::from_value(Tracked::new(&ledger, 5));
    let previous = variant.replace(10_i32);
    assert_eq!(ledger.live(), 1);
    assert_eq!(variant.try_get::<i32, _>(), Some(&10));

    drop(previous);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_panic_in_emplace_with_leaves_empty() {
    let ledger = Rc::new(Ledger::default());
    let mut variant = Sample::from_value(Tracked::new(&ledger, 1));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        variant.emplace_with::<Tracked, _>(|| panic!("constructor failed"));
    }));
    assert!(result.is_err());

    assert!(variant.is_empty());
    assert_eq!(variant.try_get::<Empty, _>(), Some(&Empty));
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.destroyed.get(), 1);
}

#[test]
fn test_failed_try_emplace_leaves_empty() {
    let ledger = Rc::new(Ledger::default());
    let mut variant = Sample::from_value(Tracked::new(&ledger, 1));

    let result = variant.try_emplace_with::<String, _, _>(|| Err("no string today"));
    assert_eq!(result.err(), Some("no string today"));
    assert!(variant.is_empty());
    assert_eq!(ledger.live(), 0);

    let tracked = variant
        .try_emplace_with(|| Ok::<_, ()>(Tracked::new(&ledger, 2)))
        .map(|t| t.value);
    assert_eq!(tracked, Ok(2));
    assert_eq!(ledger.live(), 1);
}

#[test]
fn test_panic_in_clone_leaks_nothing() {
    let ledger = Rc::new(Ledger::default());

    let mut tracked = Tracked::new(&ledger, 9);
    tracked.panic_on_clone = true;
    let variant = Sample::from_value(tracked);

    let result = panic::catch_unwind(AssertUnwindSafe(|| variant.clone()));
    assert!(result.is_err());
    assert_eq!(ledger.live(), 1);

    drop(variant);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_take_value_on_mismatch_keeps_value() {
    let ledger = Rc::new(Ledger::default());
    let mut variant = Sample::from_value(Tracked::new(&ledger, 6));

    assert_eq!(variant.take_value::<i32, _>(), None);
    assert_eq!(ledger.live(), 1);

    let taken = variant.take_value::<Tracked, _>();
    assert!(variant.is_empty());
    assert_eq!(ledger.live(), 1);

    drop(taken);
    drop(variant);
    assert_eq!(ledger.live(), 0);
}
