//! Various actions we take on a [`Subject`] and control [`Value`], asserting invariants along the
//! way.

use arbitrary::Arbitrary;
use compact_variant::{
    Empty,
    VisitMut,
    Visitor,
};

use crate::{
    hash_of,
    Kind,
    Subject,
    Value,
};

#[derive(Arbitrary, Debug)]
pub enum Action {
    /// Destroy whatever is live and construct a new alternative
    Emplace(Value),
    /// Construct through the fallible constructor, which fails with `Err`
    TryEmplace(Result<Value, u8>),
    /// Return to the empty alternative
    Reset,
    /// Move the whole variant out, leaving an empty one behind
    Take,
    /// Move the live alternative out, if it's of the given kind
    TakeValue(Kind),
    /// Swap in a new variant, checking we get the previous one back
    Replace(Value),
    /// Check that a clone is equal, and holds the same alternative
    CloneAndCompare,
    /// Check equality, ordering, and hashing against another variant
    Compare(Value),
    /// Append to the live `String`, if there is one
    PushStr(String),
    /// Bump the live alternative, whichever it is
    Bump(u8),
}

impl Action {
    pub fn perform(self, control: &mut Value, subject: &mut Subject) {
        use Action::*;

        match self {
            Emplace(value) => {
                value.clone().emplace_into(subject);
                *control = value;
            }
            TryEmplace(Ok(value)) => {
                value.clone().try_emplace_into(subject);
                *control = value;
            }
            TryEmplace(Err(code)) => {
                let result = subject.try_emplace_with::<String, _, _>(|| Err(code));
                assert_eq!(result, Err(code));

                // a failed construction always leaves us empty
                assert!(subject.is_empty());
                *control = Value::Empty;
            }
            Reset => {
                subject.reset();
                *control = Value::Empty;
            }
            Take => {
                let taken = subject.take();
                let expected = std::mem::replace(control, Value::Empty);
                expected.assert_matches(&taken);
            }
            TakeValue(kind) => {
                let taken = kind.take_value(subject);
                if kind == control.kind() {
                    let expected = std::mem::replace(control, Value::Empty);
                    assert_eq!(taken, Some(expected));
                } else {
                    assert_eq!(taken, None);
                }
            }
            Replace(value) => {
                let previous = value.clone().replace_into(subject);
                let expected = std::mem::replace(control, value);
                expected.assert_matches(&previous);
            }
            CloneAndCompare => {
                let clone = subject.clone();
                assert_eq!(&clone, subject);
                assert_eq!(clone.which(), subject.which());
                assert_eq!(hash_of(&clone), hash_of(subject));
                control.assert_matches(&clone);
            }
            Compare(value) => {
                let other = value.to_variant();
                assert_eq!(*subject == other, *control == value);
                assert_eq!((*subject).cmp(&other), (*control).cmp(&value));
                assert_eq!(
                    (*subject).partial_cmp(&other),
                    (*control).partial_cmp(&value)
                );
                if *subject == other {
                    assert_eq!(hash_of(subject), hash_of(&other));
                }
            }
            PushStr(s) => {
                if let Some(text) = subject.try_get_mut::<String, _>() {
                    text.push_str(&s);
                }
                if let Value::Text(text) = control {
                    text.push_str(&s);
                }
            }
            Bump(by) => {
                subject.visit_mut(Bumper(by));
                bump_control(control, by);
            }
        }

        control.assert_matches(subject);
    }
}

/// Changes any alternative in a way that's easy to mirror on a [`Value`]
struct Bumper(u8);

impl Visitor for Bumper {
    type Output = ();
}

impl VisitMut<Empty> for Bumper {
    fn visit_mut(&mut self, _: &mut Empty) {}
}

impl VisitMut<u32> for Bumper {
    fn visit_mut(&mut self, value: &mut u32) {
        *value = value.wrapping_add(u32::from(self.0));
    }
}

impl VisitMut<i64> for Bumper {
    fn visit_mut(&mut self, value: &mut i64) {
        *value = value.wrapping_sub(i64::from(self.0));
    }
}

impl VisitMut<String> for Bumper {
    fn visit_mut(&mut self, value: &mut String) {
        value.push(char::from(b'a' + self.0 % 26));
    }
}

impl VisitMut<Vec<u8>> for Bumper {
    fn visit_mut(&mut self, value: &mut Vec<u8>) {
        value.push(self.0);
    }
}

impl VisitMut<Box<str>> for Bumper {
    fn visit_mut(&mut self, value: &mut Box<str>) {
        let mut text = String::from(core::mem::take(value));
        text.push(char::from(b'a' + self.0 % 26));
        *value = text.into_boxed_str();
    }
}

impl VisitMut<char> for Bumper {
    fn visit_mut(&mut self, value: &mut char) {
        *value = value.to_ascii_uppercase();
    }
}

fn bump_control(control: &mut Value, by: u8) {
    match control {
        Value::Empty => {}
        Value::U32(v) => *v = v.wrapping_add(u32::from(by)),
        Value::I64(v) => *v = v.wrapping_sub(i64::from(by)),
        Value::Text(v) => v.push(char::from(b'a' + by % 26)),
        Value::Bytes(v) => v.push(by),
        Value::Boxed(v) => {
            let mut text = String::from(core::mem::take(v));
            text.push(char::from(b'a' + by % 26));
            *v = text.into_boxed_str();
        }
        Value::Char(v) => *v = v.to_ascii_uppercase(),
    }
}
