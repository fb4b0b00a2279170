use std::collections::hash_map::DefaultHasher;
use std::hash::{
    Hash,
    Hasher,
};

use arbitrary::Arbitrary;
use compact_variant::{
    Empty,
    Variant,
    Visit,
    Visitor,
};

mod actions;
pub use actions::Action;

/// The [`Variant`] under test
pub type Subject = Variant<(u32, i64, String, Vec<u8>, Box<str>, char)>;

/// A plain `enum` with the same alternatives as a [`Subject`], in the same order, so the derived
/// comparisons match what a [`Subject`] should do
#[derive(Arbitrary, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Empty,
    U32(u32),
    I64(i64),
    Text(String),
    Bytes(Vec<u8>),
    Boxed(Box<str>),
    Char(char),
}

/// Names an alternative without a value
#[derive(Arbitrary, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Empty,
    U32,
    I64,
    Text,
    Bytes,
    Boxed,
    Char,
}

/// A framework to generate a [`Subject`] and a control [`Value`], and then run a series of actions
/// and assert they agree
///
/// Used for fuzz testing
#[derive(Arbitrary, Debug)]
pub struct Scenario {
    pub creation: Value,
    pub actions: Vec<Action>,
}

impl Scenario {
    /// Run the provided scenario, asserting for correct behavior
    pub fn run(self) {
        let mut control = self.creation;
        // assert we never misinterpret a valid Variant as None when wrapped in an Option
        let mut subject = assert_not_option(control.to_variant());
        control.assert_matches(&subject);

        // run some actions, asserting properties along the way
        self.actions
            .into_iter()
            .for_each(|a| a.perform(&mut control, &mut subject));

        // make sure we still agree
        control.assert_matches(&subject);
        assert_not_option(subject);
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Empty => Kind::Empty,
            Value::U32(_) => Kind::U32,
            Value::I64(_) => Kind::I64,
            Value::Text(_) => Kind::Text,
            Value::Bytes(_) => Kind::Bytes,
            Value::Boxed(_) => Kind::Boxed,
            Value::Char(_) => Kind::Char,
        }
    }

    pub fn to_variant(&self) -> Subject {
        match self.clone() {
            Value::Empty => Subject::new(),
            Value::U32(v) => Subject::from_value(v),
            Value::I64(v) => Subject::from_value(v),
            Value::Text(v) => Subject::from_value(v),
            Value::Bytes(v) => Subject::from_value(v),
            Value::Boxed(v) => Subject::from_value(v),
            Value::Char(v) => Subject::from_value(v),
        }
    }

    /// Reads the live alternative of `subject` back out, by visiting it
    pub fn from_variant(subject: &Subject) -> Value {
        subject.visit(ToValue)
    }

    pub fn emplace_into(self, subject: &mut Subject) {
        match self {
            Value::Empty => subject.reset(),
            Value::U32(v) => {
                subject.emplace(v);
            }
            Value::I64(v) => {
                subject.emplace(v);
            }
            Value::Text(v) => {
                subject.emplace(v);
            }
            Value::Bytes(v) => {
                subject.emplace(v);
            }
            Value::Boxed(v) => {
                subject.emplace(v);
            }
            Value::Char(v) => {
                subject.emplace(v);
            }
        }
    }

    /// Replaces all of `subject`, returning what it held before
    pub fn replace_into(self, subject: &mut Subject) -> Subject {
        match self {
            Value::Empty => subject.take(),
            Value::U32(v) => subject.replace(v),
            Value::I64(v) => subject.replace(v),
            Value::Text(v) => subject.replace(v),
            Value::Bytes(v) => subject.replace(v),
            Value::Boxed(v) => subject.replace(v),
            Value::Char(v) => subject.replace(v),
        }
    }

    /// Same as [`Value::emplace_into`], but through the fallible constructor
    pub fn try_emplace_into(self, subject: &mut Subject) {
        fn ok<T>(value: T) -> impl FnOnce() -> Result<T, u8> {
            move || Ok(value)
        }

        let result = match self {
            Value::Empty => subject.try_emplace_with(ok(Empty)).map(|_| ()),
            Value::U32(v) => subject.try_emplace_with(ok(v)).map(|_| ()),
            Value::I64(v) => subject.try_emplace_with(ok(v)).map(|_| ()),
            Value::Text(v) => subject.try_emplace_with(ok(v)).map(|_| ()),
            Value::Bytes(v) => subject.try_emplace_with(ok(v)).map(|_| ()),
            Value::Boxed(v) => subject.try_emplace_with(ok(v)).map(|_| ()),
            Value::Char(v) => subject.try_emplace_with(ok(v)).map(|_| ()),
        };
        assert_eq!(result, Ok(()));
    }

    /// Asserts `subject` holds the same alternative, with the same value, as `self`
    pub fn assert_matches(&self, subject: &Subject) {
        assert_eq!(subject.which().position(), self.kind().position());
        assert_eq!(subject.is_empty(), self.kind() == Kind::Empty);
        assert_eq!(&Value::from_variant(subject), self);

        for kind in Kind::ALL {
            assert_eq!(kind.holds(subject), kind == self.kind());
        }

        match self {
            Value::Empty => assert_eq!(subject.try_get::<Empty, _>(), Some(&Empty)),
            Value::U32(v) => assert_eq!(subject.try_get::<u32, _>(), Some(v)),
            Value::I64(v) => assert_eq!(subject.try_get::<i64, _>(), Some(v)),
            Value::Text(v) => assert_eq!(subject.try_get::<String, _>(), Some(v)),
            Value::Bytes(v) => assert_eq!(subject.try_get::<Vec<u8>, _>(), Some(v)),
            Value::Boxed(v) => assert_eq!(subject.try_get::<Box<str>, _>(), Some(v)),
            Value::Char(v) => assert_eq!(subject.try_get::<char, _>(), Some(v)),
        }
    }
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::Empty,
        Kind::U32,
        Kind::I64,
        Kind::Text,
        Kind::Bytes,
        Kind::Boxed,
        Kind::Char,
    ];

    pub fn position(self) -> usize {
        self as usize
    }

    pub fn holds(self, subject: &Subject) -> bool {
        match self {
            Kind::Empty => subject.holds::<Empty, _>(),
            Kind::U32 => subject.holds::<u32, _>(),
            Kind::I64 => subject.holds::<i64, _>(),
            Kind::Text => subject.holds::<String, _>(),
            Kind::Bytes => subject.holds::<Vec<u8>, _>(),
            Kind::Boxed => subject.holds::<Box<str>, _>(),
            Kind::Char => subject.holds::<char, _>(),
        }
    }

    /// Moves the alternative out of `subject` if it's of this kind
    pub fn take_value(self, subject: &mut Subject) -> Option<Value> {
        match self {
            Kind::Empty => subject.take_value::<Empty, _>().map(|_| Value::Empty),
            Kind::U32 => subject.take_value().map(Value::U32),
            Kind::I64 => subject.take_value().map(Value::I64),
            Kind::Text => subject.take_value().map(Value::Text),
            Kind::Bytes => subject.take_value().map(Value::Bytes),
            Kind::Boxed => subject.take_value().map(Value::Boxed),
            Kind::Char => subject.take_value().map(Value::Char),
        }
    }
}

/// Rebuilds a [`Value`] from whichever alternative is live
struct ToValue;

impl Visitor for ToValue {
    type Output = Value;
}

macro_rules! impl_to_value {
    ($($ty:ty => |$value:ident| $make:expr),* $(,)?) => {
        $(
            impl Visit<$ty> for ToValue {
                fn visit(&mut self, $value: &$ty) -> Value {
                    $make
                }
            }
        )*
    };
}

impl_to_value! {
    Empty => |_empty| Value::Empty,
    u32 => |v| Value::U32(*v),
    i64 => |v| Value::I64(*v),
    String => |v| Value::Text(v.clone()),
    Vec<u8> => |v| Value::Bytes(v.clone()),
    Box<str> => |v| Value::Boxed(v.clone()),
    char => |v| Value::Char(*v),
}

pub fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Asserts that wrapping a [`Subject`] in an `Option` never makes it look like `None`, the
/// discriminant's niche must only ever be used by `None`
fn assert_not_option(subject: Subject) -> Subject {
    let maybe = Some(subject);
    assert!(maybe.is_some());
    match maybe {
        Some(subject) => subject,
        None => unreachable!("a Variant was interpreted as None"),
    }
}
