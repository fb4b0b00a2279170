#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use core::cmp::Ordering;
use core::fmt;
use core::hash::{
    Hash,
    Hasher,
};
use core::mem;

mod alternatives;
pub use alternatives::{
    Alternatives,
    CloneAlternatives,
    CopyAlternatives,
    DebugAlternatives,
    EqAlternatives,
    HashAlternatives,
    OrdAlternatives,
    PartialEqAlternatives,
    PartialOrdAlternatives,
    VisitAlternatives,
    VisitMutAlternatives,
};

mod copy;
pub use copy::CopyVariant;

mod features;
#[cfg(feature = "proptest")]
#[cfg_attr(docsrs, doc(cfg(feature = "proptest")))]
pub use features::StrategyAlternatives;
#[cfg(feature = "quickcheck")]
#[cfg_attr(docsrs, doc(cfg(feature = "quickcheck")))]
pub use features::ArbitraryAlternatives;

mod repr;
use repr::Repr;
pub use repr::{
    Cons,
    Discriminant,
    Empty,
    Here,
    Locate,
    Nil,
    There,
    MAX_POSITIONS,
    P0,
    P1,
    P10,
    P11,
    P12,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
};

pub mod visit;
pub use visit::{
    Visit,
    VisitMut,
    Visitor,
};


/// A [`Variant`] holds at most one value out of a fixed list of alternative types `L`, inline,
/// and knows which one.
///
/// `L` is a tuple, e.g. `Variant<(u32, String)>`. Position zero is reserved for [`Empty`], so a
/// variant always has a valid state to fall back to: it starts out empty, and it's left empty
/// when constructing an alternative fails.
///
/// ## Using `Variant`
/// ```
/// use compact_variant::{Empty, Variant};
///
/// let mut variant: Variant<(u32, String)> = Variant::new();
/// assert!(variant.is_empty());
/// assert_eq!(variant.try_get::<Empty, _>(), Some(&Empty));
///
/// // emplace destroys whatever was live, and constructs the new alternative in place
/// variant.emplace(42_u32);
/// assert_eq!(variant.which().position(), 1);
/// assert_eq!(variant.try_get::<u32, _>(), Some(&42));
/// assert_eq!(variant.try_get::<String, _>(), None);
///
/// variant.emplace(String::from("hi"));
/// assert_eq!(variant.which().position(), 2);
/// assert_eq!(variant.try_get::<String, _>().map(String::as_str), Some("hi"));
///
/// // comparisons look at the discriminant first, then the live alternatives
/// assert!(Variant::<(u32, String)>::from_value(7_u32) < variant);
/// ```
///
/// ## Size
/// The storage is as large as the largest alternative, plus one byte for the [`Discriminant`],
/// rounded up to the alignment of the most aligned alternative.
/// ```
/// use compact_variant::Variant;
///
/// assert_eq!(std::mem::size_of::<Variant<(u8, u16)>>(), 4);
/// assert_eq!(std::mem::size_of::<Variant<(u8, [u8; 7])>>(), 8);
///
/// // the discriminant leaves a niche, so `Option` is free
/// assert_eq!(
///     std::mem::size_of::<Option<Variant<(u8, String)>>>(),
///     std::mem::size_of::<Variant<(u8, String)>>(),
/// );
/// ```
pub struct Variant<L: Alternatives> {
    repr: Repr<L>,
}

impl<L: Alternatives> Variant<L> {
    /// Creates a new, empty [`Variant`].
    ///
    /// # Examples
    /// ```
    /// # use compact_variant::{Discriminant, Variant};
    /// const NOTHING: Variant<(u32, String)> = Variant::new();
    /// assert_eq!(NOTHING.which(), Discriminant::EMPTY);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Variant {
            repr: Repr::empty(),
        }
    }

    /// Creates a new [`Variant`] holding `value`.
    ///
    /// The position of `T` is found at compile time, `I` is left for the compiler to infer unless
    /// `T` is listed more than once.
    ///
    /// # Examples
    /// ```
    /// # use compact_variant::{P1, P3, Variant};
    /// let name = Variant::<(u32, String)>::from_value(String::from("ferris"));
    /// assert_eq!(name.which().position(), 2);
    ///
    /// // `u8` is listed twice, so we need to say which one we mean
    /// let second = Variant::<(u8, char, u8)>::from_value::<u8, P3>(1);
    /// assert_eq!(second.which().position(), 3);
    /// assert!(second.try_get::<u8, P1>().is_none());
    /// ```
    #[rustversion::attr(since(1.83), const)]
    #[inline]
    pub fn from_value<T, I>(value: T) -> Self
    where
        L::Storage: Locate<T, I>,
    {
        Variant {
            repr: Repr::with_value(value),
        }
    }

    #[inline]
    pub(crate) const fn from_repr(repr: Repr<L>) -> Self {
        Variant { repr }
    }

    /// Returns the [`Discriminant`] of the live alternative.
    #[inline]
    pub const fn which(&self) -> Discriminant {
        self.repr.discriminant()
    }

    /// Returns `true` if the [`Variant`] holds [`Empty`].
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.which().is_empty()
    }

    /// Returns `true` if `T` is the live alternative.
    #[inline]
    pub const fn holds<T, I>(&self) -> bool
    where
        L::Storage: Locate<T, I>,
    {
        self.repr.holds::<T, I>()
    }

    /// Returns a reference to the live alternative if it's a `T`, `None` otherwise.
    ///
    /// Only the discriminant is compared at runtime, the position of `T` is a constant.
    #[inline]
    pub fn try_get<T, I>(&self) -> Option<&T>
    where
        L::Storage: Locate<T, I>,
    {
        self.repr.get()
    }

    /// Returns a mutable reference to the live alternative if it's a `T`, `None` otherwise.
    ///
    /// # Examples
    /// ```
    /// # use compact_variant::Variant;
    /// let mut variant = Variant::<(u32, String)>::from_value(String::from("hello"));
    ///
    /// if let Some(s) = variant.try_get_mut::<String, _>() {
    ///     s.push_str(" world");
    /// }
    /// assert!(variant.try_get_mut::<u32, _>().is_none());
    /// assert_eq!(variant.try_get::<String, _>().unwrap(), "hello world");
    /// ```
    #[inline]
    pub fn try_get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L::Storage: Locate<T, I>,
    {
        self.repr.get_mut()
    }

    /// Destroys the live alternative and constructs `value` in its place, returning a reference
    /// to it.
    #[inline]
    pub fn emplace<T, I>(&mut self, value: T) -> &mut T
    where
        L::Storage: Locate<T, I>,
    {
        self.reset();
        // SAFETY: `reset` left us empty
        unsafe { self.repr.write(value) }
    }

    /// Destroys the live alternative, then constructs a `T` with `f`.
    ///
    /// If `f` panics the [`Variant`] is left empty.
    #[inline]
    pub fn emplace_with<T, I>(&mut self, f: impl FnOnce() -> T) -> &mut T
    where
        L::Storage: Locate<T, I>,
    {
        self.reset();
        let value = f();
        // SAFETY: `reset` left us empty, and `f` has no access to `self`
        unsafe { self.repr.write(value) }
    }

    /// Destroys the live alternative, then tries to construct a `T` with `f`.
    ///
    /// If `f` fails the error is returned and the [`Variant`] is left empty.
    ///
    /// # Examples
    /// ```
    /// # use compact_variant::Variant;
    /// use std::num::ParseIntError;
    ///
    /// let mut variant = Variant::<(u32, String)>::from_value(String::from("previous"));
    ///
    /// let parsed: Result<_, ParseIntError> = variant.try_emplace_with(|| "12".parse::<u32>());
    /// assert_eq!(parsed, Ok(&mut 12));
    ///
    /// assert!(variant.try_emplace_with(|| "twelve".parse::<u32>()).is_err());
    /// assert!(variant.is_empty());
    /// ```
    #[inline]
    pub fn try_emplace_with<T, I, E>(
        &mut self,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, E>
    where
        L::Storage: Locate<T, I>,
    {
        self.reset();
        let value = f()?;
        // SAFETY: `reset` left us empty, and `f` has no access to `self`
        Ok(unsafe { self.repr.write(value) })
    }

    /// Replaces the whole [`Variant`] with one holding `value`, returning the previous one.
    #[inline]
    pub fn replace<T, I>(&mut self, value: T) -> Self
    where
        L::Storage: Locate<T, I>,
    {
        mem::replace(self, Variant::from_value(value))
    }

    /// Destroys the live alternative, leaving the [`Variant`] empty.
    #[inline]
    pub fn reset(&mut self) {
        self.repr.reset()
    }

    /// Moves the whole [`Variant`] out, leaving an empty one in its place.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Moves the live alternative out if it's a `T`, leaving the [`Variant`] empty.
    ///
    /// Returns `None`, and leaves the [`Variant`] untouched, otherwise.
    #[inline]
    pub fn take_value<T, I>(&mut self) -> Option<T>
    where
        L::Storage: Locate<T, I>,
    {
        if self.holds::<T, I>() {
            // SAFETY: We checked the discriminant to make sure `T` is live
            Some(unsafe { self.repr.take() })
        } else {
            None
        }
    }

    /// Converts the [`Variant`] into its live alternative if it's a `T`, otherwise gives the
    /// [`Variant`] back.
    ///
    /// # Examples
    /// ```
    /// # use compact_variant::Variant;
    /// let variant = Variant::<(u32, String)>::from_value(8_u32);
    ///
    /// let variant = variant.into_value::<String, _>().unwrap_err();
    /// assert_eq!(variant.into_value::<u32, _>(), Ok(8));
    /// ```
    #[inline]
    pub fn into_value<T, I>(mut self) -> Result<T, Self>
    where
        L::Storage: Locate<T, I>,
    {
        match self.take_value() {
            Some(value) => Ok(value),
            None => Err(self),
        }
    }

    /// Passes the live alternative to `visitor`, see [`visit`](crate::visit).
    #[inline]
    pub fn visit<V: Visitor>(&self, mut visitor: V) -> V::Output
    where
        L: VisitAlternatives<V>,
    {
        self.repr.visit(&mut visitor)
    }

    /// Passes the live alternative to `visitor` by mutable reference.
    #[inline]
    pub fn visit_mut<V: Visitor>(&mut self, mut visitor: V) -> V::Output
    where
        L: VisitMutAlternatives<V>,
    {
        self.repr.visit_mut(&mut visitor)
    }
}

impl<L: Alternatives> Drop for Variant<L> {
    #[inline]
    fn drop(&mut self) {
        self.repr.reset()
    }
}

impl<L: Alternatives> Default for Variant<L> {
    #[inline]
    fn default() -> Self {
        Variant::new()
    }
}

impl<L: CloneAlternatives> Clone for Variant<L> {
    #[inline]
    fn clone(&self) -> Self {
        Variant {
            repr: self.repr.clone_repr(),
        }
    }
}

impl<L: PartialEqAlternatives> PartialEq for Variant<L> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.repr.eq_repr(&other.repr)
    }
}

impl<L: EqAlternatives> Eq for Variant<L> {}

impl<L: PartialOrdAlternatives> PartialOrd for Variant<L> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.repr.partial_cmp_repr(&other.repr)
    }
}

impl<L: OrdAlternatives> Ord for Variant<L> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.repr.cmp_repr(&other.repr)
    }
}

impl<L: HashAlternatives> Hash for Variant<L> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash_repr(state)
    }
}

impl<L: DebugAlternatives> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr.fmt_repr("Variant", f)
    }
}

impl<L: CopyAlternatives> From<CopyVariant<L>> for Variant<L>
where
    L::Storage: Copy,
{
    #[inline]
    fn from(variant: CopyVariant<L>) -> Self {
        variant.into_variant()
    }
}
