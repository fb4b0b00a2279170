//! A variant over alternatives that are all [`Copy`]

use core::cmp::Ordering;
use core::fmt;
use core::hash::{
    Hash,
    Hasher,
};

use crate::alternatives::{
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
use crate::repr::{
    Discriminant,
    Locate,
    Repr,
};
use crate::visit::Visitor;
use crate::Variant;

/// A [`Variant`] whose alternatives are all [`Copy`].
///
/// Nothing needs to run when a `CopyVariant` is duplicated or destroyed, so it's [`Copy`] itself,
/// has no destructor, and every operation that builds or overwrites one can run at compile time.
///
/// # Examples
/// ```
/// use compact_variant::CopyVariant;
///
/// type Number = CopyVariant<(i64, f64)>;
///
/// const ZERO: Number = Number::from_value(0_i64);
/// const HALF: Number = Number::from_value(0.5_f64);
///
/// let mut n = ZERO;
/// assert_eq!(n.get_copied::<i64, _>(), Some(0));
///
/// n = HALF;
/// assert_eq!(n.get_copied::<f64, _>(), Some(0.5));
/// assert_eq!(ZERO.which().position(), 1);
/// assert!(!std::mem::needs_drop::<Number>());
/// ```
pub struct CopyVariant<L: CopyAlternatives> {
    repr: Repr<L>,
}

impl<L: CopyAlternatives> CopyVariant<L> {
    /// Creates a new, empty [`CopyVariant`].
    #[inline]
    pub const fn new() -> Self {
        CopyVariant {
            repr: Repr::empty(),
        }
    }

    /// Creates a new [`CopyVariant`] holding `value`.
    #[rustversion::attr(since(1.83), const)]
    #[inline]
    pub fn from_value<T, I>(value: T) -> Self
    where
        L::Storage: Locate<T, I>,
    {
        CopyVariant {
            repr: Repr::with_value(value),
        }
    }

    /// Returns the [`Discriminant`] of the live alternative.
    #[inline]
    pub const fn which(&self) -> Discriminant {
        self.repr.discriminant()
    }

    /// Returns `true` if the [`CopyVariant`] holds [`Empty`](crate::Empty).
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
    #[inline]
    pub const fn try_get<T, I>(&self) -> Option<&T>
    where
        L::Storage: Locate<T, I>,
    {
        self.repr.peek()
    }

    /// Returns a copy of the live alternative if it's a `T`, `None` otherwise.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::CopyVariant;
    ///
    /// const CODE: CopyVariant<(u16, char)> = CopyVariant::from_value('x');
    /// const LETTER: Option<char> = CODE.get_copied();
    ///
    /// assert_eq!(LETTER, Some('x'));
    /// assert_eq!(CODE.get_copied::<u16, _>(), None);
    /// ```
    #[inline]
    pub const fn get_copied<T: Copy, I>(&self) -> Option<T>
    where
        L::Storage: Locate<T, I>,
    {
        match self.repr.peek::<T, I>() {
            Some(value) => Some(*value),
            None => None,
        }
    }

    /// Returns a mutable reference to the live alternative if it's a `T`, `None` otherwise.
    #[rustversion::attr(since(1.83), const)]
    #[inline]
    pub fn try_get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L::Storage: Locate<T, I>,
    {
        self.repr.peek_mut()
    }

    /// Overwrites the [`CopyVariant`] with one holding `value`.
    ///
    /// The previous alternative has nothing to destroy, so this is a single store.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::CopyVariant;
    ///
    /// const LAST: CopyVariant<(u8, bool)> = {
    ///     let mut v = CopyVariant::new();
    ///     v.set(1_u8);
    ///     v.set(true);
    ///     v
    /// };
    /// assert_eq!(LAST.get_copied::<bool, _>(), Some(true));
    /// ```
    #[rustversion::attr(since(1.83), const)]
    #[inline]
    pub fn set<T, I>(&mut self, value: T)
    where
        L::Storage: Locate<T, I>,
    {
        *self = CopyVariant::from_value(value);
    }

    /// Returns to [`Empty`](crate::Empty).
    #[rustversion::attr(since(1.83), const)]
    #[inline]
    pub fn reset(&mut self) {
        *self = CopyVariant::new();
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

    /// Converts into a general [`Variant`] holding the same alternative.
    #[inline]
    pub const fn into_variant(self) -> Variant<L> {
        Variant::from_repr(self.repr)
    }
}

impl<L: CopyAlternatives> Clone for CopyVariant<L>
where
    L::Storage: Copy,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: CopyAlternatives> Copy for CopyVariant<L> where L::Storage: Copy {}

impl<L: CopyAlternatives> Default for CopyVariant<L> {
    #[inline]
    fn default() -> Self {
        CopyVariant::new()
    }
}

impl<L: CopyAlternatives + PartialEqAlternatives> PartialEq for CopyVariant<L> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.repr.eq_repr(&other.repr)
    }
}

impl<L: CopyAlternatives + EqAlternatives> Eq for CopyVariant<L> {}

impl<L: CopyAlternatives + PartialOrdAlternatives> PartialOrd for CopyVariant<L> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.repr.partial_cmp_repr(&other.repr)
    }
}

impl<L: CopyAlternatives + OrdAlternatives> Ord for CopyVariant<L> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.repr.cmp_repr(&other.repr)
    }
}

impl<L: CopyAlternatives + HashAlternatives> Hash for CopyVariant<L> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash_repr(state)
    }
}

impl<L: CopyAlternatives + DebugAlternatives> fmt::Debug for CopyVariant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr.fmt_repr("CopyVariant", f)
    }
}
