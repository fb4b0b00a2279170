use core::fmt;

/// The largest number of positions a chain can have, the implicit [`Empty`] marker included.
///
/// [`Empty`]: super::Empty
pub const MAX_POSITIONS: usize = 13;

/// Every value a [`Discriminant`] can take. Having an enum here, instead of a bare `u8`, leaves
/// the remaining 243 bit patterns free as a niche, so `Option<Variant<_>>` costs nothing extra.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Tag {
    P0 = 0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
    P10,
    P11,
    P12,
}

const TAGS: [Tag; MAX_POSITIONS] = [
    Tag::P0,
    Tag::P1,
    Tag::P2,
    Tag::P3,
    Tag::P4,
    Tag::P5,
    Tag::P6,
    Tag::P7,
    Tag::P8,
    Tag::P9,
    Tag::P10,
    Tag::P11,
    Tag::P12,
];

/// Identifies which alternative of a variant is currently live.
///
/// Position `0` is always the [`Empty`](super::Empty) marker, position `i` is the `i`-th type of
/// the alternative tuple, counting from one.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Discriminant(Tag);

impl Discriminant {
    /// The discriminant of a variant holding nothing.
    pub const EMPTY: Discriminant = Discriminant(Tag::P0);

    /// # Panics
    ///
    /// If `position` is not below [`MAX_POSITIONS`]. Positions come from [`Locate::POSITION`]
    /// which the chain bounds, so in a `const` context this is a build failure, never a runtime
    /// one.
    ///
    /// [`Locate::POSITION`]: super::Locate::POSITION
    #[inline(always)]
    pub(crate) const fn new(position: u8) -> Self {
        Discriminant(TAGS[position as usize])
    }

    /// Returns the position of the live alternative, `0` meaning empty.
    #[inline(always)]
    pub const fn position(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if no alternative is live.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        matches!(self.0, Tag::P0)
    }
}

impl Default for Discriminant {
    #[inline]
    fn default() -> Self {
        Discriminant::EMPTY
    }
}

impl fmt::Debug for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Discriminant").field(&self.position()).finish()
    }
}

impl fmt::Display for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("empty")
        } else {
            write!(f, "alternative #{}", self.position())
        }
    }
}

impl From<Discriminant> for usize {
    #[inline]
    fn from(discriminant: Discriminant) -> Self {
        discriminant.position()
    }
}

static_assertions::assert_eq_size!(Discriminant, u8);
static_assertions::assert_eq_size!(Option<Discriminant>, Discriminant);
