use core::cmp::Ordering;
use core::fmt;
use core::hash::{
    Hash,
    Hasher,
};
use core::mem::{
    self,
    MaybeUninit,
};
use core::ptr;

mod chain;
mod discriminant;
pub(crate) mod dispatch;
mod locate;

pub use chain::{
    Cons,
    Empty,
    Nil,
};
pub use discriminant::{
    Discriminant,
    MAX_POSITIONS,
};
pub use locate::{
    Here,
    Locate,
    There,
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

use crate::alternatives::{
    Alternatives,
    CloneAlternatives,
    DebugAlternatives,
    HashAlternatives,
    OrdAlternatives,
    PartialEqAlternatives,
    PartialOrdAlternatives,
    VisitAlternatives,
    VisitMutAlternatives,
};
use crate::visit::Visitor;

/// Overlapping storage plus the discriminant naming what's live in it.
///
/// # Invariants
/// * the alternative at position `tag` is live, and nothing else is
/// * `Empty` is a ZST, so an empty `Repr` needs no initialized bytes at all
///
/// `Repr` has no drop glue of its own, destroying the live alternative is left to the façade
/// that owns it.
pub(crate) struct Repr<L: Alternatives> {
    storage: MaybeUninit<L::Storage>,
    tag: Discriminant,
}

impl<L: Alternatives> Repr<L> {
    #[inline]
    pub const fn empty() -> Self {
        Repr {
            storage: MaybeUninit::uninit(),
            tag: Discriminant::EMPTY,
        }
    }

    /// Creates a [`Repr`] with `value` live.
    #[rustversion::attr(since(1.83), const)]
    #[inline]
    pub fn with_value<T, I>(value: T) -> Self
    where
        L::Storage: Locate<T, I>,
    {
        let mut storage = MaybeUninit::<L::Storage>::uninit();
        // SAFETY: every link of the chain is `repr(C)`, so `T` lives at offset zero, and the
        // chain is sized and aligned for it
        unsafe { storage.as_mut_ptr().cast::<T>().write(value) };

        Repr {
            storage,
            tag: Discriminant::new(<L::Storage as Locate<T, I>>::POSITION),
        }
    }

    /// Creates a [`Repr`] from an alternative whose position was only known at runtime.
    ///
    /// # Safety
    /// * `T` must be the alternative at `position`
    #[cfg(any(feature = "proptest", feature = "quickcheck"))]
    #[inline]
    pub unsafe fn with_position<T>(position: u8, value: T) -> Self {
        debug_assert!((position as usize) < L::LEN);

        let mut storage = MaybeUninit::<L::Storage>::uninit();
        storage.as_mut_ptr().cast::<T>().write(value);

        Repr {
            storage,
            tag: Discriminant::new(position),
        }
    }

    /// Returns the live alternative as a `T`, whatever its position.
    ///
    /// # Safety
    /// * `T` must be the live alternative
    #[cfg(feature = "quickcheck")]
    #[inline]
    pub unsafe fn live<T>(&self) -> &T {
        &*self.slot().cast::<T>()
    }

    #[inline(always)]
    pub const fn discriminant(&self) -> Discriminant {
        self.tag
    }

    #[inline(always)]
    pub const fn holds<T, I>(&self) -> bool
    where
        L::Storage: Locate<T, I>,
    {
        self.tag.position() == <L::Storage as Locate<T, I>>::POSITION as usize
    }

    /// Walks the chain to `T`, if `T` is live.
    #[inline]
    pub fn get<T, I>(&self) -> Option<&T>
    where
        L::Storage: Locate<T, I>,
    {
        if self.holds::<T, I>() {
            // SAFETY: We checked the discriminant to make sure `T` is live
            Some(unsafe { <L::Storage as Locate<T, I>>::get(self.chain()) })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L::Storage: Locate<T, I>,
    {
        if self.holds::<T, I>() {
            // SAFETY: We checked the discriminant to make sure `T` is live
            Some(unsafe { <L::Storage as Locate<T, I>>::get_mut(self.chain_mut()) })
        } else {
            None
        }
    }

    /// Same as [`Repr::get`], but usable in a `const` context.
    #[inline]
    pub const fn peek<T, I>(&self) -> Option<&T>
    where
        L::Storage: Locate<T, I>,
    {
        if self.holds::<T, I>() {
            // SAFETY: We checked the discriminant to make sure `T` is live, and it lives at
            // offset zero of the chain
            Some(unsafe { &*self.storage.as_ptr().cast::<T>() })
        } else {
            None
        }
    }

    /// Same as [`Repr::get_mut`], but usable in a `const` context.
    #[rustversion::attr(since(1.83), const)]
    #[inline]
    pub fn peek_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L::Storage: Locate<T, I>,
    {
        if self.holds::<T, I>() {
            // SAFETY: We checked the discriminant to make sure `T` is live, and it lives at
            // offset zero of the chain
            Some(unsafe { &mut *self.storage.as_mut_ptr().cast::<T>() })
        } else {
            None
        }
    }

    /// Constructs `value` in place and makes it the live alternative.
    ///
    /// # Safety
    /// * the [`Repr`] must be empty, anything live would be leaked
    #[inline]
    pub unsafe fn write<T, I>(&mut self, value: T) -> &mut T
    where
        L::Storage: Locate<T, I>,
    {
        debug_assert!(self.tag.is_empty());

        <L::Storage as Locate<T, I>>::write(self.storage.as_mut_ptr(), value);
        self.tag = Discriminant::new(<L::Storage as Locate<T, I>>::POSITION);

        <L::Storage as Locate<T, I>>::get_mut(self.chain_mut())
    }

    /// Moves the live `T` out, leaving the [`Repr`] empty.
    ///
    /// # Safety
    /// * `T` must be live
    #[inline]
    pub unsafe fn take<T, I>(&mut self) -> T
    where
        L::Storage: Locate<T, I>,
    {
        debug_assert!(self.holds::<T, I>());

        self.tag = Discriminant::EMPTY;
        ptr::read(<L::Storage as Locate<T, I>>::get(self.chain()))
    }

    /// Destroys the live alternative, leaving the [`Repr`] empty.
    ///
    /// When no alternative has drop glue this compiles to nothing but clearing the discriminant.
    #[inline]
    pub fn reset(&mut self) {
        // clearing the discriminant first means a panicking destructor can't run twice
        let position = mem::replace(&mut self.tag, Discriminant::EMPTY).position();

        if L::NEEDS_DROP {
            // SAFETY: The discriminant we just cleared named the live alternative
            unsafe { L::DROP[position](self.slot_mut()) }
        }
    }

    #[inline]
    pub fn clone_repr(&self) -> Self
    where
        L: CloneAlternatives,
    {
        let mut repr = Repr::empty();
        // SAFETY: `self.tag` names the live alternative, and `repr` is empty. If the clone panics
        // `repr` is still empty, and has nothing to leak
        unsafe { L::CLONE[self.tag.position()](self.slot(), repr.slot_mut()) };
        repr.tag = self.tag;

        repr
    }

    #[inline]
    pub fn eq_repr(&self, other: &Self) -> bool
    where
        L: PartialEqAlternatives,
    {
        // SAFETY: Both discriminants name the same, live, alternative
        self.tag == other.tag && unsafe { L::EQ[self.tag.position()](self.slot(), other.slot()) }
    }

    #[inline]
    pub fn partial_cmp_repr(&self, other: &Self) -> Option<Ordering>
    where
        L: PartialOrdAlternatives,
    {
        match self.tag.cmp(&other.tag) {
            // SAFETY: Both discriminants name the same, live, alternative
            Ordering::Equal => unsafe {
                L::PARTIAL_CMP[self.tag.position()](self.slot(), other.slot())
            },
            ordering => Some(ordering),
        }
    }

    #[inline]
    pub fn cmp_repr(&self, other: &Self) -> Ordering
    where
        L: OrdAlternatives,
    {
        match self.tag.cmp(&other.tag) {
            // SAFETY: Both discriminants name the same, live, alternative
            Ordering::Equal => unsafe { L::CMP[self.tag.position()](self.slot(), other.slot()) },
            ordering => ordering,
        }
    }

    #[inline]
    pub fn hash_repr<H: Hasher>(&self, state: &mut H)
    where
        L: HashAlternatives,
    {
        self.tag.hash(state);
        // SAFETY: `self.tag` names the live alternative
        unsafe { L::hash_at(self.tag.position(), self.slot(), state) }
    }

    #[inline]
    /// Formats as `name(position, value)`, so repeated types can be told apart.
    pub fn fmt_repr(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        L: DebugAlternatives,
    {
        f.debug_tuple(name)
            .field(&self.tag.position())
            .field(&Live(self))
            .finish()
    }

    #[inline]
    pub fn visit<V: Visitor>(&self, visitor: &mut V) -> V::Output
    where
        L: VisitAlternatives<V>,
    {
        // SAFETY: `self.tag` names the live alternative
        unsafe { L::visit_at(self.tag.position(), self.slot(), visitor) }
    }

    #[inline]
    pub fn visit_mut<V: Visitor>(&mut self, visitor: &mut V) -> V::Output
    where
        L: VisitMutAlternatives<V>,
    {
        // SAFETY: `self.tag` names the live alternative
        unsafe { L::visit_mut_at(self.tag.position(), self.slot_mut(), visitor) }
    }

    /// A pointer to the start of the storage, where every alternative lives.
    #[inline(always)]
    fn slot(&self) -> *const u8 {
        self.storage.as_ptr().cast()
    }

    #[inline(always)]
    fn slot_mut(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr().cast()
    }

    // note: a union may hold uninitialized bytes, so a reference to the chain is always valid,
    // only reading one of its fields needs the discriminant to agree
    #[inline(always)]
    fn chain(&self) -> &L::Storage {
        unsafe { &*self.storage.as_ptr() }
    }

    #[inline(always)]
    fn chain_mut(&mut self) -> &mut L::Storage {
        unsafe { &mut *self.storage.as_mut_ptr() }
    }
}

impl<L: Alternatives> Clone for Repr<L>
where
    L::Storage: Copy,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: Alternatives> Copy for Repr<L> where L::Storage: Copy {}

static_assertions::assert_eq_size!(Repr<()>, u8);
static_assertions::assert_eq_size!(Repr<(u8, u16)>, [u16; 2]);
static_assertions::assert_eq_size!(Repr<(u8, [u8; 7])>, u64);
static_assertions::assert_eq_size!(Option<Repr<(u32, f32)>>, Repr<(u32, f32)>);
static_assertions::assert_eq_align!(Repr<(u8, u32)>, u32);

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        // a pointer sized alternative costs one extra word for the discriminant
        static_assertions::assert_eq_size!(Repr<(u8, usize)>, [u64; 2]);
    } else if #[cfg(target_pointer_width = "32")] {
        static_assertions::assert_eq_size!(Repr<(u8, usize)>, [u32; 2]);
    }
}

/// Debug formats the live alternative of a [`Repr`] on its own.
struct Live<'a, L: Alternatives>(&'a Repr<L>);

impl<L: DebugAlternatives> fmt::Debug for Live<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: `tag` names the live alternative
        unsafe { L::DEBUG[self.0.tag.position()](self.0.slot(), f) }
    }
}
