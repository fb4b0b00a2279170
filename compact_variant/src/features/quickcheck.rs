//! Implements the [`quickcheck::Arbitrary`] trait for [`Variant`]

use std::iter;

use quickcheck::{
    Arbitrary,
    Gen,
};

use crate::alternatives::{
    for_each_tuple,
    Alternatives,
    CloneAlternatives,
};
use crate::repr::{
    Empty,
    Repr,
};
use crate::Variant;

/// Implemented when every alternative is [`quickcheck::Arbitrary`].
///
/// # Safety
///
/// Entry `i` of each table must only handle the alternative at position `i`.
pub unsafe trait ArbitraryAlternatives: Alternatives + 'static {
    #[doc(hidden)]
    const ARBITRARY: &'static [unsafe fn(&mut Gen, u8) -> Variant<Self>];
    #[doc(hidden)]
    const SHRINK: &'static [unsafe fn(&Variant<Self>) -> Box<dyn Iterator<Item = Variant<Self>>>];
}

/// # Safety
/// * `T` must be the alternative at `position`
unsafe fn arbitrary_slot<L: Alternatives, T: Arbitrary>(g: &mut Gen, position: u8) -> Variant<L> {
    Variant::from_repr(Repr::with_position(position, T::arbitrary(g)))
}

/// # Safety
/// * `T` must be the live alternative of `variant`
unsafe fn shrink_slot<L: Alternatives + 'static, T: Arbitrary>(
    variant: &Variant<L>,
) -> Box<dyn Iterator<Item = Variant<L>>> {
    let position = variant.which().position() as u8;
    let shrunk = variant.repr.live::<T>().shrink().map(move |value| {
        // SAFETY: the shrunk values are `T`s too
        Variant::from_repr(unsafe { Repr::with_position(position, value) })
    });

    Box::new(shrunk)
}

macro_rules! impl_arbitrary_alternatives {
    ($($name:ident),*) => {
        unsafe impl<$($name: Arbitrary),*> ArbitraryAlternatives for ($($name,)*) {
            const ARBITRARY: &'static [unsafe fn(&mut Gen, u8) -> Variant<Self>] = &[
                arbitrary_slot::<Self, Empty>,
                $(arbitrary_slot::<Self, $name>,)*
            ];
            const SHRINK: &'static [
                unsafe fn(&Variant<Self>) -> Box<dyn Iterator<Item = Variant<Self>>>
            ] = &[
                shrink_slot::<Self, Empty>,
                $(shrink_slot::<Self, $name>,)*
            ];
        }
    };
}
for_each_tuple!(impl_arbitrary_alternatives);

impl Arbitrary for Empty {
    fn arbitrary(_: &mut Gen) -> Self {
        Empty
    }
}

impl<L> Arbitrary for Variant<L>
where
    L: ArbitraryAlternatives + CloneAlternatives,
{
    fn arbitrary(g: &mut Gen) -> Self {
        let position = usize::arbitrary(g) % L::LEN;
        // SAFETY: every table has one entry per position, in position order
        unsafe { L::ARBITRARY[position](g, position as u8) }
    }

    /// An empty [`Variant`] is the smallest, after that we shrink the live alternative.
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        if self.is_empty() {
            return quickcheck::empty_shrinker();
        }

        // SAFETY: the live alternative sits at `self.which()`
        let shrunk = unsafe { L::SHRINK[self.which().position()](self) };
        Box::new(iter::once(Variant::new()).chain(shrunk))
    }
}
