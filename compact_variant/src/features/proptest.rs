//! Implements the [`proptest::arbitrary::Arbitrary`] trait for [`Variant`]

use proptest::arbitrary::{
    any,
    Arbitrary,
};
use proptest::strategy::{
    BoxedStrategy,
    Strategy,
    Union,
};

use crate::alternatives::{
    for_each_tuple,
    Alternatives,
    DebugAlternatives,
};
use crate::repr::{
    Empty,
    Repr,
};
use crate::Variant;

/// Implemented when every alternative is [`proptest::arbitrary::Arbitrary`].
///
/// # Safety
///
/// Entry `i` of the table must only produce the alternative at position `i`.
pub unsafe trait StrategyAlternatives: Alternatives + DebugAlternatives + 'static {
    #[doc(hidden)]
    const STRATEGY: &'static [unsafe fn(u8) -> BoxedStrategy<Variant<Self>>];
}

/// # Safety
/// * `T` must be the alternative at `position`
unsafe fn strategy_slot<L, T>(position: u8) -> BoxedStrategy<Variant<L>>
where
    L: DebugAlternatives + 'static,
    T: Arbitrary + 'static,
{
    any::<T>()
        .prop_map(move |value| {
            // SAFETY: the caller guarantees `T` lives at `position`
            Variant::from_repr(unsafe { Repr::with_position(position, value) })
        })
        .boxed()
}

macro_rules! impl_strategy_alternatives {
    ($($name:ident),*) => {
        unsafe impl<$($name: Arbitrary + 'static),*> StrategyAlternatives for ($($name,)*) {
            const STRATEGY: &'static [unsafe fn(u8) -> BoxedStrategy<Variant<Self>>] = &[
                strategy_slot::<Self, Empty>,
                $(strategy_slot::<Self, $name>,)*
            ];
        }
    };
}
for_each_tuple!(impl_strategy_alternatives);

impl Arbitrary for Empty {
    type Parameters = ();
    type Strategy = proptest::strategy::Just<Empty>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::strategy::Just(Empty)
    }
}

impl<L: StrategyAlternatives> Arbitrary for Variant<L> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// Picks a position uniformly, then generates the alternative with its own strategy.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let strategies = L::STRATEGY
            .iter()
            .enumerate()
            // SAFETY: the table has one entry per position, in position order
            .map(|(position, strategy)| unsafe { (*strategy)(position as u8) });

        Union::new(strategies).boxed()
    }
}
