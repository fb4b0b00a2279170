//! A module that contains the implementations for optional features. For example `quickcheck`
//! support

#[cfg(feature = "proptest")]
mod proptest;
#[cfg(feature = "proptest")]
pub use self::proptest::StrategyAlternatives;

#[cfg(feature = "quickcheck")]
mod quickcheck;
#[cfg(feature = "quickcheck")]
pub use self::quickcheck::ArbitraryAlternatives;
