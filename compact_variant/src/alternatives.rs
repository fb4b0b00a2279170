//! The closed list of alternatives a variant can hold.
//!
//! An alternative list is a tuple `(T0, ..., Tn)` of up to 12 types. Each list knows its storage
//! chain and, for every operation its members all support, a jump table with one entry per
//! position. Position zero is always [`Empty`].
//!
//! Whole-list predicates pick the cheapest implementation of each operation at compile time:
//! * [`Alternatives::NEEDS_DROP`] is `false` when no member has drop glue, and destroying the
//!   live alternative becomes a no-op without consulting the discriminant
//! * [`CopyAlternatives`] is implemented when every member is `Copy`, which is what
//!   [`CopyVariant`](crate::CopyVariant) requires
//!
//! All of these traits are implemented for tuples only, and are not meant to be implemented
//! anywhere else.

use core::cmp::Ordering;
use core::fmt;
use core::hash::Hasher;
use core::mem;

use crate::repr::dispatch;
use crate::repr::{
    Cons,
    Empty,
    Nil,
};
use crate::visit::{
    Visit,
    VisitMut,
    Visitor,
};

/// A tuple of alternative types.
///
/// # Safety
///
/// `Storage` must be a chain with [`Empty`] in front, and every table must have exactly one
/// entry per link of that chain, in chain order.
pub unsafe trait Alternatives: Sized {
    /// The overlapping storage for `Empty` and every member of the tuple.
    type Storage;

    /// The number of positions, `Empty` included.
    const LEN: usize;

    /// `true` if at least one alternative has drop glue.
    const NEEDS_DROP: bool;

    #[doc(hidden)]
    const DROP: &'static [unsafe fn(*mut u8)];
}

/// Implemented when every alternative is [`Copy`].
///
/// # Safety
///
/// Only implement this when `Self::Storage` is `Copy`.
pub unsafe trait CopyAlternatives: Alternatives {}

/// Implemented when every alternative is [`Clone`].
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait CloneAlternatives: Alternatives {
    #[doc(hidden)]
    const CLONE: &'static [unsafe fn(*const u8, *mut u8)];
}

/// Implemented when every alternative is [`PartialEq`].
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait PartialEqAlternatives: Alternatives {
    #[doc(hidden)]
    const EQ: &'static [unsafe fn(*const u8, *const u8) -> bool];
}

/// Implemented when every alternative is [`Eq`].
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait EqAlternatives: PartialEqAlternatives {}

/// Implemented when every alternative is [`PartialOrd`].
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait PartialOrdAlternatives: PartialEqAlternatives {
    #[doc(hidden)]
    const PARTIAL_CMP: &'static [unsafe fn(*const u8, *const u8) -> Option<Ordering>];
}

/// Implemented when every alternative is [`Ord`].
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait OrdAlternatives: EqAlternatives + PartialOrdAlternatives {
    #[doc(hidden)]
    const CMP: &'static [unsafe fn(*const u8, *const u8) -> Ordering];
}

/// Implemented when every alternative is [`Hash`](core::hash::Hash).
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait HashAlternatives: Alternatives {
    /// The hasher is chosen by the caller, so this table is built per call rather than stored.
    #[doc(hidden)]
    unsafe fn hash_at<H: Hasher>(position: usize, slot: *const u8, state: &mut H);
}

/// Implemented when every alternative is [`Debug`](fmt::Debug).
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait DebugAlternatives: Alternatives {
    #[doc(hidden)]
    const DEBUG: &'static [unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result];
}

/// Implemented when `V` can [`Visit`] every alternative, `Empty` included.
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait VisitAlternatives<V: Visitor>: Alternatives {
    /// The visitor may borrow, so this table is built per call rather than stored.
    #[doc(hidden)]
    unsafe fn visit_at(position: usize, slot: *const u8, visitor: &mut V) -> V::Output;
}

/// Implemented when `V` can [`VisitMut`] every alternative, `Empty` included.
///
/// # Safety
///
/// See [`Alternatives`].
pub unsafe trait VisitMutAlternatives<V: Visitor>: Alternatives {
    #[doc(hidden)]
    unsafe fn visit_mut_at(position: usize, slot: *mut u8, visitor: &mut V) -> V::Output;
}

/// Expands to the storage chain for a list of types, `Empty` excluded.
macro_rules! chain {
    () => { Nil };
    ($head:ident $(, $tail:ident)*) => { Cons<$head, chain!($($tail),*)> };
}

/// Counts the identifiers it's given, as a constant expression.
macro_rules! count {
    () => { 0 };
    ($head:ident $($tail:ident)*) => { 1 + count!($($tail)*) };
}

/// Calls `$mac` once for every tuple arity from 12 down to 0.
macro_rules! for_each_tuple {
    ($mac:ident) => {
        for_each_tuple!(@ $mac T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
    };
    (@ $mac:ident) => {
        $mac!();
    };
    (@ $mac:ident $head:ident $(, $tail:ident)*) => {
        $mac!($head $(, $tail)*);
        for_each_tuple!(@ $mac $($tail),*);
    };
}
#[allow(unused_imports)]
pub(crate) use for_each_tuple;

macro_rules! impl_alternatives {
    ($($name:ident),*) => {
        unsafe impl<$($name),*> Alternatives for ($($name,)*) {
            type Storage = Cons<Empty, chain!($($name),*)>;

            const LEN: usize = Self::DROP.len();
            const NEEDS_DROP: bool = false $(|| mem::needs_drop::<$name>())*;

            const DROP: &'static [unsafe fn(*mut u8)] = &[
                dispatch::drop_slot::<Empty>,
                $(dispatch::drop_slot::<$name>,)*
            ];
        }

        unsafe impl<$($name: Copy),*> CopyAlternatives for ($($name,)*) {}

        unsafe impl<$($name: Clone),*> CloneAlternatives for ($($name,)*) {
            const CLONE: &'static [unsafe fn(*const u8, *mut u8)] = &[
                dispatch::clone_slot::<Empty>,
                $(dispatch::clone_slot::<$name>,)*
            ];
        }

        unsafe impl<$($name: PartialEq),*> PartialEqAlternatives for ($($name,)*) {
            const EQ: &'static [unsafe fn(*const u8, *const u8) -> bool] = &[
                dispatch::eq_slot::<Empty>,
                $(dispatch::eq_slot::<$name>,)*
            ];
        }

        unsafe impl<$($name: Eq),*> EqAlternatives for ($($name,)*) {}

        unsafe impl<$($name: PartialOrd),*> PartialOrdAlternatives for ($($name,)*) {
            const PARTIAL_CMP: &'static [unsafe fn(*const u8, *const u8) -> Option<Ordering>] = &[
                dispatch::partial_cmp_slot::<Empty>,
                $(dispatch::partial_cmp_slot::<$name>,)*
            ];
        }

        unsafe impl<$($name: Ord),*> OrdAlternatives for ($($name,)*) {
            const CMP: &'static [unsafe fn(*const u8, *const u8) -> Ordering] = &[
                dispatch::cmp_slot::<Empty>,
                $(dispatch::cmp_slot::<$name>,)*
            ];
        }

        unsafe impl<$($name: core::hash::Hash),*> HashAlternatives for ($($name,)*) {
            #[inline]
            unsafe fn hash_at<H: Hasher>(position: usize, slot: *const u8, state: &mut H) {
                let table: [unsafe fn(*const u8, &mut H); count!(Empty $($name)*)] = [
                    dispatch::hash_slot::<Empty, H>,
                    $(dispatch::hash_slot::<$name, H>,)*
                ];
                table[position](slot, state)
            }
        }

        unsafe impl<$($name: fmt::Debug),*> DebugAlternatives for ($($name,)*) {
            const DEBUG: &'static [unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result] = &[
                dispatch::debug_slot::<Empty>,
                $(dispatch::debug_slot::<$name>,)*
            ];
        }

        unsafe impl<V, $($name),*> VisitAlternatives<V> for ($($name,)*)
        where
            V: Visit<Empty> $(+ Visit<$name>)*,
        {
            #[inline]
            unsafe fn visit_at(
                position: usize,
                slot: *const u8,
                visitor: &mut V,
            ) -> <V as Visitor>::Output {
                let table: [
                    unsafe fn(*const u8, &mut V) -> <V as Visitor>::Output;
                    count!(Empty $($name)*)
                ] = [
                    dispatch::visit_slot::<Empty, V>,
                    $(dispatch::visit_slot::<$name, V>,)*
                ];
                table[position](slot, visitor)
            }
        }

        unsafe impl<V, $($name),*> VisitMutAlternatives<V> for ($($name,)*)
        where
            V: VisitMut<Empty> $(+ VisitMut<$name>)*,
        {
            #[inline]
            unsafe fn visit_mut_at(
                position: usize,
                slot: *mut u8,
                visitor: &mut V,
            ) -> <V as Visitor>::Output {
                let table: [
                    unsafe fn(*mut u8, &mut V) -> <V as Visitor>::Output;
                    count!(Empty $($name)*)
                ] = [
                    dispatch::visit_mut_slot::<Empty, V>,
                    $(dispatch::visit_mut_slot::<$name, V>,)*
                ];
                table[position](slot, visitor)
            }
        }
    };
}

for_each_tuple!(impl_alternatives);

#[cfg(test)]
mod tests {
    use core::mem;

    use static_assertions::{
        assert_impl_all,
        assert_not_impl_any,
        const_assert,
        const_assert_eq,
    };

    use super::{
        Alternatives,
        CloneAlternatives,
        CopyAlternatives,
        EqAlternatives,
        OrdAlternatives,
        PartialOrdAlternatives,
    };
    use crate::repr::Empty;

    type Twelve = (u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, char, bool);

    const_assert_eq!(<() as Alternatives>::LEN, 1);
    const_assert_eq!(<(u8,) as Alternatives>::LEN, 2);
    const_assert_eq!(<Twelve as Alternatives>::LEN, 13);

    const_assert!(!<(u8, f32) as Alternatives>::NEEDS_DROP);
    const_assert!(!<Twelve as Alternatives>::NEEDS_DROP);
    const_assert!(<(u8, String) as Alternatives>::NEEDS_DROP);

    assert_impl_all!((u8, f32, char): CopyAlternatives, PartialOrdAlternatives);
    assert_impl_all!((u8, char): CopyAlternatives, OrdAlternatives);
    assert_not_impl_any!((u8, String): CopyAlternatives);
    assert_impl_all!((u8, String): CloneAlternatives, EqAlternatives);
    assert_not_impl_any!((f32, u8): EqAlternatives, OrdAlternatives);

    #[test]
    fn test_storage_sized_for_largest() {
        assert_eq!(mem::size_of::<<() as Alternatives>::Storage>(), 0);
        assert_eq!(mem::size_of::<<(u8, [u8; 5]) as Alternatives>::Storage>(), 5);
        assert_eq!(
            mem::size_of::<<(u8, String) as Alternatives>::Storage>(),
            mem::size_of::<String>()
        );
        assert_eq!(
            mem::align_of::<<(u8, u64, Empty) as Alternatives>::Storage>(),
            mem::align_of::<u64>()
        );
    }

    #[test]
    fn test_tables_have_one_entry_per_position() {
        assert_eq!(<(u8, String) as CloneAlternatives>::CLONE.len(), 3);
        assert_eq!(<Twelve as PartialOrdAlternatives>::PARTIAL_CMP.len(), 13);
        assert_eq!(<(u8, char) as OrdAlternatives>::CMP.len(), 3);
    }
}
