//! Type-erased operations on a single alternative.
//!
//! These are the entries of the jump tables in [`crate::alternatives`]. Every table is indexed by
//! discriminant, and every entry receives a pointer to the start of the storage chain, which is
//! where each alternative lives.
//!
//! # Safety
//!
//! For every function here, `slot` (and `other`, where present) must point at a live, aligned `T`.
//! The one exception is the destination of [`clone_slot`], which must be valid for writes and
//! hold nothing live.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{
    Hash,
    Hasher,
};
use core::ptr;

use crate::visit::{
    Visit,
    VisitMut,
};

#[inline]
pub(crate) unsafe fn drop_slot<T>(slot: *mut u8) {
    ptr::drop_in_place(slot.cast::<T>())
}

#[inline]
pub(crate) unsafe fn clone_slot<T: Clone>(slot: *const u8, dst: *mut u8) {
    let cloned = (*slot.cast::<T>()).clone();
    dst.cast::<T>().write(cloned)
}

#[inline]
pub(crate) unsafe fn eq_slot<T: PartialEq>(slot: *const u8, other: *const u8) -> bool {
    *slot.cast::<T>() == *other.cast::<T>()
}

#[inline]
pub(crate) unsafe fn partial_cmp_slot<T: PartialOrd>(
    slot: *const u8,
    other: *const u8,
) -> Option<Ordering> {
    (*slot.cast::<T>()).partial_cmp(&*other.cast::<T>())
}

#[inline]
pub(crate) unsafe fn cmp_slot<T: Ord>(slot: *const u8, other: *const u8) -> Ordering {
    (*slot.cast::<T>()).cmp(&*other.cast::<T>())
}

#[inline]
pub(crate) unsafe fn hash_slot<T: Hash, H: Hasher>(slot: *const u8, state: &mut H) {
    (*slot.cast::<T>()).hash(state)
}

#[inline]
pub(crate) unsafe fn debug_slot<T: fmt::Debug>(
    slot: *const u8,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    fmt::Debug::fmt(&*slot.cast::<T>(), f)
}

#[inline]
pub(crate) unsafe fn visit_slot<T, V: Visit<T>>(slot: *const u8, visitor: &mut V) -> V::Output {
    visitor.visit(&*slot.cast::<T>())
}

#[inline]
pub(crate) unsafe fn visit_mut_slot<T, V: VisitMut<T>>(slot: *mut u8, visitor: &mut V) -> V::Output {
    visitor.visit_mut(&mut *slot.cast::<T>())
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;
    use core::mem::MaybeUninit;

    use super::{
        clone_slot,
        cmp_slot,
        drop_slot,
        eq_slot,
    };

    #[test]
    fn test_clone_then_drop() {
        let original = vec![1_u16, 2, 3];
        let mut copy = MaybeUninit::<Vec<u16>>::uninit();

        unsafe {
            let src = &original as *const Vec<u16> as *const u8;
            clone_slot::<Vec<u16>>(src, copy.as_mut_ptr().cast());

            let dst = copy.as_ptr().cast::<u8>();
            assert!(eq_slot::<Vec<u16>>(src, dst));
            assert_eq!(cmp_slot::<Vec<u16>>(src, dst), Ordering::Equal);

            drop_slot::<Vec<u16>>(copy.as_mut_ptr().cast());
        }
    }
}
