//! The overlapping storage.
//!
//! A union can only be generic over a fixed number of fields, so storage for `n` alternatives is
//! a chain of two-field unions: `Cons<Empty, Cons<T0, Cons<T1, Nil>>>`. Every link is
//! `repr(C)`, which puts every alternative at offset zero of the outermost link. The chain is
//! sized and aligned for the largest alternative and never holds more than one live value.

use core::mem::ManuallyDrop;

/// The alternative at position zero of every variant, live whenever nothing else is.
///
/// A default constructed variant holds `Empty`, and so does any variant whose alternative failed
/// to construct.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Empty;

/// One link of the storage chain: holds either the alternative `H`, or something further down
/// the chain `T`.
#[repr(C)]
pub union Cons<H, T> {
    pub(super) head: ManuallyDrop<H>,
    pub(super) tail: ManuallyDrop<T>,
}

/// The end of the storage chain. Never live.
#[derive(Copy, Clone, Debug)]
pub struct Nil;

impl<H: Copy, T: Copy> Clone for Cons<H, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: Copy, T: Copy> Copy for Cons<H, T> {}

#[cfg(test)]
mod tests {
    use core::mem;

    use static_assertions::{
        assert_eq_align,
        assert_eq_size,
        assert_impl_all,
        assert_not_impl_any,
    };

    use super::{
        Cons,
        Empty,
        Nil,
    };

    type Chain = Cons<Empty, Cons<u8, Cons<u64, Cons<[u16; 7], Nil>>>>;

    assert_eq_size!(Empty, ());
    assert_eq_size!(Nil, ());
    assert_eq_size!(Cons<Empty, Nil>, ());
    assert_eq_align!(Chain, u64);

    assert_impl_all!(Cons<u8, Cons<f32, Nil>>: Copy);
    assert_not_impl_any!(Cons<u8, Cons<String, Nil>>: Copy);

    #[test]
    fn test_sized_for_largest() {
        assert_eq!(mem::size_of::<Chain>(), 16);
        assert_eq!(mem::size_of::<Cons<u8, Cons<[u8; 3], Nil>>>(), 3);
    }

    #[test]
    fn test_every_link_at_offset_zero() {
        let chain: Cons<u8, Cons<u32, Nil>> = Cons {
            tail: mem::ManuallyDrop::new(Cons {
                head: mem::ManuallyDrop::new(7),
            }),
        };

        let outer = &chain as *const _ as *const u8;
        // SAFETY: we just wrote `tail`
        let inner = unsafe { &*chain.tail } as *const _ as *const u8;
        assert_eq!(outer, inner);
    }
}
