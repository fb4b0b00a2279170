//! Compile time positions into the storage chain.
//!
//! The position of a type is found by the trait solver, in the same way it finds a type's
//! position inside an HList: `Here` matches the head of a link, `There<I>` recurses into the tail.
//! Nothing about this lookup exists at runtime, only the resulting `POSITION` constant.

use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr;

use super::chain::Cons;

/// Index of the head of a chain link.
pub struct Here {
    _priv: (),
}

/// Index of `I`, one link further down the chain.
pub struct There<I> {
    _marker: PhantomData<I>,
}

pub type P0 = Here;
pub type P1 = There<P0>;
pub type P2 = There<P1>;
pub type P3 = There<P2>;
pub type P4 = There<P3>;
pub type P5 = There<P4>;
pub type P6 = There<P5>;
pub type P7 = There<P6>;
pub type P8 = There<P7>;
pub type P9 = There<P8>;
pub type P10 = There<P9>;
pub type P11 = There<P10>;
pub type P12 = There<P11>;

/// Locates the alternative `T` at index `I` in a storage chain.
///
/// `I` is almost always left for the compiler to infer, e.g. `variant.try_get::<String, _>()`.
/// It only needs to be spelled out when the same type appears twice in the alternative list.
///
/// # Safety
///
/// `POSITION` must be the number of links in front of the one holding `T`, and `get`, `get_mut`
/// and `write` must all address the storage of that link.
pub unsafe trait Locate<T, I> {
    /// The position of `T`, which is also its discriminant.
    const POSITION: u8;

    /// Returns a reference to the `T` held in the chain.
    ///
    /// # Safety
    /// * `T` must be the live alternative
    unsafe fn get(&self) -> &T;

    /// Returns a mutable reference to the `T` held in the chain.
    ///
    /// # Safety
    /// * `T` must be the live alternative
    unsafe fn get_mut(&mut self) -> &mut T;

    /// Constructs `value` in place.
    ///
    /// # Safety
    /// * `slot` must be valid for writes and aligned for `Self`
    /// * no alternative may be live, it would be leaked
    unsafe fn write(slot: *mut Self, value: T);
}

unsafe impl<H, Tail> Locate<H, Here> for Cons<H, Tail> {
    const POSITION: u8 = 0;

    #[inline(always)]
    unsafe fn get(&self) -> &H {
        // SAFETY: the caller guarantees `head` is live
        unsafe { &self.head }
    }

    #[inline(always)]
    unsafe fn get_mut(&mut self) -> &mut H {
        // SAFETY: the caller guarantees `head` is live
        unsafe { &mut self.head }
    }

    #[inline(always)]
    unsafe fn write(slot: *mut Self, value: H) {
        // SAFETY: the caller guarantees `slot` is valid, we never create a reference to the
        // uninitialized field
        unsafe { ptr::addr_of_mut!((*slot).head).write(ManuallyDrop::new(value)) }
    }
}

unsafe impl<H, Tail, T, I> Locate<T, There<I>> for Cons<H, Tail>
where
    Tail: Locate<T, I>,
{
    const POSITION: u8 = <Tail as Locate<T, I>>::POSITION + 1;

    #[inline(always)]
    unsafe fn get(&self) -> &T {
        // SAFETY: the caller guarantees `T` is live, so `tail` is too
        unsafe { <Tail as Locate<T, I>>::get(&self.tail) }
    }

    #[inline(always)]
    unsafe fn get_mut(&mut self) -> &mut T {
        // SAFETY: the caller guarantees `T` is live, so `tail` is too
        unsafe { <Tail as Locate<T, I>>::get_mut(&mut self.tail) }
    }

    #[inline(always)]
    unsafe fn write(slot: *mut Self, value: T) {
        // SAFETY: `ManuallyDrop<Tail>` is `repr(transparent)`, so the cast keeps validity
        unsafe {
            let tail = ptr::addr_of_mut!((*slot).tail).cast::<Tail>();
            <Tail as Locate<T, I>>::write(tail, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use core::mem::MaybeUninit;

    use super::{
        Locate,
        P1,
        P2,
        P3,
    };
    use crate::repr::chain::{
        Cons,
        Empty,
        Nil,
    };

    type Chain = Cons<Empty, Cons<u8, Cons<String, Cons<u8, Nil>>>>;

    fn position_of<T, I>() -> u8
    where
        Chain: Locate<T, I>,
    {
        <Chain as Locate<T, I>>::POSITION
    }

    #[test]
    fn test_positions() {
        assert_eq!(position_of::<Empty, _>(), 0);
        assert_eq!(position_of::<String, _>(), 2);

        // `u8` is listed twice, so its index has to be named
        assert_eq!(position_of::<u8, P1>(), 1);
        assert_eq!(position_of::<u8, P3>(), 3);
    }

    #[test]
    fn test_write_then_get() {
        let mut slot = MaybeUninit::<Chain>::uninit();

        unsafe {
            <Chain as Locate<String, P2>>::write(slot.as_mut_ptr(), String::from("chain"));

            let chain = &mut *slot.as_mut_ptr();
            <Chain as Locate<String, P2>>::get_mut(chain).push('!');
            assert_eq!(<Chain as Locate<String, P2>>::get(chain), "chain!");

            // every alternative lives at offset zero
            let by_offset = &*(chain as *const Chain).cast::<String>();
            assert_eq!(by_offset, "chain!");

            core::ptr::drop_in_place(<Chain as Locate<String, P2>>::get_mut(chain));
        }
    }
}
