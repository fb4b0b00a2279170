//! Exhaustive dispatch over the alternatives of a variant.
//!
//! Rust has no generic closures, so a "callable that handles every alternative" is a type
//! implementing [`Visit<T>`] once per alternative, [`Empty`](crate::Empty) included. Forgetting
//! one is a build error at the call to [`Variant::visit`](crate::Variant::visit).
//!
//! ```
//! use compact_variant::{Empty, Variant, Visit, Visitor};
//!
//! struct Width;
//!
//! impl Visitor for Width {
//!     type Output = usize;
//! }
//! impl Visit<Empty> for Width {
//!     fn visit(&mut self, _: &Empty) -> usize {
//!         0
//!     }
//! }
//! impl Visit<u32> for Width {
//!     fn visit(&mut self, value: &u32) -> usize {
//!         value.to_string().len()
//!     }
//! }
//! impl Visit<String> for Width {
//!     fn visit(&mut self, value: &String) -> usize {
//!         value.len()
//!     }
//! }
//!
//! let mut variant: Variant<(u32, String)> = Variant::new();
//! assert_eq!(variant.visit(Width), 0);
//!
//! variant.emplace(12345_u32);
//! assert_eq!(variant.visit(Width), 5);
//!
//! variant.emplace(String::from("hi"));
//! assert_eq!(variant.visit(Width), 2);
//! ```

/// Names the single result type shared by every [`Visit`] and [`VisitMut`] impl of a visitor.
pub trait Visitor {
    type Output;
}

/// Handles the alternative `T` by reference.
pub trait Visit<T>: Visitor {
    fn visit(&mut self, value: &T) -> Self::Output;
}

/// Handles the alternative `T` by mutable reference.
pub trait VisitMut<T>: Visitor {
    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Output = V::Output;
}

impl<T, V: Visit<T> + ?Sized> Visit<T> for &mut V {
    #[inline]
    fn visit(&mut self, value: &T) -> Self::Output {
        (**self).visit(value)
    }
}

impl<T, V: VisitMut<T> + ?Sized> VisitMut<T> for &mut V {
    #[inline]
    fn visit_mut(&mut self, value: &mut T) -> Self::Output {
        (**self).visit_mut(value)
    }
}
