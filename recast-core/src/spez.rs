//! Auto-deref specialization helpers for the derive macro.
//!
//! `(&&Spez::<T>::new()).spez_default(fieldwise)` resolves to the `Yes` impl when `T`
//! implements the trait, and falls through one deref to the `No` impl otherwise.

use alloc::boxed::Box;
use core::any::Any;
use core::marker::PhantomData;

use crate::{Recast, struct_clone};

/// Probe for a type's capabilities.
pub struct Spez<T>(PhantomData<T>);

impl<T> Spez<T> {
    /// Creates a probe.
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Spez(PhantomData)
    }
}

/// Builds a record's zero value from the zero values of its fields.
///
/// Emitted by the derive macro, which is the only place that can name the
/// record's constructor.
pub type FieldwiseDefaultFn = fn() -> Option<Box<dyn Any>>;

/// `T: Default`
pub trait SpezDefaultYes {
    /// Allocates `T::default()`.
    fn spez_default(&self, fieldwise: FieldwiseDefaultFn) -> Option<Box<dyn Any>>;
}

impl<T: Any + Default> SpezDefaultYes for &Spez<T> {
    fn spez_default(&self, _fieldwise: FieldwiseDefaultFn) -> Option<Box<dyn Any>> {
        Some(Box::new(T::default()))
    }
}

/// `T: !Default`
pub trait SpezDefaultNo {
    /// Builds the zero value field by field; `None` when a field has no zero value.
    fn spez_default(&self, fieldwise: FieldwiseDefaultFn) -> Option<Box<dyn Any>>;
}

impl<T> SpezDefaultNo for Spez<T> {
    fn spez_default(&self, fieldwise: FieldwiseDefaultFn) -> Option<Box<dyn Any>> {
        fieldwise()
    }
}

/// `T: Clone`
pub trait SpezCloneYes {
    /// Copies with `Clone`.
    fn spez_clone(&self, value: &dyn Any) -> Option<Box<dyn Any>>;
}

impl<T: Any + Clone> SpezCloneYes for &Spez<T> {
    fn spez_clone(&self, value: &dyn Any) -> Option<Box<dyn Any>> {
        Some(Box::new(value.downcast_ref::<T>()?.clone()))
    }
}

/// `T: !Clone`
pub trait SpezCloneNo {
    /// Copies field by field.
    fn spez_clone(&self, value: &dyn Any) -> Option<Box<dyn Any>>;
}

impl<T: Recast> SpezCloneNo for Spez<T> {
    fn spez_clone(&self, value: &dyn Any) -> Option<Box<dyn Any>> {
        struct_clone::<T>(value)
    }
}
