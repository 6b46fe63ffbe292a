use core::any::Any;

use crate::Shape;

/// Borrows the element at an index.
pub type ArrayGetFn = fn(array: &dyn Any, index: usize) -> Option<&dyn Any>;

/// Fixed-size array definition.
#[derive(Clone, Copy)]
pub struct ArrayDef {
    /// shape of the items
    pub t: &'static Shape,

    /// number of items
    pub n: usize,

    /// cf. [`ArrayGetFn`]
    pub get: ArrayGetFn,
}
