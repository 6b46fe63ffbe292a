use alloc::boxed::Box;
use core::any::Any;

use crate::Shape;

/// Number of items in a list.
pub type ListLenFn = fn(list: &dyn Any) -> Option<usize>;

/// Borrows the item at an index.
pub type ListGetFn = fn(list: &dyn Any, index: usize) -> Option<&dyn Any>;

/// Allocates an empty list with room for `capacity` items.
pub type ListWithCapacityFn = fn(capacity: usize) -> Box<dyn Any>;

/// Appends a boxed item, handing it back if it is of the wrong type.
pub type ListPushFn = fn(list: &mut dyn Any, item: Box<dyn Any>) -> Result<(), Box<dyn Any>>;

/// Growable list definition.
#[derive(Clone, Copy)]
pub struct ListDef {
    /// shape of the items
    pub t: &'static Shape,

    /// vtable for interacting with the list
    pub vtable: ListVTable,
}

/// Operations on a list.
#[derive(Clone, Copy)]
pub struct ListVTable {
    /// cf. [`ListLenFn`]
    pub len: ListLenFn,
    /// cf. [`ListGetFn`]
    pub get: ListGetFn,
    /// cf. [`ListWithCapacityFn`]
    pub with_capacity: ListWithCapacityFn,
    /// cf. [`ListPushFn`]
    pub push: ListPushFn,
}
