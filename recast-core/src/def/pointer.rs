use alloc::boxed::Box;
use core::any::Any;

use crate::Shape;

/// Borrows the pointee.
pub type BorrowFn = fn(this: &dyn Any) -> Option<&dyn Any>;

/// Mutably borrows the pointee. `None` when the pointee is shared with
/// another handle (or the pointer is of the wrong type).
pub type BorrowMutFn = fn(this: &mut dyn Any) -> Option<&mut dyn Any>;

/// Wraps a boxed pointee into a new pointer, handing it back if it is of the wrong type.
pub type NewIntoFn = fn(pointee: Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>>;

/// Known pointer kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnownPointer {
    /// [`Box<T>`], uniquely owning
    Box,
    /// [`alloc::rc::Rc<T>`], shared, single-threaded
    Rc,
    /// [`alloc::sync::Arc<T>`], shared, atomic
    Arc,
}

impl KnownPointer {
    /// Whether several handles may point to the same pointee.
    pub fn is_shared(self) -> bool {
        matches!(self, KnownPointer::Rc | KnownPointer::Arc)
    }
}

/// Describes a non-null pointer.
#[derive(Clone, Copy)]
pub struct PointerDef {
    /// shape of the pointee
    pub pointee: &'static Shape,

    /// which pointer this is
    pub known: KnownPointer,

    /// vtable for interacting with the pointer
    pub vtable: PointerVTable,
}

/// Operations on a pointer.
#[derive(Clone, Copy)]
pub struct PointerVTable {
    /// cf. [`BorrowFn`]
    pub borrow: BorrowFn,
    /// cf. [`BorrowMutFn`]
    pub borrow_mut: BorrowMutFn,
    /// cf. [`NewIntoFn`]
    pub new_into: NewIntoFn,
}
