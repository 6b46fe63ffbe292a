use alloc::boxed::Box;
use core::any::Any;

use crate::Shape;

/// Borrows the inner value, `None` for `None` or a value of the wrong type.
pub type OptionGetFn = fn(option: &dyn Any) -> Option<&dyn Any>;

/// Mutably borrows the inner value.
pub type OptionGetMutFn = fn(option: &mut dyn Any) -> Option<&mut dyn Any>;

/// Whether the option holds nothing.
pub type OptionIsNoneFn = fn(option: &dyn Any) -> bool;

/// Sets the option to `None`.
pub type OptionSetNoneFn = fn(option: &mut dyn Any);

/// Sets the option to `Some(value)`, handing the value back if it is of the wrong type.
pub type OptionSetSomeFn = fn(option: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;

/// Describes an `Option<T>`.
#[derive(Clone, Copy)]
pub struct OptionDef {
    /// shape of the inner type
    pub t: &'static Shape,

    /// vtable for interacting with the option
    pub vtable: OptionVTable,
}

/// Operations on an option.
#[derive(Clone, Copy)]
pub struct OptionVTable {
    /// cf. [`OptionIsNoneFn`]
    pub is_none: OptionIsNoneFn,
    /// cf. [`OptionGetFn`]
    pub get: OptionGetFn,
    /// cf. [`OptionGetMutFn`]
    pub get_mut: OptionGetMutFn,
    /// cf. [`OptionSetNoneFn`]
    pub set_none: OptionSetNoneFn,
    /// cf. [`OptionSetSomeFn`]
    pub set_some: OptionSetSomeFn,
}
