use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::{ConstTypeId, Def, Recast, Shape, ValueVTable, no_clone, replace_value};

/// A value whose concrete type is only known at runtime.
///
/// The conversion engine refuses to convert into it; it exists so records holding
/// such values can still be described.
#[derive(Default)]
pub struct DynamicValue(pub Option<Box<dyn Any + Send + Sync>>);

impl DynamicValue {
    /// Wraps a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        DynamicValue(Some(Box::new(value)))
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Downcasts the held value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("DynamicValue(..)"),
            None => f.write_str("DynamicValue(empty)"),
        }
    }
}

impl Recast for DynamicValue {
    const SHAPE: &'static Shape = &const {
        fn default_value() -> Option<Box<dyn Any>> {
            Some(Box::new(DynamicValue(None)))
        }

        fn is_zero(value: &dyn Any) -> bool {
            value.downcast_ref::<DynamicValue>().is_some_and(DynamicValue::is_empty)
        }

        Shape {
            id: ConstTypeId::of::<DynamicValue>(),
            type_identifier: "DynamicValue",
            def: Def::Dynamic,
            vtable: ValueVTable {
                default_value,
                clone_value: no_clone,
                is_zero,
                replace: replace_value::<DynamicValue>,
            },
        }
    };
}
