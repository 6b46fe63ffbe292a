use alloc::boxed::Box;
use core::any::Any;

use crate::{
    ConstTypeId, Def, KnownPointer, PointerDef, PointerVTable, Recast, Shape, ValueVTable,
    clone_through_shape, default_through_shape, never_zero, replace_value,
};

impl<T: Recast> Recast for Box<T> {
    const SHAPE: &'static Shape = &const {
        fn default_value<T: Recast>() -> Option<Box<dyn Any>> {
            Some(Box::new(Box::new(default_through_shape::<T>()?)))
        }

        fn clone_value<T: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
            let boxed = value.downcast_ref::<Box<T>>()?;
            Some(Box::new(Box::new(clone_through_shape::<T>(boxed)?)))
        }

        fn borrow<T: Recast>(this: &dyn Any) -> Option<&dyn Any> {
            this.downcast_ref::<Box<T>>().map(|b| &**b as &dyn Any)
        }

        fn borrow_mut<T: Recast>(this: &mut dyn Any) -> Option<&mut dyn Any> {
            this.downcast_mut::<Box<T>>().map(|b| &mut **b as &mut dyn Any)
        }

        fn new_into<T: Recast>(pointee: Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>> {
            let pointee = pointee.downcast::<T>()?;
            Ok(Box::new(pointee))
        }

        Shape {
            id: ConstTypeId::of::<Box<T>>(),
            type_identifier: "Box",
            def: Def::Pointer(PointerDef {
                pointee: T::SHAPE,
                known: KnownPointer::Box,
                vtable: PointerVTable {
                    borrow: borrow::<T>,
                    borrow_mut: borrow_mut::<T>,
                    new_into: new_into::<T>,
                },
            }),
            vtable: ValueVTable {
                default_value: default_value::<T>,
                clone_value: clone_value::<T>,
                is_zero: never_zero,
                replace: replace_value::<Box<T>>,
            },
        }
    };
}
