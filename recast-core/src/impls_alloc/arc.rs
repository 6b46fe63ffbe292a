use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;

use crate::{
    ConstTypeId, Def, KnownPointer, PointerDef, PointerVTable, Recast, Shape, ValueVTable,
    default_through_shape, never_zero, replace_value,
};

impl<T: Recast> Recast for Arc<T> {
    const SHAPE: &'static Shape = &const {
        fn default_value<T: Recast>() -> Option<Box<dyn Any>> {
            Some(Box::new(Arc::new(default_through_shape::<T>()?)))
        }

        // copying an `Arc` shares the pointee
        fn clone_value<T: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
            Some(Box::new(Arc::clone(value.downcast_ref::<Arc<T>>()?)))
        }

        fn borrow<T: Recast>(this: &dyn Any) -> Option<&dyn Any> {
            this.downcast_ref::<Arc<T>>().map(|arc| &**arc as &dyn Any)
        }

        fn borrow_mut<T: Recast>(this: &mut dyn Any) -> Option<&mut dyn Any> {
            Arc::get_mut(this.downcast_mut::<Arc<T>>()?).map(|v| v as &mut dyn Any)
        }

        fn new_into<T: Recast>(pointee: Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>> {
            let pointee = pointee.downcast::<T>()?;
            Ok(Box::new(Arc::<T>::from(pointee)))
        }

        Shape {
            id: ConstTypeId::of::<Arc<T>>(),
            type_identifier: "Arc",
            def: Def::Pointer(PointerDef {
                pointee: T::SHAPE,
                known: KnownPointer::Arc,
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
                replace: replace_value::<Arc<T>>,
            },
        }
    };
}
