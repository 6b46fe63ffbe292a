use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::Any;

use crate::{
    ConstTypeId, Def, KnownPointer, PointerDef, PointerVTable, Recast, Shape, ValueVTable,
    default_through_shape, never_zero, replace_value,
};

impl<T: Recast> Recast for Rc<T> {
    const SHAPE: &'static Shape = &const {
        fn default_value<T: Recast>() -> Option<Box<dyn Any>> {
            Some(Box::new(Rc::new(default_through_shape::<T>()?)))
        }

        // copying an `Rc` shares the pointee
        fn clone_value<T: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
            Some(Box::new(Rc::clone(value.downcast_ref::<Rc<T>>()?)))
        }

        fn borrow<T: Recast>(this: &dyn Any) -> Option<&dyn Any> {
            this.downcast_ref::<Rc<T>>().map(|rc| &**rc as &dyn Any)
        }

        fn borrow_mut<T: Recast>(this: &mut dyn Any) -> Option<&mut dyn Any> {
            Rc::get_mut(this.downcast_mut::<Rc<T>>()?).map(|v| v as &mut dyn Any)
        }

        fn new_into<T: Recast>(pointee: Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>> {
            let pointee = pointee.downcast::<T>()?;
            Ok(Box::new(Rc::<T>::from(pointee)))
        }

        Shape {
            id: ConstTypeId::of::<Rc<T>>(),
            type_identifier: "Rc",
            def: Def::Pointer(PointerDef {
                pointee: T::SHAPE,
                known: KnownPointer::Rc,
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
                replace: replace_value::<Rc<T>>,
            },
        }
    };
}
