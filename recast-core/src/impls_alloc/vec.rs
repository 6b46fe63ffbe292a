use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use crate::{
    ConstTypeId, Def, ListDef, ListVTable, Recast, Shape, ValueVTable, clone_through_shape,
    replace_value,
};

impl<T: Recast> Recast for Vec<T> {
    const SHAPE: &'static Shape = &const {
        fn default_value<T: Recast>() -> Option<Box<dyn Any>> {
            Some(Box::new(Vec::<T>::new()))
        }

        fn clone_value<T: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
            let items = value
                .downcast_ref::<Vec<T>>()?
                .iter()
                .map(clone_through_shape)
                .collect::<Option<Vec<T>>>()?;
            Some(Box::new(items))
        }

        fn is_zero<T: Recast>(value: &dyn Any) -> bool {
            value.downcast_ref::<Vec<T>>().is_some_and(Vec::is_empty)
        }

        fn len<T: Recast>(list: &dyn Any) -> Option<usize> {
            list.downcast_ref::<Vec<T>>().map(Vec::len)
        }

        fn get<T: Recast>(list: &dyn Any, index: usize) -> Option<&dyn Any> {
            list.downcast_ref::<Vec<T>>()?
                .get(index)
                .map(|v| v as &dyn Any)
        }

        fn with_capacity<T: Recast>(capacity: usize) -> Box<dyn Any> {
            Box::new(Vec::<T>::with_capacity(capacity))
        }

        fn push<T: Recast>(list: &mut dyn Any, item: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
            let item = item.downcast::<T>()?;
            match list.downcast_mut::<Vec<T>>() {
                Some(list) => {
                    list.push(*item);
                    Ok(())
                }
                None => Err(item),
            }
        }

        Shape {
            id: ConstTypeId::of::<Vec<T>>(),
            type_identifier: "Vec",
            def: Def::List(ListDef {
                t: T::SHAPE,
                vtable: ListVTable {
                    len: len::<T>,
                    get: get::<T>,
                    with_capacity: with_capacity::<T>,
                    push: push::<T>,
                },
            }),
            vtable: ValueVTable {
                default_value: default_value::<T>,
                clone_value: clone_value::<T>,
                is_zero: is_zero::<T>,
                replace: replace_value::<Vec<T>>,
            },
        }
    };
}
