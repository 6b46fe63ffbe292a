use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use crate::{
    ArrayDef, ConstTypeId, Def, Recast, Shape, ValueVTable, clone_through_shape,
    default_through_shape, replace_value,
};

impl<T: Recast, const N: usize> Recast for [T; N] {
    const SHAPE: &'static Shape = &const {
        fn default_value<T: Recast, const N: usize>() -> Option<Box<dyn Any>> {
            let mut items = Vec::with_capacity(N);
            for _ in 0..N {
                items.push(default_through_shape::<T>()?);
            }
            let array: [T; N] = items.try_into().ok()?;
            Some(Box::new(array))
        }

        fn clone_value<T: Recast, const N: usize>(value: &dyn Any) -> Option<Box<dyn Any>> {
            let array = value.downcast_ref::<[T; N]>()?;
            let items = array
                .iter()
                .map(clone_through_shape)
                .collect::<Option<Vec<T>>>()?;
            let array: [T; N] = items.try_into().ok()?;
            Some(Box::new(array))
        }

        fn is_zero<T: Recast, const N: usize>(value: &dyn Any) -> bool {
            value
                .downcast_ref::<[T; N]>()
                .is_some_and(|array| array.iter().all(|item| T::SHAPE.is_zero(item)))
        }

        fn get<T: Recast, const N: usize>(array: &dyn Any, index: usize) -> Option<&dyn Any> {
            array
                .downcast_ref::<[T; N]>()?
                .get(index)
                .map(|v| v as &dyn Any)
        }

        Shape {
            id: ConstTypeId::of::<[T; N]>(),
            type_identifier: "array",
            def: Def::Array(ArrayDef {
                t: T::SHAPE,
                n: N,
                get: get::<T, N>,
            }),
            vtable: ValueVTable {
                default_value: default_value::<T, N>,
                clone_value: clone_value::<T, N>,
                is_zero: is_zero::<T, N>,
                replace: replace_value::<[T; N]>,
            },
        }
    };
}
