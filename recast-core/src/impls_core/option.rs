use alloc::boxed::Box;
use core::any::Any;

use crate::{
    ConstTypeId, Def, OptionDef, OptionVTable, Recast, Shape, ValueVTable, clone_through_shape,
    replace_value,
};

impl<T: Recast> Recast for Option<T> {
    const SHAPE: &'static Shape = &const {
        fn default_value<T: Recast>() -> Option<Box<dyn Any>> {
            Some(Box::new(None::<T>))
        }

        fn clone_value<T: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
            let copy = match value.downcast_ref::<Option<T>>()? {
                None => None,
                Some(inner) => Some(clone_through_shape(inner)?),
            };
            Some(Box::new(copy))
        }

        fn is_zero<T: Recast>(value: &dyn Any) -> bool {
            value.downcast_ref::<Option<T>>().is_some_and(Option::is_none)
        }

        fn is_none<T: Recast>(option: &dyn Any) -> bool {
            option.downcast_ref::<Option<T>>().is_none_or(Option::is_none)
        }

        fn get<T: Recast>(option: &dyn Any) -> Option<&dyn Any> {
            option
                .downcast_ref::<Option<T>>()?
                .as_ref()
                .map(|v| v as &dyn Any)
        }

        fn get_mut<T: Recast>(option: &mut dyn Any) -> Option<&mut dyn Any> {
            option
                .downcast_mut::<Option<T>>()?
                .as_mut()
                .map(|v| v as &mut dyn Any)
        }

        fn set_none<T: Recast>(option: &mut dyn Any) {
            if let Some(option) = option.downcast_mut::<Option<T>>() {
                *option = None;
            }
        }

        fn set_some<T: Recast>(option: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
            let value = value.downcast::<T>()?;
            match option.downcast_mut::<Option<T>>() {
                Some(option) => {
                    *option = Some(*value);
                    Ok(())
                }
                None => Err(value),
            }
        }

        Shape {
            id: ConstTypeId::of::<Option<T>>(),
            type_identifier: "Option",
            def: Def::Option(OptionDef {
                t: T::SHAPE,
                vtable: OptionVTable {
                    is_none: is_none::<T>,
                    get: get::<T>,
                    get_mut: get_mut::<T>,
                    set_none: set_none::<T>,
                    set_some: set_some::<T>,
                },
            }),
            vtable: ValueVTable {
                default_value: default_value::<T>,
                clone_value: clone_value::<T>,
                is_zero: is_zero::<T>,
                replace: replace_value::<Option<T>>,
            },
        }
    };
}
