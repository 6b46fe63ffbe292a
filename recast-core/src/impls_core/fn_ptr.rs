use crate::{ConstTypeId, Def, Recast, Shape, ValueVTable, clone_of, never_zero, no_default, replace_value};

macro_rules! impl_recast_for_fn_ptr {
    ($($args:ident),*) => {
        impl<$($args: 'static,)* R: 'static> Recast for fn($($args),*) -> R {
            const SHAPE: &'static Shape = &const {
                Shape {
                    id: ConstTypeId::of::<fn($($args),*) -> R>(),
                    type_identifier: "fn",
                    def: Def::Function,
                    vtable: ValueVTable {
                        default_value: no_default,
                        clone_value: clone_of::<fn($($args),*) -> R>,
                        is_zero: never_zero,
                        replace: replace_value::<fn($($args),*) -> R>,
                    },
                }
            };
        }
    };
}

impl_recast_for_fn_ptr!();
impl_recast_for_fn_ptr!(A);
impl_recast_for_fn_ptr!(A, B);
impl_recast_for_fn_ptr!(A, B, C);
