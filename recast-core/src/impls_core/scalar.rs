use alloc::string::String;

use crate::{ConstTypeId, Def, Recast, Shape, ValueVTable};

macro_rules! impl_recast_for_scalar {
    (@shape $ty:ty, $name:literal, $vtable:expr) => {
        impl Recast for $ty {
            const SHAPE: &'static Shape = &const {
                Shape {
                    id: ConstTypeId::of::<$ty>(),
                    type_identifier: $name,
                    def: Def::Scalar,
                    vtable: $vtable,
                }
            };
        }
    };
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl_recast_for_scalar!(@shape $ty, $name, ValueVTable::scalar::<$ty>());
        )*
    };
}

// zero means all bits clear, so `-0.0` is a value
macro_rules! impl_recast_for_float {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl_recast_for_scalar!(@shape $ty, $name, ValueVTable {
                is_zero: |value| value.downcast_ref::<$ty>().is_some_and(|v| v.to_bits() == 0),
                ..ValueVTable::scalar::<$ty>()
            });
        )*
    };
}

impl_recast_for_scalar! {
    () => "()",
    bool => "bool",
    char => "char",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    String => "String",
    &'static str => "&str",
}

impl_recast_for_float! {
    f32 => "f32",
    f64 => "f64",
}
