use alloc::boxed::Box;
use core::any::Any;

use crate::{Field, Method, Recast};

/// Describes a record with named fields.
#[derive(Clone, Copy)]
pub struct StructDef {
    /// all declared fields, in declaration order
    pub fields: &'static [Field],

    /// conversion methods registered with `#[recast(methods(...))]`
    pub methods: &'static [Method],
}

impl StructDef {
    /// Gets a declared field by name. Does not look into flattened records.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Gets a registered method by name.
    pub fn method(&self, name: &str) -> Option<&'static Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// [`IsZeroFn`](crate::IsZeroFn) for records: every field, public or not, is zero.
pub fn struct_is_zero<T: Recast>(value: &dyn Any) -> bool {
    if value.downcast_ref::<T>().is_none() {
        return false;
    }
    T::SHAPE.fields().iter().all(|field| match (field.get)(value) {
        Some(fv) => field.shape().is_zero(fv),
        None => false,
    })
}

/// Field-wise copy of a record: start from its zero value and copy every field over.
///
/// Used for records that do not implement `Clone`.
pub fn struct_clone<T: Recast>(value: &dyn Any) -> Option<Box<dyn Any>> {
    let shape = T::SHAPE;
    let mut out = shape.default_value()?;
    for field in shape.fields() {
        let fv = (field.get)(value)?;
        let copy = field.shape().clone_value(fv)?;
        let slot = (field.get_mut)(out.as_mut())?;
        field.shape().replace(slot, copy).ok()?;
    }
    Some(out)
}
