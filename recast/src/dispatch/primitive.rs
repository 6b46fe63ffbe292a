use core::any::Any;

use super::{Convert, assign_copy};
use crate::{ConvertError, Def, Params, Recaster, Shape};

/// Scalars and fixed-size arrays: copied by value, never recursed into.
pub(super) struct PrimitiveConverter {
    src: &'static Shape,
    dst: &'static Shape,
}

impl PrimitiveConverter {
    pub(super) fn new(src: &'static Shape, dst: &'static Shape) -> Self {
        PrimitiveConverter { src, dst }
    }
}

impl Convert for PrimitiveConverter {
    fn convert(
        &self,
        _cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        _params: &Params,
    ) -> Result<(), ConvertError> {
        if let Def::Option(od) = self.src.def
            && (od.vtable.is_none)(src)
        {
            return Err(ConvertError::NilSource { shape: self.src });
        }
        if !self.src.is_same(self.dst) {
            return Err(ConvertError::cannot_assign(self.src, self.dst));
        }
        assign_copy(self.dst, src, dst)
    }
}
