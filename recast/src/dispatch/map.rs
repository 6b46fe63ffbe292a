use core::any::Any;
use std::sync::Arc;

use super::{Convert, Converter, LazyConverter, ShallowConverter, allocate};
use crate::{ConvertError, Def, MapDef, Options, Params, Recaster, Shape};

pub(super) fn build(
    src: &'static Shape,
    dst: &'static Shape,
    options: &Options,
) -> Result<Converter, ConvertError> {
    let Def::Map(src_map) = src.def else {
        return Err(ConvertError::SourceNotMap { src, dst });
    };
    let Def::Map(dst_map) = dst.def else {
        return Err(ConvertError::Unsupported { src, dst });
    };
    if !src_map.k.is_same(dst_map.k) {
        return Err(ConvertError::MapKeyMismatch {
            src_key: src_map.k,
            dst_key: dst_map.k,
        });
    }
    if !options.is_deep_copy() {
        return Ok(Arc::new(ShallowConverter { src, dst }));
    }
    Ok(Arc::new(DeepMapConverter {
        src,
        dst,
        src_map,
        dst_map,
        value: LazyConverter::new(src_map.v, dst_map.v, Arc::new(options.clone())),
    }))
}

/// Builds a new map: keys are copied, values converted one by one.
struct DeepMapConverter {
    src: &'static Shape,
    dst: &'static Shape,
    src_map: MapDef,
    dst_map: MapDef,
    value: LazyConverter,
}

impl Convert for DeepMapConverter {
    fn convert(
        &self,
        cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        params: &Params,
    ) -> Result<(), ConvertError> {
        let not_src = || ConvertError::ShapeMismatch { expected: self.src };
        let not_dst = || ConvertError::ShapeMismatch { expected: self.dst };

        let len = (self.src_map.vtable.len)(src).ok_or_else(not_src)?;
        let mut out = (self.dst_map.vtable.with_capacity)(len);
        for (key, value) in (self.src_map.vtable.iter)(src).ok_or_else(not_src)? {
            let key = self
                .src_map
                .k
                .clone_value(key)
                .ok_or(ConvertError::CannotClone {
                    shape: self.src_map.k,
                })?;
            let mut slot = allocate(self.dst_map.v)?;
            self.value.convert(cx, value, slot.as_mut(), params)?;
            (self.dst_map.vtable.insert)(out.as_mut(), key, slot).map_err(|_| not_dst())?;
        }
        self.dst.replace(dst, out).map_err(|_| not_dst())
    }
}
