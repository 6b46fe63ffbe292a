use core::any::Any;
use std::sync::Arc;

use super::{Convert, Converter, LazyConverter, ShallowConverter, allocate};
use crate::{ConvertError, Def, Options, Params, Recaster, Shape};

pub(super) fn build(
    src: &'static Shape,
    dst: &'static Shape,
    options: &Options,
) -> Result<Converter, ConvertError> {
    if !options.is_deep_copy() {
        return Ok(Arc::new(ShallowConverter { src, dst }));
    }
    let dst_pointee = match dst.def {
        Def::Option(od) => od.t,
        Def::Pointer(pd) => pd.pointee,
        _ => return Err(ConvertError::Unsupported { src, dst }),
    };
    // a source that is not pointer-like is already the pointee
    let src_pointee = match src.def {
        Def::Option(od) => od.t,
        Def::Pointer(pd) => pd.pointee,
        _ => src,
    };
    Ok(Arc::new(DeepPointerConverter {
        src,
        dst,
        pointee: LazyConverter::new(src_pointee, dst_pointee, Arc::new(options.clone())),
    }))
}

/// Converts pointee into pointee, so the destination owns independent storage.
struct DeepPointerConverter {
    src: &'static Shape,
    dst: &'static Shape,
    pointee: LazyConverter,
}

impl DeepPointerConverter {
    /// The source pointee, `None` when the source is `None`.
    fn source_pointee<'a>(&self, src: &'a dyn Any) -> Result<Option<&'a dyn Any>, ConvertError> {
        match self.src.def {
            Def::Option(od) => Ok((od.vtable.get)(src)),
            Def::Pointer(pd) => (pd.vtable.borrow)(src)
                .map(Some)
                .ok_or(ConvertError::ShapeMismatch { expected: self.src }),
            _ => Ok(Some(src)),
        }
    }
}

impl Convert for DeepPointerConverter {
    fn convert(
        &self,
        cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        params: &Params,
    ) -> Result<(), ConvertError> {
        let src_pointee = self.source_pointee(src)?;
        let mismatch = || ConvertError::ShapeMismatch { expected: self.dst };

        match self.dst.def {
            Def::Option(od) => {
                let Some(src_pointee) = src_pointee else {
                    (od.vtable.set_none)(dst);
                    return Ok(());
                };
                if (od.vtable.is_none)(dst) {
                    (od.vtable.set_some)(dst, allocate(od.t)?).map_err(|_| mismatch())?;
                }
                let slot = (od.vtable.get_mut)(dst).ok_or_else(mismatch)?;
                self.pointee.convert(cx, src_pointee, slot, params)
            }
            Def::Pointer(pd) => {
                let Some(src_pointee) = src_pointee else {
                    return Err(ConvertError::NilSource { shape: self.src });
                };
                if let Some(slot) = (pd.vtable.borrow_mut)(dst) {
                    return self.pointee.convert(cx, src_pointee, slot, params);
                }
                // the pointee has other owners: build a fresh one and swap the handle
                let mut fresh = allocate(pd.pointee)?;
                self.pointee.convert(cx, src_pointee, fresh.as_mut(), params)?;
                let handle = (pd.vtable.new_into)(fresh).map_err(|_| mismatch())?;
                self.dst.replace(dst, handle).map_err(|_| mismatch())
            }
            _ => Err(ConvertError::Unsupported {
                src: self.src,
                dst: self.dst,
            }),
        }
    }
}
