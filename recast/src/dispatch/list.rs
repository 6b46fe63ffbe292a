use core::any::Any;
use std::sync::Arc;

use super::{Convert, Converter, LazyConverter, ShallowConverter, allocate};
use crate::{ConvertError, Def, ListDef, Options, Params, Recaster, Shape};

pub(super) fn build(
    src: &'static Shape,
    dst: &'static Shape,
    options: &Options,
) -> Result<Converter, ConvertError> {
    let src_item = match src.def {
        Def::List(ld) => ld.t,
        Def::Array(ad) => ad.t,
        _ => return Err(ConvertError::SourceNotSequence { src, dst }),
    };
    let Def::List(dst_list) = dst.def else {
        return Err(ConvertError::Unsupported { src, dst });
    };
    if !options.is_deep_copy() {
        return Ok(Arc::new(ShallowConverter { src, dst }));
    }
    Ok(Arc::new(DeepListConverter {
        src,
        dst,
        dst_list,
        item: LazyConverter::new(src_item, dst_list.t, Arc::new(options.clone())),
    }))
}

/// Builds a new list, converting item by item.
struct DeepListConverter {
    src: &'static Shape,
    dst: &'static Shape,
    dst_list: ListDef,
    item: LazyConverter,
}

impl DeepListConverter {
    fn items<'a>(&self, src: &'a dyn Any) -> Result<Vec<&'a dyn Any>, ConvertError> {
        let not_src = || ConvertError::ShapeMismatch { expected: self.src };
        match self.src.def {
            Def::List(ld) => {
                let len = (ld.vtable.len)(src).ok_or_else(not_src)?;
                (0..len)
                    .map(|i| (ld.vtable.get)(src, i).ok_or_else(not_src))
                    .collect()
            }
            Def::Array(ad) => (0..ad.n)
                .map(|i| (ad.get)(src, i).ok_or_else(not_src))
                .collect(),
            _ => Err(not_src()),
        }
    }
}

impl Convert for DeepListConverter {
    fn convert(
        &self,
        cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        params: &Params,
    ) -> Result<(), ConvertError> {
        let not_dst = || ConvertError::ShapeMismatch { expected: self.dst };

        let items = self.items(src)?;
        let mut out = (self.dst_list.vtable.with_capacity)(items.len());
        for item in items {
            let mut slot = allocate(self.dst_list.t)?;
            self.item.convert(cx, item, slot.as_mut(), params)?;
            (self.dst_list.vtable.push)(out.as_mut(), slot).map_err(|_| not_dst())?;
        }
        self.dst.replace(dst, out).map_err(|_| not_dst())
    }
}
