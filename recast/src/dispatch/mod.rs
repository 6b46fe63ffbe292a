//! Picks a conversion strategy from the destination's type category.

use core::any::Any;
use std::sync::{Arc, OnceLock};

use crate::{ConvertError, Def, Options, Params, Recaster, Shape, trace};

mod list;
mod map;
mod pointer;
mod primitive;
mod record;

/// A conversion between two fixed types under fixed options.
///
/// Built once per (source type, destination type, options) and reused.
pub trait Convert: Send + Sync {
    /// Converts `src` into `dst`.
    ///
    /// `src` and `dst` must be of the types the converter was built for; nested
    /// converters are resolved through `cx`.
    fn convert(
        &self,
        cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        params: &Params,
    ) -> Result<(), ConvertError>;
}

/// A shared, type-erased converter.
pub type Converter = Arc<dyn Convert>;

/// Builds the converter for `src` into `dst`.
///
/// Fails only for mismatches that can be seen from the types alone; everything
/// else is reported when the converter runs.
pub fn dispatch(
    cx: &Recaster,
    src: &'static Shape,
    dst: &'static Shape,
    options: &Options,
) -> Result<Converter, ConvertError> {
    trace!(%src, %dst, deep_copy = options.is_deep_copy(), "dispatching");
    match dst.def {
        Def::Scalar | Def::Array(_) => Ok(Arc::new(primitive::PrimitiveConverter::new(src, dst))),
        Def::Option(_) | Def::Pointer(_) => pointer::build(src, dst, options),
        Def::Map(_) => map::build(src, dst, options),
        Def::List(_) => list::build(src, dst, options),
        Def::Struct(_) => record::build(cx, src, dst, options),
        _ => Ok(Arc::new(UnsupportedConverter { src, dst })),
    }
}

/// Dynamic values, functions, channels: always fails.
struct UnsupportedConverter {
    src: &'static Shape,
    dst: &'static Shape,
}

impl Convert for UnsupportedConverter {
    fn convert(
        &self,
        _cx: &Recaster,
        _src: &dyn Any,
        _dst: &mut dyn Any,
        _params: &Params,
    ) -> Result<(), ConvertError> {
        Err(ConvertError::Unsupported {
            src: self.src,
            dst: self.dst,
        })
    }
}

/// Copies a value of one type into a location of the same type.
///
/// Used by every shallow strategy: `Rc`/`Arc` handles end up sharing their pointee.
struct ShallowConverter {
    src: &'static Shape,
    dst: &'static Shape,
}

impl Convert for ShallowConverter {
    fn convert(
        &self,
        _cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        _params: &Params,
    ) -> Result<(), ConvertError> {
        if !self.src.is_same(self.dst) {
            return Err(ConvertError::cannot_assign(self.src, self.dst));
        }
        assign_copy(self.src, src, dst)
    }
}

/// Copies `src`, of shape `shape`, into `dst`, of the same shape.
fn assign_copy(shape: &'static Shape, src: &dyn Any, dst: &mut dyn Any) -> Result<(), ConvertError> {
    let copy = shape
        .clone_value(src)
        .ok_or(ConvertError::CannotClone { shape })?;
    shape
        .replace(dst, copy)
        .map_err(|_| ConvertError::ShapeMismatch { expected: shape })
}

/// Allocates the zero value of `shape`.
fn allocate(shape: &'static Shape) -> Result<Box<dyn Any>, ConvertError> {
    shape
        .default_value()
        .ok_or(ConvertError::CannotAllocate { shape })
}

/// A nested converter, resolved through the converter cache the first time it runs.
///
/// Building nested converters eagerly would never terminate for recursive types.
pub(crate) struct LazyConverter {
    src: &'static Shape,
    dst: &'static Shape,
    options: Arc<Options>,
    resolved: OnceLock<Converter>,
}

impl LazyConverter {
    pub(crate) fn new(src: &'static Shape, dst: &'static Shape, options: Arc<Options>) -> Self {
        LazyConverter {
            src,
            dst,
            options,
            resolved: OnceLock::new(),
        }
    }

    pub(crate) fn get(&self, cx: &Recaster) -> Result<&Converter, ConvertError> {
        if let Some(converter) = self.resolved.get() {
            return Ok(converter);
        }
        let converter = cx.converter(self.src, self.dst, &self.options)?;
        Ok(self.resolved.get_or_init(|| converter))
    }

    pub(crate) fn convert(
        &self,
        cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        params: &Params,
    ) -> Result<(), ConvertError> {
        self.get(cx)?.convert(cx, src, dst, params)
    }
}
