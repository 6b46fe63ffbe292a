use crate::cache::{ConverterCache, ConverterKey, SchemaCache, SchemaKey};
use crate::dispatch::dispatch;
use crate::{
    ConvertError, Converter, Options, Params, Peek, Poke, Recast, Schema, SchemaReport, Shape,
    debug, trace,
};
use std::sync::Arc;

/// Converts values between types, caching what it learns about them.
///
/// A `Recaster` is cheap to share: wrap it in an `Arc` or use [`Recaster::global`].
#[derive(Default)]
pub struct Recaster {
    schemas: SchemaCache,
    converters: ConverterCache,
}

impl Recaster {
    /// A recaster with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide recaster.
    pub fn global() -> &'static Recaster {
        static GLOBAL: std::sync::LazyLock<Recaster> = std::sync::LazyLock::new(Recaster::new);
        &GLOBAL
    }

    /// Converts `src` into `dst`.
    ///
    /// `None` options means shallow copies and no rules. On error `dst` may be
    /// partially written.
    pub fn convert<S: Recast, D: Recast>(
        &self,
        src: &S,
        dst: &mut D,
        options: Option<&Options>,
        params: &Params,
    ) -> Result<(), ConvertError> {
        self.convert_value(Peek::new(src), Poke::new(dst), options, params)
    }

    /// Converts through type-erased handles.
    ///
    /// Fails with [`ConvertError::DestinationNotAddressable`] if `dst` cannot be written.
    pub fn convert_value(
        &self,
        src: Peek<'_>,
        dst: Poke<'_>,
        options: Option<&Options>,
        params: &Params,
    ) -> Result<(), ConvertError> {
        let dst_shape = dst.shape();
        let Some(dst_value) = dst.into_inner() else {
            return Err(ConvertError::DestinationNotAddressable { shape: dst_shape });
        };
        let options = options.unwrap_or(Options::empty());
        let converter = self.converter(src.shape(), dst_shape, options)?;
        trace!(src = %src.shape(), dst = %dst_shape, "converting");
        converter.convert(self, src.value(), dst_value, params)
    }

    /// The converter for `src` into `dst` under `options`, built on first use.
    pub fn converter(
        &self,
        src: &'static Shape,
        dst: &'static Shape,
        options: &Options,
    ) -> Result<Converter, ConvertError> {
        let key = ConverterKey::new(src, dst, options.fingerprint());
        self.converters.get_or_build(key, || {
            debug!(%src, %dst, fingerprint = key.fingerprint, "building converter");
            dispatch(self, src, dst, options)
        })
    }

    /// The schema of the record `shape` under `options`, extracted on first use.
    pub fn schema(
        &self,
        shape: &'static Shape,
        options: &Options,
    ) -> Result<Arc<Schema>, ConvertError> {
        let key = SchemaKey::new(shape, options.fingerprint());
        self.schemas.get_or_build(key, || {
            debug!(%shape, fingerprint = key.fingerprint, "extracting schema");
            Schema::extract(shape, options)
        })
    }

    /// Describes how `S` would be converted into `D` under `options`.
    pub fn report<S: Recast, D: Recast>(
        &self,
        options: Option<&Options>,
    ) -> Result<SchemaReport, ConvertError> {
        SchemaReport::build(self, S::SHAPE, D::SHAPE, options.unwrap_or(Options::empty()))
    }

    /// Number of cached schemas.
    pub fn cached_schemas(&self) -> usize {
        self.schemas.len()
    }

    /// Number of cached converters.
    pub fn cached_converters(&self) -> usize {
        self.converters.len()
    }

    /// Empties both caches.
    pub fn clear(&self) {
        self.schemas.clear();
        self.converters.clear();
    }
}

/// Converts `src` into `dst` with the process-wide [`Recaster`].
pub fn convert<S: Recast, D: Recast>(
    src: &S,
    dst: &mut D,
    options: Option<&Options>,
    params: &Params,
) -> Result<(), ConvertError> {
    Recaster::global().convert(src, dst, options, params)
}
