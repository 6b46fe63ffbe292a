use core::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Convert, Converter, LazyConverter};
use crate::{
    Binding, ConvertError, FieldDescriptor, Method, Options, Params, Peek, Recaster, Schema, Shape,
    trace,
};

pub(super) fn build(
    cx: &Recaster,
    src: &'static Shape,
    dst: &'static Shape,
    options: &Options,
) -> Result<Converter, ConvertError> {
    if src.struct_def().is_none() {
        return Err(ConvertError::SourceNotStruct { src, dst });
    }
    let dst_schema = cx.schema(dst, options)?;
    let src_schema = cx.schema(src, Options::empty())?;

    // several fields may share a nested scope, e.g. rules for `a.b` and `a.c`
    let mut scopes: HashMap<&str, Arc<Options>> = HashMap::new();
    let mut plans = Vec::new();
    for (index, field) in dst_schema.fields().iter().enumerate() {
        if field.hidden {
            break;
        }
        let source = match &field.binding {
            Binding::Func(method) => Source::Func(*method),
            Binding::Param(name) => Source::Param(name.clone()),
            Binding::Default => {
                let from = src_schema.source_for(dst, field)?;
                let scope = match scopes.get(field.alias.as_str()) {
                    Some(scope) => scope.clone(),
                    None => {
                        let scope = Arc::new(options.scoped(&field.alias)?);
                        scopes.insert(field.alias.as_str(), scope.clone());
                        scope
                    }
                };
                Source::Field {
                    from: from.clone(),
                    converter: LazyConverter::new(from.shape, field.shape, scope),
                }
            }
        };
        plans.push(FieldPlan { index, source });
    }

    trace!(%src, %dst, fields = plans.len(), "built record converter");
    Ok(Arc::new(RecordConverter {
        src,
        dst,
        schema: dst_schema,
        plans,
    }))
}

enum Source {
    Func(Method),
    Param(String),
    Field {
        from: FieldDescriptor,
        converter: LazyConverter,
    },
}

struct FieldPlan {
    /// index of the destination field in the schema
    index: usize,
    source: Source,
}

/// Fills the visible fields of a record one after the other; the first failure stops.
struct RecordConverter {
    src: &'static Shape,
    dst: &'static Shape,
    schema: Arc<Schema>,
    plans: Vec<FieldPlan>,
}

impl RecordConverter {
    fn convert_field(
        &self,
        cx: &Recaster,
        field: &FieldDescriptor,
        source: &Source,
        src: &dyn Any,
        dst: &mut dyn Any,
        params: &Params,
    ) -> Result<(), ConvertError> {
        let not_src = || ConvertError::ShapeMismatch { expected: self.src };
        let not_dst = || ConvertError::ShapeMismatch { expected: self.dst };

        match source {
            Source::Func(method) => {
                let owner = field.owner_mut(dst).ok_or_else(not_dst)?;
                let returned = (method.call)(owner, Peek::from_parts(src, self.src), params)
                    .map_err(|source| ConvertError::Custom {
                        method: method.name,
                        source,
                    })?;
                let Some(returned) = returned else {
                    return Ok(());
                };
                let slot = field.project_mut(dst).ok_or_else(not_dst)?;
                field
                    .shape
                    .replace(slot, returned.value)
                    .map_err(|_| ConvertError::CannotAssign {
                        src: returned.type_name.to_owned(),
                        dst: field.shape,
                    })
            }
            Source::Param(name) => {
                let Some(param) = params.get(name) else {
                    if field.ignore_empty {
                        return Ok(());
                    }
                    return Err(ConvertError::MissingParam {
                        record: self.dst,
                        field: field.name,
                        name: name.clone(),
                    });
                };
                if (*param.value()).type_id() != field.shape.id.get() {
                    return Err(ConvertError::CannotAssign {
                        src: param.type_name().to_owned(),
                        dst: field.shape,
                    });
                }
                let value = field
                    .shape
                    .clone_value(param.value())
                    .ok_or(ConvertError::CannotClone { shape: field.shape })?;
                let slot = field.project_mut(dst).ok_or_else(not_dst)?;
                field.shape.replace(slot, value).map_err(|_| not_dst())
            }
            Source::Field { from, converter } => {
                let value = from.project(src).ok_or_else(not_src)?;
                if field.ignore_empty && from.shape.is_zero(value) {
                    return Ok(());
                }
                let slot = field.project_mut(dst).ok_or_else(not_dst)?;
                converter.convert(cx, value, slot, params)
            }
        }
    }
}

impl Convert for RecordConverter {
    fn convert(
        &self,
        cx: &Recaster,
        src: &dyn Any,
        dst: &mut dyn Any,
        params: &Params,
    ) -> Result<(), ConvertError> {
        for plan in &self.plans {
            let field = &self.schema.fields()[plan.index];
            self.convert_field(cx, field, &plan.source, src, dst, params)?;
        }
        Ok(())
    }
}
