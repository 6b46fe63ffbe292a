use core::fmt;

use crate::{Binding, ConvertError, Options, Recaster, Shape};

/// How a destination record would be filled from a source record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    /// destination record
    pub dst: &'static Shape,
    /// fingerprint of the options in effect at this level
    pub fingerprint: u64,
    /// every destination field, hidden ones last
    pub fields: Vec<FieldReport>,
}

/// One line of a [`SchemaReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// declared name
    pub name: &'static str,
    /// alias, when it differs from the declared name
    pub alias: Option<String>,
    /// excluded from conversion
    pub hidden: bool,
    /// skipped when the source is zero or the parameter absent
    pub ignore_empty: bool,
    /// bound parameter
    pub param: Option<String>,
    /// bound method
    pub method: Option<&'static str>,
    /// matched source field, as `Source.field`
    pub source: Option<String>,
    /// pairing of the nested records, when both sides are records
    pub nested: Option<SchemaReport>,
}

impl SchemaReport {
    pub(crate) fn build(
        cx: &Recaster,
        src: &'static Shape,
        dst: &'static Shape,
        options: &Options,
    ) -> Result<SchemaReport, ConvertError> {
        if src.struct_def().is_none() {
            return Err(ConvertError::SourceNotStruct { src, dst });
        }
        let dst_schema = cx.schema(dst, options)?;
        let src_schema = cx.schema(src, Options::empty())?;

        let mut fields = Vec::with_capacity(dst_schema.fields().len());
        for field in dst_schema.fields() {
            let mut report = FieldReport {
                name: field.name,
                alias: (!field.hidden && field.alias != field.name).then(|| field.alias.clone()),
                hidden: field.hidden,
                ignore_empty: field.ignore_empty,
                param: None,
                method: None,
                source: None,
                nested: None,
            };
            match &field.binding {
                Binding::Param(name) => report.param = Some(name.clone()),
                Binding::Func(method) => report.method = Some(method.name),
                Binding::Default if !field.hidden => {
                    let from = src_schema.source_for(dst, field)?;
                    report.source = Some(format!("{}.{}", src.type_identifier, from.name));
                    if from.shape.struct_def().is_some() && field.shape.struct_def().is_some() {
                        let scoped = options.scoped(&field.alias)?;
                        report.nested =
                            Some(SchemaReport::build(cx, from.shape, field.shape, &scoped)?);
                    }
                }
                Binding::Default => {}
            }
            fields.push(report);
        }

        Ok(SchemaReport {
            dst,
            fingerprint: options.fingerprint(),
            fields,
        })
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for field in &self.fields {
            write!(f, "{:indent$}{}", "", field.name, indent = depth * 2)?;
            if let Some(alias) = &field.alias {
                write!(f, " as {alias:?}")?;
            }
            if field.hidden {
                write!(f, " (hidden)")?;
            }
            if let Some(param) = &field.param {
                write!(f, " <- param {param:?}")?;
            }
            if let Some(method) = field.method {
                write!(f, " <- func {method}")?;
            }
            if let Some(source) = &field.source {
                write!(f, " <- {source}")?;
            }
            if field.ignore_empty {
                write!(f, " [ignoreEmpty]")?;
            }
            writeln!(f)?;
            if let Some(nested) = &field.nested {
                nested.write_indented(f, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (fingerprint {})", self.dst, self.fingerprint)?;
        self.write_indented(f, 1)
    }
}
