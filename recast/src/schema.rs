use core::any::Any;
use std::collections::HashMap;

use crate::{ConvertError, Field, Method, Options, RuleOp, Shape, trace};

/// How a field gets its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// From the source field with the same alias.
    Default,
    /// From the named external parameter.
    Param(String),
    /// From a conversion method.
    Func(Method),
}

/// One convertible field of a record.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// declared name
    pub name: &'static str,

    /// name used for matching; empty for hidden fields
    pub alias: String,

    /// declared type
    pub shape: &'static Shape,

    /// excluded from conversion
    pub hidden: bool,

    /// leave the destination untouched when the source is zero or the parameter is absent
    pub ignore_empty: bool,

    /// where the value comes from
    pub binding: Binding,

    /// fields to walk from the record to reach this one, through flattened records
    pub path: Vec<&'static Field>,
}

impl FieldDescriptor {
    /// Projects a record onto this field.
    pub fn project<'a>(&self, record: &'a dyn Any) -> Option<&'a dyn Any> {
        self.path
            .iter()
            .try_fold(record, |value, field| (field.get)(value))
    }

    /// Mutably projects a record onto this field.
    pub fn project_mut<'a>(&self, record: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.path
            .iter()
            .try_fold(record, |value, field| (field.get_mut)(value))
    }

    /// Mutably projects a record onto the record declaring this field, which is
    /// the record itself unless the field was promoted from a flattened one.
    pub fn owner_mut<'a>(&self, record: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let parents = self.path.len().saturating_sub(1);
        self.path[..parents]
            .iter()
            .try_fold(record, |value, field| (field.get_mut)(value))
    }
}

/// The convertible fields of a record under a given configuration.
///
/// Visible fields come first, hidden ones trail.
#[derive(Debug)]
pub struct Schema {
    shape: &'static Shape,
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Walks the fields of `shape` and applies the rules of `options` that target this level.
    pub fn extract(shape: &'static Shape, options: &Options) -> Result<Schema, ConvertError> {
        if shape.struct_def().is_none() {
            return Err(ConvertError::NotARecord { shape });
        }

        let mut fields = Vec::new();
        let mut level = vec![(shape, Vec::new())];
        while !level.is_empty() {
            let mut next = Vec::new();
            for (owner, prefix) in level {
                for field in owner.fields() {
                    let embedded = field.is_flattened() && field.shape().struct_def().is_some();
                    if !field.is_public() && !embedded {
                        continue;
                    }
                    let mut path: Vec<&'static Field> = Vec::with_capacity(prefix.len() + 1);
                    path.extend_from_slice(&prefix);
                    path.push(field);
                    if embedded {
                        next.push((field.shape(), path));
                    } else {
                        fields.push(describe(owner, field, path)?);
                    }
                }
            }
            level = next;
        }

        // stable: declaration order is kept within each group
        fields.sort_by_key(|f| f.hidden);

        let mut index = HashMap::with_capacity(fields.len());
        for (i, f) in fields.iter().enumerate() {
            if f.hidden {
                index.entry(f.name.to_owned()).or_insert(i);
            } else if index.insert(f.alias.clone(), i).is_some() {
                return Err(ConvertError::DuplicateField {
                    record: shape,
                    alias: f.alias.clone(),
                });
            }
        }

        let mut schema = Schema {
            shape,
            fields,
            index,
        };
        schema.apply_rules(options)?;
        Ok(schema)
    }

    fn apply_rules(&mut self, options: &Options) -> Result<(), ConvertError> {
        for group in options.effect().rule_groups() {
            for rule in group.rules() {
                let Some(&i) = self.index.get(rule.field()) else {
                    return Err(ConvertError::RuleFieldNotFound {
                        record: self.shape,
                        field: rule.field().to_owned(),
                    });
                };
                let field = &mut self.fields[i];
                for op in rule.ops() {
                    match op {
                        RuleOp::Func(Some(method)) => field.binding = Binding::Func(*method),
                        RuleOp::Func(None) => {
                            if matches!(field.binding, Binding::Func(_)) {
                                field.binding = Binding::Default;
                            }
                        }
                        RuleOp::IgnoreEmpty(ignore_empty) => field.ignore_empty = *ignore_empty,
                        RuleOp::Param(Some(name)) => field.binding = Binding::Param(name.clone()),
                        RuleOp::Param(None) => {
                            if matches!(field.binding, Binding::Param(_)) {
                                field.binding = Binding::Default;
                            }
                        }
                    }
                }
                trace!(record = %self.shape, field = rule.field(), "applied rule");
            }
        }
        Ok(())
    }

    /// The record this schema describes.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// All fields, visible first.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Fields taking part in conversion.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().take_while(|f| !f.hidden)
    }

    /// Looks a field up by alias; hidden fields answer to their declared name.
    pub fn get(&self, alias: &str) -> Option<&FieldDescriptor> {
        self.index.get(alias).map(|&i| &self.fields[i])
    }

    /// The visible field of this (source) schema that feeds `field` of the record `dst`.
    pub(crate) fn source_for(
        &self,
        dst: &'static Shape,
        field: &FieldDescriptor,
    ) -> Result<&FieldDescriptor, ConvertError> {
        match self.get(&field.alias) {
            None => Err(ConvertError::FieldNotFound {
                src: self.shape,
                dst,
                alias: field.alias.clone(),
            }),
            Some(from) if from.hidden => Err(ConvertError::SourceFieldHidden {
                src: self.shape,
                dst,
                alias: field.alias.clone(),
            }),
            Some(from) => Ok(from),
        }
    }
}

const FLAGS: &[&str] = &["ignoreEmpty"];

fn describe(
    owner: &'static Shape,
    field: &'static Field,
    path: Vec<&'static Field>,
) -> Result<FieldDescriptor, ConvertError> {
    let invalid = |reason| ConvertError::InvalidAnnotation {
        record: owner,
        field: field.name,
        annotation: field.annotation,
        reason,
    };

    let mut tokens = field.annotation.split(',').map(str::trim);
    let (alias, hidden) = match tokens.next().unwrap_or("") {
        "" => (field.name.to_owned(), false),
        "-" => (String::new(), true),
        alias => (alias.to_owned(), false),
    };
    let name_for_binding = if hidden { field.name } else { alias.as_str() };

    let rest: Vec<&str> = tokens.filter(|t| !t.is_empty()).collect();
    let mut binding = Binding::Default;
    let mut flags = rest.as_slice();
    if let [mode @ ("param" | "func"), tail @ ..] = rest.as_slice() {
        let arg = tail.first().copied().filter(|t| !FLAGS.contains(t));
        flags = &tail[usize::from(arg.is_some())..];
        binding = match *mode {
            "param" => Binding::Param(arg.unwrap_or(name_for_binding).to_owned()),
            _ => Binding::Func(resolve_method(owner, arg, name_for_binding)?),
        };
    }

    let mut ignore_empty = false;
    for flag in flags {
        match *flag {
            "ignoreEmpty" => ignore_empty = true,
            "param" | "func" => return Err(invalid("a field takes a single binding mode")),
            _ => return Err(invalid("unknown option")),
        }
    }

    Ok(FieldDescriptor {
        name: field.name,
        alias,
        shape: field.shape(),
        hidden,
        ignore_empty,
        binding,
        path,
    })
}

/// Tries the explicit method name first, then the alias.
fn resolve_method(
    owner: &'static Shape,
    explicit: Option<&str>,
    alias: &str,
) -> Result<Method, ConvertError> {
    let methods = owner.struct_def().map(|sd| sd.methods).unwrap_or(&[]);
    let find = |name: &str| methods.iter().find(|m| m.name == name).copied();
    let wanted = explicit.unwrap_or(alias);
    find(wanted)
        .or_else(|| if wanted != alias { find(alias) } else { None })
        .ok_or_else(|| ConvertError::MethodNotFound {
            record: owner,
            method: wanted.to_owned(),
        })
}
