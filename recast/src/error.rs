use crate::{BoxError, Shape};

/// Errors that can occur while building or running a conversion.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConvertError {
    /// The destination handle cannot be written to.
    DestinationNotAddressable {
        /// shape of the destination
        shape: &'static Shape,
    },

    /// A value did not have the shape it was handed over with.
    ShapeMismatch {
        /// the shape the value was supposed to have
        expected: &'static Shape,
    },

    /// Two visible fields of a record share an alias.
    DuplicateField {
        /// the record
        record: &'static Shape,
        /// the shared alias
        alias: String,
    },

    /// A rule names a field the record does not have.
    RuleFieldNotFound {
        /// the record
        record: &'static Shape,
        /// the field named by the rule
        field: String,
    },

    /// A `func` binding names a method the declaring record does not register.
    MethodNotFound {
        /// the record declaring the field
        record: &'static Shape,
        /// the method name that was tried first
        method: String,
    },

    /// A rule group path is not under the scope it was narrowed to.
    InvalidRulePath {
        /// the rule group path
        path: String,
        /// the scope
        prefix: String,
    },

    /// A field annotation could not be parsed.
    InvalidAnnotation {
        /// the record declaring the field
        record: &'static Shape,
        /// the field
        field: &'static str,
        /// the annotation
        annotation: &'static str,
        /// what is wrong with it
        reason: &'static str,
    },

    /// A record schema was requested for something that is not a record.
    NotARecord {
        /// the shape
        shape: &'static Shape,
    },

    /// The destination is a record but the source is not.
    SourceNotStruct {
        /// source shape
        src: &'static Shape,
        /// destination shape
        dst: &'static Shape,
    },

    /// The destination is a map but the source is not.
    SourceNotMap {
        /// source shape
        src: &'static Shape,
        /// destination shape
        dst: &'static Shape,
    },

    /// The destination is a sequence but the source is neither a list nor an array.
    SourceNotSequence {
        /// source shape
        src: &'static Shape,
        /// destination shape
        dst: &'static Shape,
    },

    /// Source and destination maps have different key types.
    MapKeyMismatch {
        /// source key shape
        src_key: &'static Shape,
        /// destination key shape
        dst_key: &'static Shape,
    },

    /// The destination type category cannot be converted into.
    Unsupported {
        /// source shape
        src: &'static Shape,
        /// destination shape
        dst: &'static Shape,
    },

    /// A destination field has no source field with the same alias.
    FieldNotFound {
        /// source record
        src: &'static Shape,
        /// destination record
        dst: &'static Shape,
        /// the alias that was looked up
        alias: String,
    },

    /// A destination field matches a hidden source field.
    SourceFieldHidden {
        /// source record
        src: &'static Shape,
        /// destination record
        dst: &'static Shape,
        /// the alias that was looked up
        alias: String,
    },

    /// The source holds `None` where a value was required.
    NilSource {
        /// shape of the source
        shape: &'static Shape,
    },

    /// The source value's type is not the destination's type.
    CannotAssign {
        /// name of the source type
        src: String,
        /// destination shape
        dst: &'static Shape,
    },

    /// A parameter-bound field's parameter is absent.
    MissingParam {
        /// the record
        record: &'static Shape,
        /// the field
        field: &'static str,
        /// the parameter name
        name: String,
    },

    /// A type without a zero value had to be allocated.
    CannotAllocate {
        /// the shape
        shape: &'static Shape,
    },

    /// A value that cannot be copied had to be copied.
    CannotClone {
        /// the shape
        shape: &'static Shape,
    },

    /// A conversion method failed.
    Custom {
        /// the method
        method: &'static str,
        /// its error
        source: BoxError,
    },
}

/// Broad classes of [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Misconfigured annotations, rules or handles.
    Configuration,
    /// Source and destination types do not fit together.
    Structural,
    /// The data being converted is unsuitable. May succeed with other input.
    Value,
}

impl ConvertError {
    /// Which class of failure this is.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::DestinationNotAddressable { .. }
            | ConvertError::ShapeMismatch { .. }
            | ConvertError::DuplicateField { .. }
            | ConvertError::RuleFieldNotFound { .. }
            | ConvertError::MethodNotFound { .. }
            | ConvertError::InvalidRulePath { .. }
            | ConvertError::InvalidAnnotation { .. } => ErrorCategory::Configuration,
            ConvertError::NotARecord { .. }
            | ConvertError::SourceNotStruct { .. }
            | ConvertError::SourceNotMap { .. }
            | ConvertError::SourceNotSequence { .. }
            | ConvertError::MapKeyMismatch { .. }
            | ConvertError::Unsupported { .. }
            | ConvertError::FieldNotFound { .. }
            | ConvertError::SourceFieldHidden { .. }
            | ConvertError::CannotAllocate { .. }
            | ConvertError::CannotClone { .. } => ErrorCategory::Structural,
            ConvertError::NilSource { .. }
            | ConvertError::CannotAssign { .. }
            | ConvertError::MissingParam { .. }
            | ConvertError::Custom { .. } => ErrorCategory::Value,
        }
    }

    /// Whether the same call could succeed with different input data.
    ///
    /// Configuration and structural failures recur identically for the same types and options.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Value
    }

    pub(crate) fn cannot_assign(src: &'static Shape, dst: &'static Shape) -> Self {
        ConvertError::CannotAssign {
            src: src.to_string(),
            dst,
        }
    }
}

impl core::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConvertError::DestinationNotAddressable { shape } => {
                write!(f, "dst value of {shape} is not addressable")
            }
            ConvertError::ShapeMismatch { expected } => {
                write!(f, "value does not have the shape {expected}")
            }
            ConvertError::DuplicateField { record, alias } => {
                write!(f, "duplicate field {alias} in {record}")
            }
            ConvertError::RuleFieldNotFound { record, field } => {
                write!(f, "rule targets field {field}, which {record} does not have")
            }
            ConvertError::MethodNotFound { record, method } => {
                write!(f, "cannot find method {method} on {record}")
            }
            ConvertError::InvalidRulePath { path, prefix } => {
                write!(f, "rule path {path:?} is not under {prefix:?}")
            }
            ConvertError::InvalidAnnotation {
                record,
                field,
                annotation,
                reason,
            } => write!(
                f,
                "invalid annotation {annotation:?} on {record}.{field}: {reason}"
            ),
            ConvertError::NotARecord { shape } => write!(f, "{shape} is not a record"),
            ConvertError::SourceNotStruct { src, dst } => {
                write!(f, "dst {dst} is a struct while src {src} is not")
            }
            ConvertError::SourceNotMap { src, dst } => {
                write!(f, "dst {dst} is a map while src {src} is not")
            }
            ConvertError::SourceNotSequence { src, dst } => {
                write!(f, "dst {dst} is a sequence while src {src} is neither a list nor an array")
            }
            ConvertError::MapKeyMismatch { src_key, dst_key } => {
                write!(f, "different map key type: {src_key} in src, {dst_key} in dst")
            }
            ConvertError::Unsupported { dst, .. } => {
                write!(f, "unexpected type {dst} is not supported")
            }
            ConvertError::FieldNotFound { src, dst, alias } => {
                write!(f, "field {alias} of {dst} does not exist in {src}")
            }
            ConvertError::SourceFieldHidden { src, dst, alias } => {
                write!(f, "field {alias} of {dst} is hidden in {src}")
            }
            ConvertError::NilSource { shape } => write!(f, "value of {shape} in src is nil"),
            ConvertError::CannotAssign { src, dst } => {
                write!(f, "cannot assign {src} in src to {dst} in dst")
            }
            ConvertError::MissingParam {
                record,
                field,
                name,
            } => write!(f, "parameter {name} for {record}.{field} is missing"),
            ConvertError::CannotAllocate { shape } => {
                write!(f, "cannot allocate a zero value of {shape}")
            }
            ConvertError::CannotClone { shape } => write!(f, "cannot copy a value of {shape}"),
            ConvertError::Custom { method, source } => write!(f, "method {method} failed: {source}"),
        }
    }
}

impl core::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ConvertError::Custom { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
