use thiserror::Error;

use crate::operator::Operator;
use crate::value::ValueKind;

/// Errors raised while parsing a filter tag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("invalid tag value: {0}")]
    MalformedPair(String),
    #[error("invalid value key: {0}")]
    UnknownKey(String),
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    #[error("invalid field name: {0}")]
    InvalidFieldName(String),
    #[error("missing field name in tag")]
    MissingField,
    #[error("missing operator in tag")]
    MissingOperator,
}

/// A field value whose shape has no [`ValueKind`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
}

impl ExtractError {
    pub(crate) fn unsupported<T: ?Sized>() -> Self { ExtractError::UnsupportedType(std::any::type_name::<T>().to_owned()) }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("operator {operator} does not accept {kind} values")]
    UnsupportedKindForOperator { operator: Operator, kind: ValueKind },
}

/// Fatal error for a whole compilation. Field-level variants carry the record type and field name.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("{record}.{field}: {source}")]
    Tag {
        record: &'static str,
        field: &'static str,
        #[source]
        source: TagError,
    },
    #[error("{record}.{field}: {source}")]
    Extract {
        record: &'static str,
        field: &'static str,
        #[source]
        source: ExtractError,
    },
    #[error("{record}.{field}: no handler for operator {operator}")]
    NoHandlerForOperator { record: &'static str, field: &'static str, operator: Operator },
    #[error("{record}.{field}: invalid field type for operator {operator}")]
    InvalidFieldTypeForOperator {
        record: &'static str,
        field: &'static str,
        operator: Operator,
        #[source]
        source: HandlerError,
    },
}

impl CompileError {
    /// Name of the filter field that caused the error.
    pub fn field(&self) -> &'static str {
        match self {
            CompileError::Tag { field, .. }
            | CompileError::Extract { field, .. }
            | CompileError::NoHandlerForOperator { field, .. }
            | CompileError::InvalidFieldTypeForOperator { field, .. } => *field,
        }
    }
}

/// Errors surfaced when rendering a [`crate::SqlQuery`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SqlGenerationError {
    #[error("Placeholder count mismatch in `{condition}`: expected {expected}, found {found}")]
    PlaceholderCountMismatch { condition: String, expected: usize, found: usize },
    #[error("SqlQuery requires both fields and table_name to be set for complete SELECT generation")]
    IncompleteConfiguration,
    #[error("SqlQuery requires table_name to be set for COUNT generation")]
    MissingTable,
}
