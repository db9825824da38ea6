use crate::error::{ExtractError, TagError};
use crate::operator::Operator;
use crate::tag;
use crate::value::{FieldValue, FilterValue, ValueKind};

/// A tagged filter field after parsing and extraction, ready for dispatch to an operator handler.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    pub name: String,
    pub operator: Operator,
    pub value: FieldValue,
}

impl FilterField {
    pub fn new(name: impl Into<String>, operator: Operator, value: FieldValue) -> Self { Self { name: name.into(), operator, value } }

    pub fn kind(&self) -> ValueKind { self.value.kind() }
}

/// Parsed tag of a field whose value has not been extracted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingField {
    name: String,
    operator: Operator,
}

impl PendingField {
    pub(crate) fn parse(tag: &str) -> Result<Self, TagError> {
        let tag::Tag { field, operator } = tag::parse(tag)?;
        Ok(Self { name: field, operator })
    }

    pub(crate) fn extract(self, value: &dyn FilterValue) -> Result<FilterField, ExtractError> {
        Ok(FilterField { name: self.name, operator: self.operator, value: value.extract()? })
    }
}
