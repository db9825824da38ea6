//! Filter tag parsing.
//!
//! A tag is a list of `key=value` pairs separated by `;`, e.g. `field=created_at; operator=GE`.
//! Whitespace around tokens is ignored; a whitespace-only token is malformed.

use crate::error::TagError;
use crate::operator::Operator;

pub const PAIR_SEPARATOR: char = ';';
pub const KEY_VALUE_SEPARATOR: char = '=';

pub const KEY_FIELD: &str = "field";
pub const KEY_OPERATOR: &str = "operator";

/// Parameter marker of query conditions; never valid inside a field name.
const PLACEHOLDER: char = '?';

/// The target attribute and operator declared by a filter tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub field: String,
    pub operator: Operator,
}

/// Splits on `separator`, drops the empty pieces and trims the rest.
///
/// Only pieces empty before trimming are dropped, so a whitespace-only pair is still malformed.
fn split_trim(value: &str, separator: char) -> impl Iterator<Item = &str> {
    value.split(separator).filter(|s| !s.is_empty()).map(str::trim)
}

pub fn parse(tag: &str) -> Result<Tag, TagError> {
    let mut field: Option<String> = None;
    let mut operator: Option<Operator> = None;

    for pair in split_trim(tag, PAIR_SEPARATOR) {
        let kv: Vec<&str> = split_trim(pair, KEY_VALUE_SEPARATOR).collect();
        let [key, value] = kv.as_slice() else {
            return Err(TagError::MalformedPair(pair.to_owned()));
        };

        match *key {
            KEY_FIELD if value.contains(PLACEHOLDER) => return Err(TagError::InvalidFieldName((*value).to_owned())),
            KEY_FIELD => field = Some((*value).to_owned()),
            KEY_OPERATOR => operator = Some(value.parse().map_err(|_| TagError::UnknownOperator((*value).to_owned()))?),
            other => return Err(TagError::UnknownKey(other.to_owned())),
        }
    }

    let field = field.filter(|f| !f.is_empty()).ok_or(TagError::MissingField)?;
    let operator = operator.ok_or(TagError::MissingOperator)?;
    Ok(Tag { field, operator })
}
