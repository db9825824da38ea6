//! One predicate handler per [`Operator`].
//!
//! Each handler matches on the populated [`FieldValue`] slot and either emits a condition qualified with
//! the table name or rejects the value kind.

use crate::error::HandlerError;
use crate::field::FilterField;
use crate::operator::Operator;
use crate::query::QueryBuilder;
use crate::value::{FieldValue, Value};

pub type Handler<Q> = fn(Q, &str, &FilterField) -> Result<Q, HandlerError>;

/// The operator to handler lookup table. Covers every operator.
pub fn handlers<Q: QueryBuilder>() -> [(Operator, Handler<Q>); 10] {
    [
        (Operator::Eq, handle_eq as Handler<Q>),
        (Operator::Ne, handle_ne as Handler<Q>),
        (Operator::Gt, handle_gt as Handler<Q>),
        (Operator::Ge, handle_ge as Handler<Q>),
        (Operator::Lt, handle_lt as Handler<Q>),
        (Operator::Le, handle_le as Handler<Q>),
        (Operator::Like, handle_like as Handler<Q>),
        (Operator::Ilike, handle_ilike as Handler<Q>),
        (Operator::In, handle_in as Handler<Q>),
        (Operator::NotIn, handle_not_in as Handler<Q>),
    ]
}

pub fn handler_for<Q: QueryBuilder>(operator: Operator) -> Option<Handler<Q>> {
    handlers::<Q>().into_iter().find(|(op, _)| *op == operator).map(|(_, handler)| handler)
}

fn unsupported(field: &FilterField) -> HandlerError { HandlerError::UnsupportedKindForOperator { operator: field.operator, kind: field.kind() } }

fn column(qualifier: &str, field: &FilterField) -> String { format!("{}.{}", qualifier, field.name) }

fn apply_scalar<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField, op: &str, value: Value) -> Q {
    query.where_param(&format!("{} {} ?", column(qualifier, field), op), value)
}

fn apply_equality<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField, op: &str) -> Result<Q, HandlerError> {
    let value = field.value.scalar().ok_or_else(|| unsupported(field))?;
    Ok(apply_scalar(query, qualifier, field, op, value))
}

fn apply_ordering<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField, op: &str) -> Result<Q, HandlerError> {
    match field.value.scalar() {
        Some(Value::Bool(_)) | None => Err(unsupported(field)),
        Some(value) => Ok(apply_scalar(query, qualifier, field, op, value)),
    }
}

fn apply_pattern<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField, op: &str) -> Result<Q, HandlerError> {
    match &field.value {
        FieldValue::String(s) => Ok(apply_scalar(query, qualifier, field, op, Value::String(format!("%{}%", s)))),
        _ => Err(unsupported(field)),
    }
}

fn apply_membership<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField, op: &str) -> Result<Q, HandlerError> {
    let values = field.value.list().ok_or_else(|| unsupported(field))?;
    // Empty lists are passed on as-is; their meaning is up to the query builder.
    Ok(query.where_params(&format!("{} {} (?)", column(qualifier, field), op), values))
}

pub fn handle_eq<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_equality(query, qualifier, field, "=")
}

pub fn handle_ne<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_equality(query, qualifier, field, "<>")
}

pub fn handle_gt<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_ordering(query, qualifier, field, ">")
}

pub fn handle_ge<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_ordering(query, qualifier, field, ">=")
}

pub fn handle_lt<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_ordering(query, qualifier, field, "<")
}

pub fn handle_le<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_ordering(query, qualifier, field, "<=")
}

/// Case-sensitive substring match.
pub fn handle_like<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_pattern(query, qualifier, field, "LIKE")
}

/// Case-insensitive substring match.
pub fn handle_ilike<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_pattern(query, qualifier, field, "ILIKE")
}

pub fn handle_in<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_membership(query, qualifier, field, "IN")
}

pub fn handle_not_in<Q: QueryBuilder>(query: Q, qualifier: &str, field: &FilterField) -> Result<Q, HandlerError> {
    apply_membership(query, qualifier, field, "NOT IN")
}
