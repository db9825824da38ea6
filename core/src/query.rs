use crate::value::Value;

/// The query-building capability predicates are emitted through.
///
/// Conditions are SQL fragments using `?` as the parameter marker. Every call returns the builder so
/// calls compose left to right; the conditions of successive calls combine with AND.
///
/// Every `?` in a condition is a marker, including one inside a string literal or identifier. Tag field
/// names are checked for it; conditions written by hand must bind such text as a parameter instead.
pub trait QueryBuilder: Sized {
    /// Adds a condition bound to a single parameter.
    fn where_param(self, condition: &str, param: Value) -> Self;

    /// Adds a condition whose single `?` is bound to an ordered list of parameters, as used by `IN`.
    fn where_params(self, condition: &str, params: Vec<Value>) -> Self;

    /// Adds a condition without parameters.
    fn where_sql(self, condition: &str) -> Self;
}

/// Custom predicates for conditions tags cannot express, such as OR groups or subqueries.
///
/// Runs once per compilation, after every tag derived predicate.
pub trait ApplyQuery<Q: QueryBuilder> {
    fn apply_query(&self, query: Q) -> Q;
}

/// Names the table whose columns a filter's predicates are qualified with.
pub trait Table {
    fn table_name() -> &'static str;
}
