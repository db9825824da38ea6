use tracing::{debug, trace};

use crate::error::CompileError;
use crate::field::PendingField;
use crate::handlers::handler_for;
use crate::query::{ApplyQuery, QueryBuilder, Table};
use crate::value::FilterValue;

/// One field of a filter specification, in declaration order.
#[derive(Clone, Copy)]
pub struct FieldDescriptor<'a> {
    /// Name of the struct field, used in error messages.
    pub name: &'static str,
    /// The filter tag; untagged fields are never compiled.
    pub tag: Option<&'static str>,
    /// The current value; `None` marks an inactive field.
    pub value: Option<&'a dyn FilterValue>,
}

impl<'a> FieldDescriptor<'a> {
    pub fn tagged(name: &'static str, tag: &'static str, value: Option<&'a dyn FilterValue>) -> Self { Self { name, tag: Some(tag), value } }

    pub fn untagged(name: &'static str) -> Self { Self { name, tag: None, value: None } }
}

impl std::fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor").field("name", &self.name).field("tag", &self.tag).field("active", &self.value.is_some()).finish()
    }
}

/// A record describing which attributes to filter on and how.
///
/// Usually derived with `#[derive(Filter)]`; a hand-written impl is a descriptor table listing every field.
pub trait FilterSpec {
    /// Record type name used in error messages.
    const NAME: &'static str;

    fn fields(&self) -> Vec<FieldDescriptor<'_>>;

    /// The custom predicate to run after all tag derived predicates, if this filter has one.
    fn query_applier<Q: QueryBuilder>(&self) -> Option<&dyn ApplyQuery<Q>> { None }
}

/// Applies every active tagged field of `filter` to `query`, qualified with `T`'s table name.
pub fn compile<T, F, Q>(filter: &F, query: Q) -> Result<Q, CompileError>
where
    T: Table,
    F: FilterSpec,
    Q: QueryBuilder,
{
    compile_qualified(T::table_name(), filter, query)
}

/// Applies every active tagged field of `filter` to `query`, qualifying column names with `qualifier`.
///
/// The query is only handed back once every field compiled; on error it is dropped.
pub fn compile_qualified<F, Q>(qualifier: &str, filter: &F, mut query: Q) -> Result<Q, CompileError>
where
    F: FilterSpec,
    Q: QueryBuilder,
{
    debug!(record = F::NAME, qualifier, "compiling filter");
    let mut applied = 0usize;

    for descriptor in filter.fields() {
        let (Some(tag), Some(value)) = (descriptor.tag, descriptor.value) else {
            trace!(field = descriptor.name, tagged = descriptor.tag.is_some(), "skipping field");
            continue;
        };

        let pending = PendingField::parse(tag).map_err(|source| CompileError::Tag { record: F::NAME, field: descriptor.name, source })?;
        let field = pending.extract(value).map_err(|source| CompileError::Extract { record: F::NAME, field: descriptor.name, source })?;

        let handler = handler_for::<Q>(field.operator).ok_or(CompileError::NoHandlerForOperator {
            record: F::NAME,
            field: descriptor.name,
            operator: field.operator,
        })?;
        query = handler(query, qualifier, &field).map_err(|source| CompileError::InvalidFieldTypeForOperator {
            record: F::NAME,
            field: descriptor.name,
            operator: field.operator,
            source,
        })?;

        trace!(field = descriptor.name, column = %field.name, operator = %field.operator, kind = %field.kind(), "applied predicate");
        applied += 1;
    }

    if let Some(applier) = filter.query_applier::<Q>() {
        debug!(record = F::NAME, "applying custom predicate");
        query = applier.apply_query(query);
    }

    debug!(record = F::NAME, applied, "compiled filter");
    Ok(query)
}
