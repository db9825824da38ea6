use anyhow::Result;
use std::cell::Cell;
use tagfilter::{compile, ApplyQuery, Dialect, Filter, QueryBuilder, SqlQuery, Value};

use common::MyModel;

#[derive(Filter, Default)]
#[filter(apply_query)]
struct ActiveAccountFilter {
    #[filter("field=email;operator=ILIKE")]
    email: Option<String>,
    include_deleted: bool,
    with_role: Option<String>,
}

impl<Q: QueryBuilder> ApplyQuery<Q> for ActiveAccountFilter {
    fn apply_query(&self, mut query: Q) -> Q {
        if !self.include_deleted {
            query = query.where_sql("(my_models.deleted_at IS NULL OR my_models.restored_at IS NOT NULL)");
        }
        if let Some(role) = &self.with_role {
            query = query.where_param("my_models.id IN (SELECT account_id FROM roles WHERE name = ?)", Value::String(role.clone()));
        }
        query
    }
}

#[test]
fn test_custom_predicate_runs_after_tagged_fields() -> Result<()> {
    let filter = ActiveAccountFilter { email: Some("@example.com".into()), with_role: Some("admin".into()), ..Default::default() };
    let (clause, args) = compile::<MyModel, _, _>(&filter, SqlQuery::new(Dialect::Postgres))?.build_where_clause()?;
    assert_eq!(
        clause,
        "my_models.email ILIKE $1 AND (my_models.deleted_at IS NULL OR my_models.restored_at IS NOT NULL) AND my_models.id IN (SELECT account_id FROM roles WHERE name = $2)"
    );
    assert_eq!(args, vec![Value::String("%@example.com%".into()), Value::String("admin".into())]);
    Ok(())
}

#[test]
fn test_custom_predicate_runs_without_active_fields() -> Result<()> {
    let filter = ActiveAccountFilter { include_deleted: true, ..Default::default() };
    let query = compile::<MyModel, _, _>(&filter, SqlQuery::default())?;
    assert_eq!(query.condition_count(), 0);

    let query = compile::<MyModel, _, _>(&ActiveAccountFilter::default(), SqlQuery::default())?;
    assert_eq!(query.condition_count(), 1);
    Ok(())
}

#[derive(Filter)]
#[filter(apply_query)]
struct CountingFilter<'a> {
    #[filter("field=cnt;operator=LE")]
    cnt_le: Option<i32>,
    calls: &'a Cell<usize>,
}

impl<Q: QueryBuilder> ApplyQuery<Q> for CountingFilter<'_> {
    fn apply_query(&self, query: Q) -> Q {
        self.calls.set(self.calls.get() + 1);
        query
    }
}

#[test]
fn test_custom_predicate_runs_exactly_once() -> Result<()> {
    let calls = Cell::new(0);
    compile::<MyModel, _, _>(&CountingFilter { cnt_le: Some(5), calls: &calls }, SqlQuery::default())?;
    assert_eq!(calls.get(), 1);
    Ok(())
}

#[derive(Filter)]
#[filter(apply_query)]
struct BrokenFilter<'a> {
    #[filter("field=name;operator=LIKE")]
    name: Option<i64>,
    calls: &'a Cell<usize>,
}

impl<Q: QueryBuilder> ApplyQuery<Q> for BrokenFilter<'_> {
    fn apply_query(&self, query: Q) -> Q {
        self.calls.set(self.calls.get() + 1);
        query
    }
}

#[test]
fn test_custom_predicate_skipped_on_compile_error() {
    let calls = Cell::new(0);
    let err = compile::<MyModel, _, _>(&BrokenFilter { name: Some(1), calls: &calls }, SqlQuery::default()).unwrap_err();
    assert_eq!(err.to_string(), "BrokenFilter.name: invalid field type for operator LIKE");
    assert_eq!(calls.get(), 0);
}
