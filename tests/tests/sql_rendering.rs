use anyhow::Result;
use tagfilter::{compile, Dialect, Filter, SqlGenerationError, SqlQuery, Value};

use common::{MyModel, PersonFilter};

fn filter() -> PersonFilter {
    PersonFilter { alive: Some(true), ids: Some(vec![1, 2]), first_name_like: Some("ann".into()), ..Default::default() }
}

#[test]
fn test_select_in_both_dialects() -> Result<()> {
    let sqlite = compile::<MyModel, _, _>(&filter(), SqlQuery::with_fields(Dialect::Sqlite, vec!["id", "first_name"]).table_name("my_models"))?;
    let (statement, args) = sqlite.build()?;
    assert_eq!(
        statement,
        r#"SELECT "id", "first_name" FROM "my_models" WHERE my_models.alive = ? AND my_models.id IN (?, ?) AND my_models.first_name LIKE ?"#
    );
    assert_eq!(args, vec![Value::Bool(true), Value::Uint(1), Value::Uint(2), Value::String("%ann%".into())]);

    let postgres = compile::<MyModel, _, _>(&filter(), SqlQuery::with_fields(Dialect::Postgres, vec!["id"]).table_name("my_models"))?;
    let (statement, postgres_args) = postgres.build()?;
    assert_eq!(
        statement,
        r#"SELECT "id" FROM "my_models" WHERE my_models.alive = $1 AND my_models.id IN ($2, $3) AND my_models.first_name LIKE $4"#
    );
    assert_eq!(postgres_args, args);
    Ok(())
}

#[test]
fn test_count() -> Result<()> {
    let query = compile::<MyModel, _, _>(&filter(), SqlQuery::new(Dialect::Postgres).table_name("my_models"))?;
    let (statement, args) = query.build_count()?;
    assert_eq!(
        statement,
        r#"SELECT COUNT(*) FROM "my_models" WHERE my_models.alive = $1 AND my_models.id IN ($2, $3) AND my_models.first_name LIKE $4"#
    );
    assert_eq!(args.len(), 4);
    Ok(())
}

#[test]
fn test_select_requires_fields_and_table() -> Result<()> {
    let query = compile::<MyModel, _, _>(&filter(), SqlQuery::new(Dialect::Sqlite))?;
    assert_eq!(query.build().unwrap_err(), SqlGenerationError::IncompleteConfiguration);
    assert_eq!(query.build_count().unwrap_err(), SqlGenerationError::MissingTable);
    // The WHERE clause alone needs neither.
    assert!(query.build_where_clause().is_ok());
    Ok(())
}

#[derive(Filter, Default)]
struct EmailFilter {
    #[filter("field=email;operator=ILIKE")]
    email: Option<String>,
}

#[test]
fn test_ilike_in_both_dialects() -> Result<()> {
    let filter = EmailFilter { email: Some("Ann".into()) };

    let (statement, args) = compile::<MyModel, _, _>(&filter, SqlQuery::new(Dialect::Sqlite).table_name("my_models"))?.build_count()?;
    assert_eq!(statement, r#"SELECT COUNT(*) FROM "my_models" WHERE LOWER(my_models.email) LIKE LOWER(?)"#);
    assert_eq!(args, vec![Value::String("%Ann%".into())]);

    let (statement, args) = compile::<MyModel, _, _>(&filter, SqlQuery::new(Dialect::Postgres).table_name("my_models"))?.build_count()?;
    assert_eq!(statement, r#"SELECT COUNT(*) FROM "my_models" WHERE my_models.email ILIKE $1"#);
    assert_eq!(args, vec![Value::String("%Ann%".into())]);
    Ok(())
}
