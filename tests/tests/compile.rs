use anyhow::Result;
use chrono::{TimeZone, Utc};
use tagfilter::{compile, compile_qualified, Dialect, FilterSpec, SqlQuery, Value};

use common::{uuid, MyModel, MyModelFilter, PersonFilter};

#[test]
fn test_id_and_count() -> Result<()> {
    let id = uuid(0x67e5504410b1426f9247bb680e5fe0c8);
    let filter = MyModelFilter { id: Some(id), cnt_gt: Some(10), ..Default::default() };

    let query = compile::<MyModel, _, _>(&filter, SqlQuery::default())?;
    let (clause, args) = query.build_where_clause()?;
    assert_eq!(clause, "my_models.id = ? AND my_models.cnt > ?");
    assert_eq!(args, vec![Value::String("67e55044-10b1-426f-9247-bb680e5fe0c8".into()), Value::Uint(10)]);
    Ok(())
}

#[test]
fn test_in_preserves_order() -> Result<()> {
    let (a, b, c) = (uuid(3), uuid(1), uuid(2));
    let filter = MyModelFilter { ids: Some(vec![a, b, c]), ..Default::default() };

    let query = compile::<MyModel, _, _>(&filter, SqlQuery::new(Dialect::Postgres))?;
    assert_eq!(query.condition_count(), 1);
    let (clause, args) = query.build_where_clause()?;
    assert_eq!(clause, "my_models.id IN ($1, $2, $3)");
    assert_eq!(args, vec![Value::String(a.to_string()), Value::String(b.to_string()), Value::String(c.to_string())]);
    Ok(())
}

#[test]
fn test_every_operator_in_declaration_order() -> Result<()> {
    let created = Utc.with_ymd_and_hms(2024, 5, 26, 16, 8, 0).unwrap();
    let filter = PersonFilter {
        alive: Some(true),
        id: Some(123456),
        ids: Some(vec![111, 222, 333, 444, 555]),
        ids_not: Some(vec![666, 777]),
        first_name: Some("Mirko".into()),
        not_first_name: Some("Pero".into()),
        first_name_like: Some("irko".into()),
        created_at_ge: Some(created),
        created_at_gt: Some(created),
        created_at_le: Some(created),
        created_at_lt: Some(created),
        page: Some(2),
    };

    let query = compile_qualified("people", &filter, SqlQuery::default())?;
    let (clause, args) = query.build_where_clause()?;
    assert_eq!(
        clause,
        [
            "people.alive = ?",
            "people.id = ?",
            "people.id IN (?, ?, ?, ?, ?)",
            "people.id NOT IN (?, ?)",
            "people.first_name = ?",
            "people.first_name <> ?",
            "people.first_name LIKE ?",
            "people.created_at >= ?",
            "people.created_at > ?",
            "people.created_at <= ?",
            "people.created_at < ?",
        ]
        .join(" AND ")
    );

    let stamp = Value::String("2024-05-26T16:08:00Z".into());
    assert_eq!(args[0], Value::Bool(true));
    assert_eq!(args[1], Value::Int(123456));
    assert_eq!(args[2..7], [Value::Uint(111), Value::Uint(222), Value::Uint(333), Value::Uint(444), Value::Uint(555)]);
    assert_eq!(args[7..9], [Value::Uint(666), Value::Uint(777)]);
    assert_eq!(args[9..12], [Value::String("Mirko".into()), Value::String("Pero".into()), Value::String("%irko%".into())]);
    assert_eq!(args[12..], [stamp.clone(), stamp.clone(), stamp.clone(), stamp]);
    Ok(())
}

#[test]
fn test_empty_filter() -> Result<()> {
    let query = compile::<MyModel, _, _>(&PersonFilter::default(), SqlQuery::with_fields(Dialect::Sqlite, vec!["id"]).table_name("my_models"))?;
    assert_eq!(query.condition_count(), 0);
    assert_eq!(query.build()?.0, r#"SELECT "id" FROM "my_models" WHERE 1=1"#);
    Ok(())
}

#[test]
fn test_untagged_fields_are_listed_but_ignored() -> Result<()> {
    let filter = PersonFilter { page: Some(3), ..Default::default() };
    let names: Vec<_> = filter.fields().iter().map(|f| (f.name, f.tag.is_some(), f.value.is_some())).collect();
    assert_eq!(names.len(), 12);
    assert_eq!(names[11], ("page", false, false));
    assert_eq!(names[0], ("alive", true, false));

    let query = compile::<MyModel, _, _>(&filter, SqlQuery::default())?;
    assert_eq!(query.condition_count(), 0);
    Ok(())
}

#[test]
fn test_empty_in_list_matches_nothing() -> Result<()> {
    let filter = MyModelFilter { ids: Some(vec![]), ..Default::default() };
    let (clause, args) = compile::<MyModel, _, _>(&filter, SqlQuery::default())?.build_where_clause()?;
    assert_eq!(clause, "my_models.id IN (NULL)");
    assert!(args.is_empty());
    Ok(())
}

#[test]
fn test_compiling_twice_is_deterministic() -> Result<()> {
    let filter = MyModelFilter { id: Some(uuid(7)), cnt_gt: Some(1), ..Default::default() };
    let first = compile::<MyModel, _, _>(&filter, SqlQuery::default())?.build_where_clause()?;
    let second = compile::<MyModel, _, _>(&filter, SqlQuery::default())?.build_where_clause()?;
    assert_eq!(first, second);
    Ok(())
}
