//! Reference [`QueryBuilder`] rendering parameterised SQL.

use std::borrow::Cow;

use crate::error::SqlGenerationError;
use crate::query::QueryBuilder;
use crate::value::Value;

/// Placeholder and literal style of the rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `?` placeholders.
    #[default]
    Sqlite,
    /// `$1`, `$2`, ... placeholders.
    Postgres,
}

impl Dialect {
    fn always_true(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "1=1",
            Dialect::Postgres => "TRUE",
        }
    }

    /// Lowers `<column> ILIKE ?` for dialects without ILIKE.
    fn lower_ilike<'a>(&self, condition: &'a str) -> Cow<'a, str> {
        match self {
            Dialect::Sqlite => match condition.strip_suffix(" ILIKE ?") {
                Some(column) if !column.is_empty() && !column.contains(char::is_whitespace) => {
                    Cow::Owned(format!("LOWER({}) LIKE LOWER(?)", column))
                }
                _ => Cow::Borrowed(condition),
            },
            Dialect::Postgres => Cow::Borrowed(condition),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    Sql(String),
    Argument(Value),
}

/// Accumulates WHERE conditions and their arguments in the order they were added.
#[derive(Debug)]
pub struct SqlQuery {
    dialect: Dialect,
    conditions: Vec<Vec<SqlExpr>>,
    fields: Vec<String>,
    table_name: Option<String>,
    error: Option<SqlGenerationError>,
}

impl Default for SqlQuery {
    fn default() -> Self { Self::new(Dialect::default()) }
}

impl SqlQuery {
    pub fn new(dialect: Dialect) -> Self { Self { dialect, conditions: Vec::new(), fields: Vec::new(), table_name: None, error: None } }

    pub fn with_fields<T: Into<String>>(dialect: Dialect, fields: Vec<T>) -> Self {
        Self { fields: fields.into_iter().map(|f| f.into()).collect(), ..Self::new(dialect) }
    }

    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    pub fn condition_count(&self) -> usize { self.conditions.len() }

    /// Splits `condition` on `?`, binding one argument per marker.
    fn push_condition(&mut self, condition: &str, args: Vec<Vec<Value>>) {
        let parts: Vec<&str> = condition.split('?').collect();
        let found = parts.len() - 1;
        if found != args.len() {
            // Keep the first mismatch; the query is unusable either way.
            self.error.get_or_insert(SqlGenerationError::PlaceholderCountMismatch { condition: condition.to_owned(), expected: args.len(), found });
            return;
        }

        let mut exprs = Vec::new();
        let mut args = args.into_iter();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                let group = args.next().unwrap_or_default();
                if group.is_empty() {
                    // Renders `IN (NULL)`, which matches no rows.
                    exprs.push(SqlExpr::Sql("NULL".to_owned()));
                }
                for (j, arg) in group.into_iter().enumerate() {
                    if j > 0 {
                        exprs.push(SqlExpr::Sql(", ".to_owned()));
                    }
                    exprs.push(SqlExpr::Argument(arg));
                }
            }
            if !part.is_empty() {
                exprs.push(SqlExpr::Sql(part.to_owned()));
            }
        }
        self.conditions.push(exprs);
    }

    fn render(&self, exprs: &[SqlExpr], counter: &mut usize, args: &mut Vec<Value>, out: &mut String) {
        for expr in exprs {
            match expr {
                SqlExpr::Sql(s) => out.push_str(s),
                SqlExpr::Argument(arg) => {
                    match self.dialect {
                        Dialect::Sqlite => out.push('?'),
                        Dialect::Postgres => out.push_str(&format!("${}", counter)),
                    }
                    args.push(arg.clone());
                    *counter += 1;
                }
            }
        }
    }

    /// The conditions joined with AND, and the arguments in placeholder order.
    ///
    /// With no conditions the clause is empty.
    pub fn build_where_clause(&self) -> Result<(String, Vec<Value>), SqlGenerationError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let mut counter = 1;
        let mut where_clause = String::new();
        let mut args = Vec::new();
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                where_clause.push_str(" AND ");
            }
            self.render(condition, &mut counter, &mut args, &mut where_clause);
        }
        Ok((where_clause, args))
    }

    fn where_or_true(&self) -> Result<(String, Vec<Value>), SqlGenerationError> {
        let (clause, args) = self.build_where_clause()?;
        if clause.is_empty() {
            Ok((self.dialect.always_true().to_owned(), args))
        } else {
            Ok((clause, args))
        }
    }

    /// A complete SELECT statement. Requires both fields and a table name.
    pub fn build(&self) -> Result<(String, Vec<Value>), SqlGenerationError> {
        let Some(table) = &self.table_name else {
            return Err(SqlGenerationError::IncompleteConfiguration);
        };
        if self.fields.is_empty() {
            return Err(SqlGenerationError::IncompleteConfiguration);
        }

        let (where_clause, args) = self.where_or_true()?;
        let fields_clause = self.fields.iter().map(|field| quote_identifier(field)).collect::<Vec<_>>().join(", ");
        Ok((format!("SELECT {} FROM {} WHERE {}", fields_clause, quote_identifier(table), where_clause), args))
    }

    /// A `SELECT COUNT(*)` statement over the table.
    pub fn build_count(&self) -> Result<(String, Vec<Value>), SqlGenerationError> {
        let table = self.table_name.as_ref().ok_or(SqlGenerationError::MissingTable)?;
        let (where_clause, args) = self.where_or_true()?;
        Ok((format!("SELECT COUNT(*) FROM {} WHERE {}", quote_identifier(table), where_clause), args))
    }
}

fn quote_identifier(name: &str) -> String { format!(r#""{}""#, name.replace('"', "\"\"")) }

impl QueryBuilder for SqlQuery {
    fn where_param(mut self, condition: &str, param: Value) -> Self {
        let condition = self.dialect.lower_ilike(condition);
        self.push_condition(&condition, vec![vec![param]]);
        self
    }

    fn where_params(mut self, condition: &str, params: Vec<Value>) -> Self {
        self.push_condition(condition, vec![params]);
        self
    }

    fn where_sql(mut self, condition: &str) -> Self {
        self.push_condition(condition, Vec::new());
        self
    }
}
