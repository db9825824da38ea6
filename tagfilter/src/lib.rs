//! # tagfilter
//!
//! Declare a filter as a plain struct, tag each field with the column and comparison it stands for,
//! and compile it into parameterised WHERE predicates on any query builder.
//!
//! ## Core Concepts
//!
//! - **Tag**: `field=<column>;operator=<OP>`, attached to a struct field with `#[filter("...")]`
//! - **Operator**: one of `EQ NE GT GE LT LE LIKE ILIKE IN NOT_IN`
//! - **FilterValue**: a field type the compiler knows how to classify into a [`FieldValue`]
//! - **QueryBuilder**: the sink predicates are emitted into; [`SqlQuery`] renders plain SQL
//! - **ApplyQuery**: an optional hook for predicates tags cannot express, run after all tagged fields
//!
//! `Option` fields only contribute a predicate when they are `Some`. Untagged fields are ignored.
//!
//! ## Example
//!
//! ```rust
//! use tagfilter::{compile, Dialect, Filter, SqlQuery, Table, Value};
//!
//! #[derive(Table)]
//! #[table(name = "my_models")]
//! struct MyModel;
//!
//! #[derive(Filter, Default)]
//! struct MyFilter {
//!     #[filter("field=id;operator=EQ")]
//!     id: Option<i64>,
//!     #[filter("field=cnt;operator=GT")]
//!     cnt_gt: Option<u32>,
//!     #[filter("field=name;operator=ILIKE")]
//!     name: Option<String>,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = MyFilter { id: Some(1), cnt_gt: Some(10), ..Default::default() };
//! let query = compile::<MyModel, _, _>(&filter, SqlQuery::new(Dialect::Postgres))?;
//!
//! let (clause, args) = query.build_where_clause()?;
//! assert_eq!(clause, "my_models.id = $1 AND my_models.cnt > $2");
//! assert_eq!(args, vec![Value::Int(1), Value::Uint(10)]);
//! # Ok(())
//! # }
//! ```

pub use tagfilter_core as core;
#[cfg(feature = "derive")]
pub use tagfilter_derive as derive;

pub use tagfilter_core::{
    compile, compile_qualified,
    error::{CompileError, ExtractError, HandlerError, SqlGenerationError, TagError},
    handlers, tag, ApplyQuery, Dialect, FieldDescriptor, FieldValue, FilterField, FilterSpec, FilterValue, Kind, Operator, QueryBuilder,
    SqlQuery, Table, Value, ValueKind,
};

// Re-export the derive macros
#[cfg(feature = "derive")]
pub use tagfilter_derive::*;
