pub mod compiler;
pub mod error;
pub mod field;
pub mod handlers;
pub mod operator;
pub mod query;
pub mod sql_builder;
pub mod tag;
pub mod value;

pub use compiler::{compile, compile_qualified, FieldDescriptor, FilterSpec};
pub use error::{CompileError, ExtractError, HandlerError, SqlGenerationError, TagError};
pub use field::FilterField;
pub use operator::{Operator, UnknownOperator};
pub use query::{ApplyQuery, QueryBuilder, Table};
pub use sql_builder::{Dialect, SqlQuery};
pub use tag::Tag;
pub use value::{FieldValue, FilterValue, Kind, Value, ValueKind};
