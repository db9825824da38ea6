use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::{Kind, ValueKind};

/// Comparison operator named by the `operator` key of a filter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    Ilike,
    In,
    NotIn,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
        Operator::Like,
        Operator::Ilike,
        Operator::In,
        Operator::NotIn,
    ];

    /// The token used for this operator in filter tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Gt => "GT",
            Operator::Ge => "GE",
            Operator::Lt => "LT",
            Operator::Le => "LE",
            Operator::Like => "LIKE",
            Operator::Ilike => "ILIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
        }
    }

    /// Whether a value of `kind` can be compiled with this operator.
    ///
    /// Mirrors the dispatch in [`crate::handlers`]; the two are kept in step by tests.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        match (self, kind) {
            (Operator::Eq | Operator::Ne, ValueKind::Scalar(_)) => true,
            (Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le, ValueKind::Scalar(kind)) => kind != Kind::Bool,
            (Operator::Like | Operator::Ilike, ValueKind::Scalar(kind)) => kind == Kind::String,
            (Operator::In | Operator::NotIn, ValueKind::Repeated(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Returned when a string is not one of the operator tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL.iter().copied().find(|op| op.as_str() == s).ok_or_else(|| UnknownOperator(s.to_owned()))
    }
}
