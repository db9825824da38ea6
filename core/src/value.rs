//! Value kinds and extraction of filter field values.
//!
//! Every supported field type normalizes into one [`FieldValue`] variant. Timestamps and identifiers
//! have no kind of their own and become strings in a canonical, sortable form.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Scalar value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    String,
}

/// A [`Kind`] in scalar or repeated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Scalar(Kind),
    Repeated(Kind),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar(kind) => write!(f, "{}", kind),
            ValueKind::Repeated(kind) => write!(f, "repeated {}", kind),
        }
    }
}

/// A single bound query parameter.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(float) => write!(f, "{:?}", float),
            Value::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// The populated value slot of a filter field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Bools(Vec<bool>),
    Ints(Vec<i64>),
    Uints(Vec<u64>),
    Floats(Vec<f64>),
    Strings(Vec<String>),
}

impl FieldValue {
    /// An empty repeated slot of the given kind.
    pub fn repeated(kind: Kind) -> Self {
        match kind {
            Kind::Bool => FieldValue::Bools(Vec::new()),
            Kind::Int => FieldValue::Ints(Vec::new()),
            Kind::Uint => FieldValue::Uints(Vec::new()),
            Kind::Float => FieldValue::Floats(Vec::new()),
            Kind::String => FieldValue::Strings(Vec::new()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Bool(_) => ValueKind::Scalar(Kind::Bool),
            FieldValue::Int(_) => ValueKind::Scalar(Kind::Int),
            FieldValue::Uint(_) => ValueKind::Scalar(Kind::Uint),
            FieldValue::Float(_) => ValueKind::Scalar(Kind::Float),
            FieldValue::String(_) => ValueKind::Scalar(Kind::String),
            FieldValue::Bools(_) => ValueKind::Repeated(Kind::Bool),
            FieldValue::Ints(_) => ValueKind::Repeated(Kind::Int),
            FieldValue::Uints(_) => ValueKind::Repeated(Kind::Uint),
            FieldValue::Floats(_) => ValueKind::Repeated(Kind::Float),
            FieldValue::Strings(_) => ValueKind::Repeated(Kind::String),
        }
    }

    /// The bound parameter for a scalar slot; `None` for repeated slots.
    pub fn scalar(&self) -> Option<Value> {
        Some(match self {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::Int(*i),
            FieldValue::Uint(u) => Value::Uint(*u),
            FieldValue::Float(f) => Value::Float(*f),
            FieldValue::String(s) => Value::String(s.clone()),
            _ => return None,
        })
    }

    /// The bound parameters of a repeated slot in sequence order; `None` for scalar slots.
    pub fn list(&self) -> Option<Vec<Value>> {
        Some(match self {
            FieldValue::Bools(v) => v.iter().copied().map(Value::Bool).collect(),
            FieldValue::Ints(v) => v.iter().copied().map(Value::Int).collect(),
            FieldValue::Uints(v) => v.iter().copied().map(Value::Uint).collect(),
            FieldValue::Floats(v) => v.iter().copied().map(Value::Float).collect(),
            FieldValue::Strings(v) => v.iter().cloned().map(Value::String).collect(),
            _ => return None,
        })
    }

    /// Appends a scalar to a repeated slot of the same kind. Returns false on a kind mismatch.
    fn append(&mut self, item: FieldValue) -> bool {
        match (self, item) {
            (FieldValue::Bools(v), FieldValue::Bool(b)) => v.push(b),
            (FieldValue::Ints(v), FieldValue::Int(i)) => v.push(i),
            (FieldValue::Uints(v), FieldValue::Uint(u)) => v.push(u),
            (FieldValue::Floats(v), FieldValue::Float(f)) => v.push(f),
            (FieldValue::Strings(v), FieldValue::String(s)) => v.push(s),
            _ => return false,
        }
        true
    }
}

/// A type that can be used as the value of a tagged filter field.
pub trait FilterValue {
    fn extract(&self) -> Result<FieldValue, ExtractError>;

    /// The scalar kind every value of this type extracts to, if fixed by the type.
    ///
    /// Sequences use it to type an empty repeated slot.
    fn scalar_kind() -> Option<Kind>
    where Self: Sized {
        None
    }
}

/// Extracts every element of `items` into one repeated slot, keeping order and duplicates.
///
/// `S` names the sequence type in the error message.
pub fn extract_seq<S: ?Sized, T: FilterValue>(items: &[T]) -> Result<FieldValue, ExtractError> {
    let mut values = T::scalar_kind().map(FieldValue::repeated);
    for item in items {
        let item = item.extract()?;
        let ValueKind::Scalar(kind) = item.kind() else {
            return Err(ExtractError::unsupported::<S>());
        };
        let values = values.get_or_insert_with(|| FieldValue::repeated(kind));
        if !values.append(item) {
            return Err(ExtractError::unsupported::<S>());
        }
    }
    // Element kind unknown and nothing to infer it from; any repeated kind binds an empty list alike.
    Ok(values.unwrap_or(FieldValue::Strings(Vec::new())))
}

macro_rules! impl_scalar {
    ($variant:ident, $kind:ident, $target:ty: $($t:ty),+) => {
        $(
            impl FilterValue for $t {
                fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::$variant(*self as $target)) }
                fn scalar_kind() -> Option<Kind> { Some(Kind::$kind) }
            }
        )+
    };
}

impl_scalar!(Int, Int, i64: i8, i16, i32, i64, isize);
impl_scalar!(Uint, Uint, u64: u8, u16, u32, u64, usize);
impl_scalar!(Float, Float, f64: f32, f64);

impl FilterValue for bool {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::Bool(*self)) }
    fn scalar_kind() -> Option<Kind> { Some(Kind::Bool) }
}

impl FilterValue for String {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::String(self.clone())) }
    fn scalar_kind() -> Option<Kind> { Some(Kind::String) }
}

impl FilterValue for &str {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::String((*self).to_owned())) }
    fn scalar_kind() -> Option<Kind> { Some(Kind::String) }
}

impl FilterValue for char {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::String(self.to_string())) }
    fn scalar_kind() -> Option<Kind> { Some(Kind::String) }
}

/// Timestamps render as RFC 3339 with whole seconds, using `Z` for UTC.
impl<Tz: TimeZone> FilterValue for DateTime<Tz>
where Tz::Offset: fmt::Display
{
    fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::String(self.to_rfc3339_opts(SecondsFormat::Secs, true))) }
    fn scalar_kind() -> Option<Kind> { Some(Kind::String) }
}

/// Hyphenated lower-case form.
impl FilterValue for uuid::Uuid {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::String(self.hyphenated().to_string())) }
    fn scalar_kind() -> Option<Kind> { Some(Kind::String) }
}

/// Canonical 26 character Crockford base32 form.
impl FilterValue for ulid::Ulid {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Ok(FieldValue::String(self.to_string())) }
    fn scalar_kind() -> Option<Kind> { Some(Kind::String) }
}

impl<T: FilterValue> FilterValue for Vec<T> {
    fn extract(&self) -> Result<FieldValue, ExtractError> { extract_seq::<Self, T>(self) }
}

impl<T: FilterValue, const N: usize> FilterValue for [T; N] {
    fn extract(&self) -> Result<FieldValue, ExtractError> { extract_seq::<Self, T>(self) }
}

impl<T: FilterValue> FilterValue for &[T] {
    fn extract(&self) -> Result<FieldValue, ExtractError> { extract_seq::<Self, T>(self) }
}

/// JSON values are classified by their runtime shape.
impl FilterValue for serde_json::Value {
    fn extract(&self) -> Result<FieldValue, ExtractError> {
        use serde_json::Value as Json;
        match self {
            Json::Bool(b) => Ok(FieldValue::Bool(*b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FieldValue::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(FieldValue::Uint(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(FieldValue::Float(f))
                } else {
                    Err(ExtractError::UnsupportedType(format!("serde_json::Number({})", n)))
                }
            }
            Json::String(s) => Ok(FieldValue::String(s.clone())),
            Json::Array(items) => extract_seq::<Vec<Json>, Json>(items),
            Json::Null => Err(ExtractError::UnsupportedType("serde_json::Value::Null".to_owned())),
            Json::Object(_) => Err(ExtractError::UnsupportedType("serde_json::Value::Object".to_owned())),
        }
    }
}

// The following shapes are accepted as filter field types but have no value kind.

impl FilterValue for i128 {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Err(ExtractError::unsupported::<Self>()) }
}

impl FilterValue for u128 {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Err(ExtractError::unsupported::<Self>()) }
}

impl<K, V, S> FilterValue for HashMap<K, V, S> {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Err(ExtractError::unsupported::<Self>()) }
}

impl<K, V> FilterValue for BTreeMap<K, V> {
    fn extract(&self) -> Result<FieldValue, ExtractError> { Err(ExtractError::unsupported::<Self>()) }
}
