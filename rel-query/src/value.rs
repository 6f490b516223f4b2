//! This module exposes [`Value`], the argument type carried by filter predicates, raw fragments
//! and raw SQL statements.

use std::fmt;

use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::types;

/// A generic wrapper enum to hold any value passed to a query.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, CandidType, Serialize, Deserialize)]
pub enum Value {
    Boolean(bool),
    Decimal(types::Decimal),
    Int32(i32),
    Int64(i64),
    List(Vec<Value>),
    Null,
    Text(String),
    Uint32(u32),
    Uint64(u64),
    Uuid(types::Uuid),
}

// macro rules for implementing From, TryFrom and the accessor for each Value variant
macro_rules! impl_conv_for_value {
    ($variant:ident, $ty:ty, $name:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }

        impl_conv_for_value!(@read $variant, $ty, $name);
    };
    (@read $variant:ident, $ty:ty, $name:ident) => {
        impl TryFrom<Value> for $ty {
            type Error = QueryError;

            fn try_from(value: Value) -> QueryResult<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(QueryError::TypeMismatch {
                        expected: stringify!($variant),
                        found: other.type_name(),
                    }),
                }
            }
        }

        impl Value {
            /// Attempts to extract a reference to the inner value if it matches the variant.
            pub fn $name(&self) -> Option<&$ty> {
                if let Value::$variant(v) = self {
                    Some(v)
                } else {
                    None
                }
            }
        }
    };
}

impl_conv_for_value!(Boolean, bool, as_boolean);
impl_conv_for_value!(Decimal, types::Decimal, as_decimal);
impl_conv_for_value!(Int32, i32, as_int32);
impl_conv_for_value!(Int64, i64, as_int64);
impl_conv_for_value!(@read List, Vec<Value>, as_list);
impl_conv_for_value!(Text, String, as_text);
impl_conv_for_value!(Uint32, u32, as_uint32);
impl_conv_for_value!(Uint64, u64, as_uint64);
impl_conv_for_value!(Uuid, types::Uuid, as_uuid);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<rust_decimal::Decimal> for Value {
    fn from(value: rust_decimal::Decimal) -> Self {
        Value::Decimal(value.into())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Value::Uuid(value.into())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl Value {
    /// Checks if the value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "Boolean",
            Value::Decimal(_) => "Decimal",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::List(_) => "List",
            Value::Null => "Null",
            Value::Text(_) => "Text",
            Value::Uint32(_) => "Uint32",
            Value::Uint64(_) => "Uint64",
            Value::Uuid(_) => "Uuid",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::List(values) => {
                f.write_str("(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            Value::Null => f.write_str("NULL"),
            Value::Text(v) => write!(f, "{v:?}"),
            Value::Uint32(v) => write!(f, "{v}"),
            Value::Uint64(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "\"{v}\""),
        }
    }
}
