//! # Value Kinds — Type Descriptors for Type Figures
//!
//! Defines the `Kind` enum, the type descriptor carried by
//! [`Figure::Type`](crate::Figure::Type). Every JSON value has exactly one
//! most-specific kind, obtained with [`Kind::of`].
//!
//! ## Subkind Relation
//!
//! Matching is by subkind, not by equality:
//!
//! | Kind | Subkinds |
//! |------|----------|
//! | `any` | every kind |
//! | `number` | `integer`, `float` |
//! | everything else | itself only |
//!
//! A JSON number is an `integer` when it is representable as `i64` or `u64`,
//! and a `float` otherwise. `5` is an `integer`, `5.0` is a `float`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::FigureError;

/// Type descriptor for JSON data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Any value at all.
    Any,
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool,
    /// Any number, integral or not.
    Number,
    /// A number representable as `i64` or `u64`.
    Integer,
    /// A number that is not representable as an integer.
    Float,
    /// A text string.
    String,
    /// An ordered array.
    Array,
    /// A string-keyed object.
    Object,
}

impl Kind {
    /// Returns all kinds, most general first.
    pub fn all_kinds() -> &'static [Kind] {
        &[
            Self::Any,
            Self::Null,
            Self::Bool,
            Self::Number,
            Self::Integer,
            Self::Float,
            Self::String,
            Self::Array,
            Self::Object,
        ]
    }

    /// Returns the most specific kind of a value.
    ///
    /// Never returns `Any` or `Number`; those only appear in figures.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether `self` is `other` or one of its subkinds.
    pub fn is_subkind_of(self, other: Kind) -> bool {
        match (self, other) {
            (_, Self::Any) => true,
            (Self::Integer | Self::Float, Self::Number) => true,
            (a, b) => a == b,
        }
    }

    /// Whether `value` is an instance of this kind.
    pub fn admits(self, value: &Value) -> bool {
        Kind::of(value).is_subkind_of(self)
    }

    /// Returns the snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "null" => Ok(Self::Null),
            "bool" => Ok(Self::Bool),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            other => Err(FigureError::UnknownKind(other.to_string())),
        }
    }
}
