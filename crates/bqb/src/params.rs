//! Named parameter values.
//!
//! Parameters are never part of the query tree. They are handed to
//! [`build`](crate::build) next to the root query and reconciled against the
//! `@name` placeholders found in the rendered text.

use serde::Serialize;
use std::fmt;

/// A typed parameter value understood by the warehouse client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    StringList(Vec<String>),
}

impl ParamValue {
    /// Name of the warehouse type this value binds as.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "BOOL",
            ParamValue::Int64(_) => "INT64",
            ParamValue::Float64(_) => "FLOAT64",
            ParamValue::String(_) => "STRING",
            ParamValue::StringList(_) => "ARRAY<STRING>",
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int64(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int64(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float64(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::StringList(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Int64(v) => write!(f, "{v}"),
            ParamValue::Float64(v) => write!(f, "{v}"),
            ParamValue::String(v) => write!(f, "{v:?}"),
            ParamValue::StringList(v) => write!(f, "{v:?}"),
        }
    }
}

/// A named parameter supplied at finalize time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamMod {
    pub(crate) name: String,
    pub(crate) value: ParamValue,
}

impl ParamMod {
    /// Create a parameter from any value convertible into [`ParamValue`].
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Placeholder name, without the `@` marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }
}

/// A finalized `(name, value)` pair, ready to be bound by the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParameter {
    pub name: String,
    pub value: ParamValue,
}

impl From<ParamMod> for QueryParameter {
    fn from(param: ParamMod) -> Self {
        Self {
            name: param.name,
            value: param.value,
        }
    }
}

/// Bind a BOOL parameter.
pub fn param_bool(name: impl Into<String>, value: bool) -> ParamMod {
    ParamMod::new(name, value)
}

/// Bind an INT64 parameter from a 32-bit integer.
pub fn param_int(name: impl Into<String>, value: i32) -> ParamMod {
    ParamMod::new(name, value)
}

/// Bind an INT64 parameter.
pub fn param_int64(name: impl Into<String>, value: i64) -> ParamMod {
    ParamMod::new(name, value)
}

/// Bind a FLOAT64 parameter.
pub fn param_float64(name: impl Into<String>, value: f64) -> ParamMod {
    ParamMod::new(name, value)
}

/// Bind a STRING parameter.
pub fn param_str(name: impl Into<String>, value: impl Into<String>) -> ParamMod {
    ParamMod::new(name, ParamValue::String(value.into()))
}

/// Bind an `ARRAY<STRING>` parameter, typically consumed via `IN UNNEST(@name)`.
pub fn param_str_slice<S: Into<String>>(
    name: impl Into<String>,
    values: impl IntoIterator<Item = S>,
) -> ParamMod {
    ParamMod::new(
        name,
        ParamValue::StringList(values.into_iter().map(Into::into).collect()),
    )
}

/// Bind a STRING parameter from anything implementing [`fmt::Display`].
///
/// The value is rendered immediately; later changes to `value` are not seen.
pub fn param_display(name: impl Into<String>, value: &impl fmt::Display) -> ParamMod {
    ParamMod::new(name, ParamValue::String(value.to_string()))
}
