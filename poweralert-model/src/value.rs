//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value that can hold any PowerAlert field type.
///
/// Admin payloads are flat JSON objects; every field deserializes into one of
/// these variants. Used in [`Record`](super::Record) to store field values
/// dynamically.
///
/// Deserialization is untagged and tries the variants in declaration order,
/// so an ISO-8601 timestamp string becomes a `DateTime` while any other
/// string stays a `String`, and a whole-number JSON literal becomes an `Int`
/// before falling back to `Float`.
///
/// # Example
///
/// ```
/// use poweralert_model::Value;
///
/// let title = Value::from("Cedar Grove feeder fault");
/// let households = Value::from(1_240i64);
/// let resolved = Value::from(false);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Date and time with timezone (RFC 3339 on the wire).
    DateTime(DateTime<Utc>),
    /// String value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
        }
    }

    /// Returns a numeric view of this value, widening `Int` to `f64`.
    ///
    /// Non-numeric values return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Raw stringification, the way the admin frontend coerces a field for
    /// substring matching: null is empty, booleans are `true`/`false`,
    /// datetimes are RFC 3339.
    ///
    /// Presentation formatting (Yes/No, formatted dates) is a display
    /// concern and lives with the grid, not here.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::String(s) => s.clone(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
