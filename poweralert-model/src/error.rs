//! Error types for field access and envelope parsing

/// Error type for field access operations on [`Record`](crate::Record).
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the record.
    #[error("field '{field}' not present in record")]
    Missing { field: String },

    /// The field exists but has a different type than requested.
    #[error("field '{field}' type mismatch: wanted {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Error type for parsing and unwrapping response envelopes.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The body was not valid JSON in the `{ code, message, data }` shape.
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend answered with a non-success code.
    #[error("backend error {code}: {message}")]
    Api { code: i64, message: String },
}
