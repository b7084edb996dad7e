//! Filter values and their composition
//!
//! A filter set maps field names to filter values. A record survives the set
//! when every active filter accepts it; filters left empty (blank text, empty
//! membership list, null equality) count as inactive and are skipped, so a
//! cleared search box really does mean "no filter".

use std::fmt;
use std::sync::Arc;

use poweralert_model::{Record, Value};

/// A custom row predicate. Receives the filtered field's value (if the field
/// exists on the record) plus the whole record for cross-field conditions.
pub type FilterFn = Arc<dyn Fn(Option<&Value>, &Record) -> bool + Send + Sync>;

/// One filter criterion, interpreted by the shape of its value.
#[derive(Clone)]
pub enum FilterValue {
    /// Arbitrary predicate over the field value and record.
    Predicate(FilterFn),
    /// Field must equal one of the listed values.
    OneOf(Vec<Value>),
    /// Case-insensitive substring match against the field's text form.
    Text(String),
    /// Field must be a bool with exactly this value.
    Flag(bool),
    /// Field must be numeric and fall inside the (inclusive) bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// Field must equal this value exactly.
    Equals(Value),
}

impl FilterValue {
    /// Creates a predicate filter from a closure.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Record) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Creates a membership filter.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Creates a substring filter.
    pub fn text(needle: impl Into<String>) -> Self {
        Self::Text(needle.into())
    }

    /// Creates a boolean flag filter.
    pub fn flag(expected: bool) -> Self {
        Self::Flag(expected)
    }

    /// Creates a lower-bounded numeric filter.
    pub fn at_least(min: f64) -> Self {
        Self::Range { min: Some(min), max: None }
    }

    /// Creates an upper-bounded numeric filter.
    pub fn at_most(max: f64) -> Self {
        Self::Range { min: None, max: Some(max) }
    }

    /// Creates a numeric filter bounded on both sides (inclusive).
    pub fn between(min: f64, max: f64) -> Self {
        Self::Range { min: Some(min), max: Some(max) }
    }

    /// Creates an exact equality filter.
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Equals(value.into())
    }

    /// Whether this filter actually constrains anything. Inactive filters
    /// are skipped during matching.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Text(needle) => !needle.is_empty(),
            Self::OneOf(values) => !values.is_empty(),
            Self::Equals(Value::Null) => false,
            Self::Range { min, max } => min.is_some() || max.is_some(),
            _ => true,
        }
    }

    /// Whether the given field value (and record) pass this filter.
    pub fn matches(&self, value: Option<&Value>, record: &Record) -> bool {
        match self {
            Self::Predicate(f) => f(value, record),
            Self::OneOf(allowed) => {
                let value = value.unwrap_or(&Value::Null);
                allowed.iter().any(|candidate| values_equal(candidate, value))
            }
            Self::Text(needle) => {
                let haystack = value.map(Value::to_text).unwrap_or_default();
                haystack.to_lowercase().contains(&needle.to_lowercase())
            }
            Self::Flag(expected) => {
                matches!(value, Some(Value::Bool(actual)) if actual == expected)
            }
            Self::Range { min, max } => {
                let Some(number) = value.and_then(Value::as_f64) else {
                    return false;
                };
                min.is_none_or(|lo| number >= lo) && max.is_none_or(|hi| number <= hi)
            }
            Self::Equals(expected) => values_equal(expected, value.unwrap_or(&Value::Null)),
        }
    }
}

impl fmt::Debug for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            Self::Text(needle) => f.debug_tuple("Text").field(needle).finish(),
            Self::Flag(expected) => f.debug_tuple("Flag").field(expected).finish(),
            Self::Range { min, max } => f
                .debug_struct("Range")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Equals(value) => f.debug_tuple("Equals").field(value).finish(),
        }
    }
}

/// Equality with numeric coercion, so `Int(5)` and `Float(5.0)` match.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

/// An ordered field → filter mapping. Order only affects iteration; matching
/// requires every active entry to pass.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, filter: FilterValue) -> Self {
        self.insert(field, filter);
        self
    }

    /// Sets the filter for a field, replacing any existing one.
    pub fn insert(&mut self, field: impl Into<String>, filter: FilterValue) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = filter,
            None => self.entries.push((field, filter)),
        }
    }

    /// Removes the filter for a field, returning it if present.
    pub fn remove(&mut self, field: &str) -> Option<FilterValue> {
        let index = self.entries.iter().position(|(name, _)| name == field)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the filter for a field.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, filter)| filter)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries that actually constrain matching.
    pub fn active_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, filter)| filter.is_active())
            .count()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries
            .iter()
            .map(|(field, filter)| (field.as_str(), filter))
    }

    /// Whether a record passes every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.entries
            .iter()
            .filter(|(_, filter)| filter.is_active())
            .all(|(field, filter)| filter.matches(record.get(field), record))
    }
}

// =============================================================================
// Tests
// =============================================================================
