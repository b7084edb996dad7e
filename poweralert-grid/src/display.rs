//! Default cell text rules
//!
//! What a value looks like when the column brings no renderer and no
//! formatter of its own: nulls blank out, booleans read as Yes/No, dates go
//! through the grid's date formatter, numbers and strings print as-is.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use poweralert_model::Value;

/// Pattern used by [`default_date_formatter`].
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d %H:%M";

/// Grid-wide date display hook.
pub type DateFormatter = Arc<dyn Fn(&DateTime<Utc>) -> String + Send + Sync>;

/// Formats dates as `2026-03-14 09:30` (UTC).
pub fn default_date_formatter() -> DateFormatter {
    Arc::new(|value| value.format(DEFAULT_DATE_PATTERN).to_string())
}

/// Builds a date formatter from a strftime pattern.
pub fn date_formatter(pattern: impl Into<String>) -> DateFormatter {
    let pattern = pattern.into();
    Arc::new(move |value| value.format(&pattern).to_string())
}

/// Default stringification of an optional cell value.
pub fn cell_text(value: Option<&Value>, dates: &DateFormatter) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::Int(n)) => n.to_string(),
        Some(Value::Float(n)) => n.to_string(),
        Some(Value::DateTime(dt)) => dates(dt),
        Some(Value::String(s)) => s.clone(),
    }
}

/// Coarse "how long ago" phrasing for timestamps, for columns that want
/// `45m ago` instead of a full date.
pub fn relative_time(value: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(*value);
    let future = delta < chrono::Duration::zero();
    let delta = if future { -delta } else { delta };

    if delta.num_seconds() < 60 {
        return "just now".to_string();
    }
    let span = if delta.num_minutes() < 60 {
        format!("{}m", delta.num_minutes())
    } else if delta.num_hours() < 24 {
        format!("{}h", delta.num_hours())
    } else {
        format!("{}d", delta.num_days())
    };

    if future {
        format!("in {span}")
    } else {
        format!("{span} ago")
    }
}

// =============================================================================
// Tests
// =============================================================================
