//! Admin page definitions
//!
//! Each page is a declarative column set plus the data file and search field
//! the app wires it to. Everything dynamic (filtering, sorting, paging,
//! painting) happens in the grid engine; a page only describes what its
//! table looks like.

use chrono::Utc;
use clap::ValueEnum;
use poweralert_grid::{Alignment, CellView, Column, relative_time};
use poweralert_model::{Record, Value};

/// The admin pages of the console, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Outages,
    Users,
    Providers,
    Areas,
    Resources,
}

impl PageKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Outages => "Outages",
            Self::Users => "Users",
            Self::Providers => "Providers",
            Self::Areas => "Service Areas",
            Self::Resources => "Resources",
        }
    }

    /// File inside the data directory this page loads.
    pub fn data_file(self) -> &'static str {
        match self {
            Self::Outages => "outages.json",
            Self::Users => "users.json",
            Self::Providers => "providers.json",
            Self::Areas => "areas.json",
            Self::Resources => "resources.json",
        }
    }

    /// The field the live search binds to.
    pub fn search_field(self) -> &'static str {
        match self {
            Self::Outages => "area",
            Self::Users => "email",
            Self::Providers | Self::Areas | Self::Resources => "name",
        }
    }

    /// Values the status quick-filter cycles through, for pages that have a
    /// status field.
    pub fn status_values(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Outages => Some(&["SCHEDULED", "ONGOING", "COMPLETED"]),
            Self::Resources => Some(&["AVAILABLE", "DEPLOYED", "MAINTENANCE"]),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Outages => Self::Users,
            Self::Users => Self::Providers,
            Self::Providers => Self::Areas,
            Self::Areas => Self::Resources,
            Self::Resources => Self::Outages,
        }
    }

    pub fn columns(self) -> Vec<Column> {
        match self {
            Self::Outages => outage_columns(),
            Self::Users => user_columns(),
            Self::Providers => provider_columns(),
            Self::Areas => area_columns(),
            Self::Resources => resource_columns(),
        }
    }
}

fn id_column() -> Column {
    Column::field("id", "ID")
        .sortable()
        .width(4)
        .align(Alignment::Right)
        .cell_class("muted")
}

fn outage_columns() -> Vec<Column> {
    vec![
        id_column(),
        Column::field("area", "Area").sortable().width(18),
        Column::field("status", "Status")
            .sortable()
            .width(11)
            .renderer(outage_badge),
        Column::field("started", "Started").sortable().width(17),
        Column::computed("Duration", outage_duration).width(9),
        Column::field("affected_customers", "Affected")
            .sortable()
            .width(9)
            .align(Alignment::Right),
        Column::field("notified", "Notified").width(8),
    ]
}

fn user_columns() -> Vec<Column> {
    vec![
        id_column(),
        Column::computed("Name", full_name).sortable().width(20),
        Column::field("email", "Email").sortable().width(26),
        Column::field("phone", "Phone").width(14),
        Column::field("role", "Role").sortable().width(10),
        Column::field("active", "Active").width(6),
        Column::field("last_login", "Last Login")
            .sortable()
            .width(12)
            .formatter(relative),
    ]
}

fn provider_columns() -> Vec<Column> {
    vec![
        id_column(),
        Column::field("name", "Provider").sortable().width(22),
        Column::field("region", "Region").sortable().width(14),
        Column::field("active_outages", "Active")
            .sortable()
            .width(7)
            .align(Alignment::Right),
        Column::field("contact_email", "Contact").width(26).cell_class("muted"),
    ]
}

fn area_columns() -> Vec<Column> {
    vec![
        id_column(),
        Column::field("name", "Area").sortable().width(18),
        Column::field("provider", "Provider").sortable().width(22),
        Column::field("population", "Population")
            .sortable()
            .width(11)
            .align(Alignment::Right)
            .formatter(thousands),
        Column::field("priority", "Priority").sortable().width(8),
    ]
}

fn resource_columns() -> Vec<Column> {
    vec![
        id_column(),
        Column::field("name", "Resource").sortable().width(22),
        Column::field("kind", "Type").sortable().width(12),
        Column::field("capacity_mw", "Capacity")
            .sortable()
            .width(9)
            .align(Alignment::Right)
            .formatter(megawatts),
        Column::field("status", "Status")
            .sortable()
            .width(12)
            .renderer(resource_badge),
        Column::field("updated", "Updated").sortable().width(10).formatter(relative),
    ]
}

// =============================================================================
// Cell renderers and formatters
// =============================================================================

fn outage_badge(record: &Record) -> CellView {
    let status = record.get_string("status").ok().flatten().unwrap_or_default();
    let class = match status {
        "ONGOING" => "alert",
        "SCHEDULED" => "warn",
        "COMPLETED" => "ok",
        _ => "muted",
    };
    CellView::text(status).class(class)
}

fn resource_badge(record: &Record) -> CellView {
    let status = record.get_string("status").ok().flatten().unwrap_or_default();
    let class = match status {
        "AVAILABLE" => "ok",
        "DEPLOYED" => "warn",
        "MAINTENANCE" => "alert",
        _ => "muted",
    };
    CellView::text(status).class(class)
}

/// Elapsed time of an outage. Open outages run against the wall clock.
fn outage_duration(record: &Record) -> Option<Value> {
    let started = record.get_datetime("started").ok().flatten()?;
    let ended = record
        .get_datetime("ended")
        .ok()
        .flatten()
        .unwrap_or_else(Utc::now);
    let minutes = ended.signed_duration_since(started).num_minutes().max(0);
    let text = if minutes < 60 {
        format!("{minutes}m")
    } else {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    };
    Some(Value::from(text))
}

fn full_name(record: &Record) -> Option<Value> {
    let first = record.get_string("first_name").ok().flatten();
    let last = record.get_string("last_name").ok().flatten();
    match (first, last) {
        (Some(first), Some(last)) => Some(Value::from(format!("{first} {last}"))),
        (Some(only), None) | (None, Some(only)) => Some(Value::from(only)),
        (None, None) => None,
    }
}

fn relative(value: &Value, _record: &Record) -> String {
    match value {
        Value::DateTime(dt) => relative_time(dt, Utc::now()),
        other => other.to_text(),
    }
}

fn megawatts(value: &Value, _record: &Record) -> String {
    match value.as_f64() {
        Some(n) => format!("{n} MW"),
        None => value.to_text(),
    }
}

fn thousands(value: &Value, _record: &Record) -> String {
    match value {
        Value::Int(n) => group_digits(*n),
        other => other.to_text(),
    }
}

fn group_digits(n: i64) -> String {
    let raw = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 { format!("-{grouped}") } else { grouped }
}

// =============================================================================
// Tests
// =============================================================================
