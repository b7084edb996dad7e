//! Row activation summaries
//!
//! When an operator activates a row, the status line answers the question
//! they opened the console for. For outages that is the notification reach;
//! other pages get a compact field digest.

use poweralert_model::{Record, Value};

use crate::pages::PageKind;

pub fn record_summary(page: PageKind, record: &Record) -> String {
    match page {
        PageKind::Outages => outage_summary(record),
        PageKind::Users => field_digest(record, &["first_name", "last_name", "email", "role"]),
        PageKind::Providers => field_digest(record, &["name", "region", "contact_email"]),
        PageKind::Areas => field_digest(record, &["name", "provider", "priority"]),
        PageKind::Resources => field_digest(record, &["name", "kind", "status"]),
    }
}

fn outage_summary(record: &Record) -> String {
    let area = record
        .get_string("area")
        .ok()
        .flatten()
        .unwrap_or("unknown area");
    let affected = record
        .get_int("affected_customers")
        .ok()
        .flatten()
        .unwrap_or(0);
    let notified = matches!(record.get("notified"), Some(Value::Bool(true)));
    if notified {
        format!("{area}: {affected} affected customers already notified")
    } else {
        format!("{area}: would notify {affected} affected customers by SMS and email")
    }
}

fn field_digest(record: &Record, fields: &[&str]) -> String {
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|field| record.get(field).map(Value::to_text))
        .filter(|text| !text.is_empty())
        .collect();
    if parts.is_empty() {
        "no details".to_string()
    } else {
        parts.join(" / ")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outage_summary_mentions_pending_notification() {
        let record = Record::new()
            .set("area", "Harbor View")
            .set("affected_customers", 1240i64)
            .set("notified", false);
        assert_eq!(
            record_summary(PageKind::Outages, &record),
            "Harbor View: would notify 1240 affected customers by SMS and email"
        );
    }

    #[test]
    fn test_outage_summary_reports_already_notified() {
        let record = Record::new()
            .set("area", "Downtown")
            .set("affected_customers", 300i64)
            .set("notified", true);
        assert_eq!(
            record_summary(PageKind::Outages, &record),
            "Downtown: 300 affected customers already notified"
        );
    }

    #[test]
    fn test_digest_skips_missing_fields() {
        let record = Record::new().set("name", "Grid North").set("region", "Northeast");
        assert_eq!(
            record_summary(PageKind::Providers, &record),
            "Grid North / Northeast"
        );
        assert_eq!(record_summary(PageKind::Providers, &Record::new()), "no details");
    }
}
