//! Normalized audit log record built from an untrusted JSON value.
//! Used by: audit::sort, render::list.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

pub const UNKNOWN_ACTION: &str = "UNKNOWN";
pub const UNKNOWN_RESOURCE: &str = "Unknown resource";
pub const PLACEHOLDER: &str = "—";

/// Offsets written as `+0000` as well as `+00:00`.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date-times without an offset are read in the local time zone.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Fully-populated record. Every field has been defaulted, so rendering
/// never has to look at the raw value again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub id: String,
    pub action: String,
    pub resource: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl AuditRecord {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: text_field(value, "id").unwrap_or_else(|| PLACEHOLDER.into()),
            action: text_field(value, "action").unwrap_or_else(|| UNKNOWN_ACTION.into()),
            resource: text_field(value, "resource").unwrap_or_else(|| UNKNOWN_RESOURCE.into()),
            timestamp: value.get("timestamp").and_then(timestamp_field),
        }
    }

    /// Ordering key; larger sorts first. Records without a usable timestamp
    /// compare below every record that has one.
    pub fn sort_key(&self) -> (bool, i64) {
        match self.timestamp {
            Some(ts) => (true, ts.timestamp_millis()),
            None => (false, 0),
        }
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    let text = match value.get(key)? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Strings are parsed; numbers are epoch milliseconds.
fn timestamp_field(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => n.as_f64().filter(|ms| ms.is_finite())?.trunc() as i64,
            };
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    // Bare dates are UTC midnight.
    let date = if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d").ok()?
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
            .ok()?
    };
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}
