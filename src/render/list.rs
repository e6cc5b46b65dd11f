//! List entry markup and timestamp display.
//! Used by: renderer, config.

use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

use crate::audit::record::{AuditRecord, PLACEHOLDER};
use crate::error::{Error, Result};
use crate::render::escape::escape_html;

/// en-US style, e.g. `1/1/2024, 12:00:00 AM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

impl FromStr for DisplayZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            other => Err(Error::Config(format!("DISPLAY_TZ must be local or utc, got {other}"))),
        }
    }
}

/// Validated strftime pattern plus the zone timestamps are shown in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    pattern: String,
    zone: DisplayZone,
}

impl TimeFormat {
    pub fn new(pattern: impl Into<String>, zone: DisplayZone) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!("TIME_FORMAT is not a valid strftime pattern: {pattern}")));
        }
        Ok(Self { pattern, zone })
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    pub fn format(&self, ts: &DateTime<Utc>) -> String {
        match self.zone {
            DisplayZone::Local => ts.with_timezone(&Local).format(&self.pattern).to_string(),
            DisplayZone::Utc => ts.format(&self.pattern).to_string(),
        }
    }

    /// Formatted time, or the placeholder when the record has none.
    pub fn display(&self, ts: Option<&DateTime<Utc>>) -> String {
        ts.map(|ts| self.format(ts)).unwrap_or_else(|| PLACEHOLDER.into())
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIME_FORMAT.into(),
            zone: DisplayZone::default(),
        }
    }
}

pub fn render_entry(record: &AuditRecord, time_format: &TimeFormat) -> String {
    let time = time_format.display(record.timestamp.as_ref());
    format!(
        concat!(
            "<li class=\"log-item\">\n",
            "  <div class=\"log-row\">\n",
            "    <span class=\"pill\">{action}</span>\n",
            "    <span class=\"log-title\">{resource}</span>\n",
            "  </div>\n",
            "  <div class=\"log-meta\">\n",
            "    <span><strong>ID:</strong> {id}</span>\n",
            "    <span><strong>Time:</strong> {time}</span>\n",
            "  </div>\n",
            "</li>"
        ),
        action = escape_html(&record.action),
        resource = escape_html(&record.resource),
        id = escape_html(&record.id),
        time = escape_html(&time),
    )
}

pub fn render_entries(records: &[AuditRecord], time_format: &TimeFormat) -> Vec<String> {
    records.iter().map(|r| render_entry(r, time_format)).collect()
}
