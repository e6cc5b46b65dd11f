//! Display boundary and the in-memory page behind it.
//! Used by: renderer, state, handlers::page.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::render::escape::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Everything the renderer is allowed to touch: the list area, the status
/// element and the trigger control.
pub trait LogView: Send + Sync {
    /// Replaces the whole list with already-escaped entry markup.
    fn replace_items(&self, items: Vec<String>);

    fn clear_items(&self) {
        self.replace_items(Vec::new());
    }

    fn set_status(&self, message: &str, kind: StatusKind);

    fn set_trigger_enabled(&self, enabled: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub items: Vec<String>,
    pub status: String,
    pub status_kind: StatusKind,
    pub trigger_enabled: bool,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: String::new(),
            status_kind: StatusKind::Info,
            trigger_enabled: true,
        }
    }
}

#[derive(Default)]
pub struct PageView {
    state: Mutex<PageSnapshot>,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PageSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().clone()
    }

    /// Full page document for the current state.
    pub fn to_html(&self) -> String {
        let page = self.snapshot();
        let disabled = if page.trigger_enabled { "" } else { " disabled" };
        let items = page.items.join("\n");
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>Audit Logs</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 48rem; }}
    #status[data-type="error"] {{ color: #b91c1c; }}
    #status[data-type="success"] {{ color: #15803d; }}
    #logs {{ list-style: none; padding: 0; }}
    .log-item {{ border: 1px solid #e2e8f0; border-radius: 0.5rem; padding: 0.75rem; margin: 0.5rem 0; }}
    .log-row {{ display: flex; gap: 0.5rem; align-items: center; }}
    .pill {{ background: #e0e7ff; border-radius: 9999px; padding: 0.1rem 0.6rem; font-size: 0.8rem; }}
    .log-meta {{ display: flex; gap: 1rem; color: #475569; font-size: 0.85rem; margin-top: 0.4rem; }}
  </style>
</head>
<body>
  <h1>Audit Logs</h1>
  <form method="post" action="/load">
    <button id="loadLogsBtn" type="submit"{disabled}>Load audit logs</button>
  </form>
  <p id="status" data-type="{kind}">{status}</p>
  <ul id="logs">
{items}
  </ul>
</body>
</html>
"#,
            kind = page.status_kind.as_str(),
            status = escape_html(&page.status),
        )
    }
}

impl LogView for PageView {
    fn replace_items(&self, items: Vec<String>) {
        self.lock().items = items;
    }

    fn set_status(&self, message: &str, kind: StatusKind) {
        let mut page = self.lock();
        page.status = message.to_owned();
        page.status_kind = kind;
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        self.lock().trigger_enabled = enabled;
    }
}
