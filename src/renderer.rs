//! LogRenderer: normalize, sort, escape and display audit logs, and drive a
//! load cycle against the fetch boundary.
//! Used by: state, handlers::load.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tracing::Instrument;

use crate::audit::sort::normalize_and_sort;
use crate::audit::source::AuditSource;
use crate::error::{Error, Result};
use crate::render::list::{render_entries, TimeFormat};
use crate::view::{LogView, StatusKind};

pub const LOADING_STATUS: &str = "Loading audit logs...";
pub const EMPTY_STATUS: &str = "No audit logs found.";
pub const FAILURE_STATUS: &str = "Backend not reachable or returned an error.";

/// What happens when a load completes after a newer one has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadGuard {
    /// Every completion is applied; the last one to finish wins.
    #[default]
    Unguarded,
    /// Completions from superseded loads are dropped.
    LatestWins,
}

impl FromStr for LoadGuard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "unguarded" => Ok(Self::Unguarded),
            "latest" | "latest-wins" => Ok(Self::LatestWins),
            other => Err(Error::Config(format!("LOAD_GUARD must be none or latest, got {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Empty,
    Failed(String),
    Stale,
}

pub struct LogRenderer<V: LogView> {
    source: Box<dyn AuditSource>,
    view: Arc<V>,
    time_format: TimeFormat,
    guard: LoadGuard,
    generation: AtomicU64,
    /// Held while a load starts and while a completion is applied, so the
    /// generation check and the view updates that follow it cannot
    /// interleave with another load.
    apply: Mutex<()>,
}

impl<V: LogView> LogRenderer<V> {
    pub fn new(source: Box<dyn AuditSource>, view: Arc<V>, time_format: TimeFormat) -> Self {
        Self {
            source,
            view,
            time_format,
            guard: LoadGuard::default(),
            generation: AtomicU64::new(0),
            apply: Mutex::new(()),
        }
    }

    pub fn with_guard(mut self, guard: LoadGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Replaces the list with `input` and reports the count. Returns the
    /// number of entries shown; zero means the input had nothing to render.
    pub fn render(&self, input: &Value) -> usize {
        self.view.clear_items();

        let Some(records) = normalize_and_sort(input) else {
            self.view.set_status(EMPTY_STATUS, StatusKind::Info);
            return 0;
        };

        let count = records.len();
        self.view.replace_items(render_entries(&records, &self.time_format));
        self.view
            .set_status(&format!("Loaded {} audit log(s).", count), StatusKind::Success);
        count
    }

    /// One load cycle. Never fails: fetch errors end up in the status text.
    pub async fn load(&self) -> LoadOutcome {
        let generation = {
            let _apply = self.apply.lock().unwrap_or_else(PoisonError::into_inner);
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.view.set_status(LOADING_STATUS, StatusKind::Info);
            self.view.set_trigger_enabled(false);
            generation
        };
        let span = tracing::info_span!("load", id = %uuid::Uuid::new_v4(), generation);
        self.complete(generation).instrument(span).await
    }

    async fn complete(&self, generation: u64) -> LoadOutcome {
        let result = self.source.fetch().await;

        let outcome = {
            let _apply = self.apply.lock().unwrap_or_else(PoisonError::into_inner);
            self.apply_result(generation, result)
        };
        tracing::info!(?outcome, "load finished");
        outcome
    }

    /// Caller holds `apply`.
    fn apply_result(&self, generation: u64, result: Result<Value>) -> LoadOutcome {
        if self.guard == LoadGuard::LatestWins && self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!("superseded by a newer load, discarding result");
            return LoadOutcome::Stale;
        }

        let outcome = match result {
            Ok(body) => match self.render(&body) {
                0 => LoadOutcome::Empty,
                n => LoadOutcome::Loaded(n),
            },
            Err(e) => {
                tracing::error!(error = %e, "audit log fetch failed");
                self.view.clear_items();
                self.view
                    .set_status(&format!("{} {}", FAILURE_STATUS, e), StatusKind::Error);
                LoadOutcome::Failed(e.to_string())
            }
        };

        self.view.set_trigger_enabled(true);
        outcome
    }
}
