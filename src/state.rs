//! Shared application state.

use std::sync::Arc;

use crate::audit::source::{AuditSource, HttpAuditSource};
use crate::config::Config;
use crate::error::Result;
use crate::render::list::TimeFormat;
use crate::renderer::{LoadGuard, LogRenderer};
use crate::telemetry::Metrics;
use crate::view::PageView;

pub struct AppStateInner {
    pub renderer: LogRenderer<PageView>,
    pub metrics: Metrics,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn page(&self) -> &PageView {
        self.renderer.view()
    }
}

struct StateBuilder {
    source: Box<dyn AuditSource>,
    time_format: TimeFormat,
    guard: LoadGuard,
}

impl StateBuilder {
    fn build(self) -> AppState {
        let renderer = LogRenderer::new(self.source, Arc::new(PageView::new()), self.time_format)
            .with_guard(self.guard);

        Arc::new(AppStateInner {
            renderer,
            metrics: Metrics::new(),
        })
    }
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let source = HttpAuditSource::from_config(config)?;
    tracing::info!(url = %source.url(), guard = ?config.load_guard, "audit source configured");
    Ok(StateBuilder {
        source: Box::new(source),
        time_format: config.time_format.clone(),
        guard: config.load_guard,
    }
    .build())
}

#[cfg(test)]
pub fn build_test_state(source: Box<dyn AuditSource>) -> AppState {
    use crate::render::list::{DisplayZone, DEFAULT_TIME_FORMAT};

    StateBuilder {
        source,
        time_format: TimeFormat::new(DEFAULT_TIME_FORMAT, DisplayZone::Utc)
            .unwrap_or_default(),
        guard: LoadGuard::default(),
    }
    .build()
}
