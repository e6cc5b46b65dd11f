//! Trigger endpoint: runs one load cycle and sends the browser back to the page.
//! Used by: server.

use std::time::Instant;

use axum::extract::State;
use axum::response::Redirect;

use crate::console;
use crate::state::AppState;

pub async fn load(State(state): State<AppState>) -> Redirect {
    state.metrics.record_start();
    let start = Instant::now();

    let outcome = state.renderer.load().await;

    let elapsed_ms = start.elapsed().as_millis();
    tracing::info!(elapsed_ms = elapsed_ms as u64, "load request handled");
    console::log_outcome(&outcome, elapsed_ms);
    state.metrics.record_outcome(&outcome);

    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    use crate::audit::source::fake::StaticSource;
    use crate::state::build_test_state;
    use crate::view::StatusKind;

    #[tokio::test]
    async fn redirects_back_to_page() {
        let state = build_test_state(Box::new(StaticSource(Ok(json!([])))));
        let response = load(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
    }

    #[tokio::test]
    async fn success_updates_page_and_metrics() {
        let state = build_test_state(Box::new(StaticSource(Ok(json!([
            { "id": "1", "action": "LOGIN", "resource": "user:42", "timestamp": "2024-01-01T00:00:00Z" }
        ])))));
        load(State(state.clone())).await;
        let page = state.page().snapshot();
        assert_eq!(page.status, "Loaded 1 audit log(s).");
        assert!(page.trigger_enabled);
        let m = state.metrics.snapshot();
        assert_eq!(m.loads_started, 1);
        assert_eq!(m.loads_succeeded, 1);
        assert_eq!(m.records_rendered, 1);
    }

    #[tokio::test]
    async fn failure_counted_and_shown() {
        let state = build_test_state(Box::new(StaticSource(Err("timeout".into()))));
        load(State(state.clone())).await;
        let page = state.page().snapshot();
        assert_eq!(page.status, "Backend not reachable or returned an error. timeout");
        assert_eq!(page.status_kind, StatusKind::Error);
        assert!(page.items.is_empty());
        assert_eq!(state.metrics.snapshot().loads_failed, 1);
    }
}
