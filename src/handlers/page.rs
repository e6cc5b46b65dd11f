//! Page rendering and status endpoints.
//! Used by: server.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;
use crate::view::StatusKind;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub kind: StatusKind,
    pub entries: usize,
    pub trigger_enabled: bool,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page().to_html())
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let page = state.page().snapshot();
    Json(StatusResponse {
        status: page.status,
        kind: page.status_kind,
        entries: page.items.len(),
        trigger_enabled: page.trigger_enabled,
    })
}
