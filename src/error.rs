//! Unified error types for auditview.
//! Used by: config, audit::source, handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetch failure carrying only a human-readable message.
    #[error("{0}")]
    Fetch(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Fetch(_) | Error::Http(_) | Error::Status(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Url(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
