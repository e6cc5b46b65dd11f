//! Fetch boundary: where audit logs come from.
//! Used by: renderer, state.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// A single asynchronous call producing the raw log collection. The shape of
/// the returned value is not trusted.
#[async_trait]
pub trait AuditSource: Send + Sync {
    async fn fetch(&self) -> Result<Value>;
}

pub struct HttpAuditSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpAuditSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.audit_url()?, config.fetch_timeout)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl AuditSource for HttpAuditSource {
    async fn fetch(&self) -> Result<Value> {
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(transport_error)?;
        tracing::debug!(url = %self.url, "audit logs fetched");
        Ok(body)
    }
}

/// Timeouts surface as a plain `timeout`, whether they hit while waiting
/// for headers or while reading the body.
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Fetch("timeout".into())
    } else {
        Error::Http(e)
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;

    /// Answers every fetch with the same reply; `Err` carries the message.
    pub struct StaticSource(pub std::result::Result<Value, String>);

    #[async_trait]
    impl AuditSource for StaticSource {
        async fn fetch(&self) -> Result<Value> {
            self.0.clone().map_err(Error::Fetch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_backend() -> std::io::Result<Url> {
        let router = Router::new()
            .route("/audit", get(|| async { Json(json!([{ "id": "1", "action": "LOGIN" }])) }))
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/html", get(|| async { "<html>not json</html>" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Url::parse(&format!("http://{}/", addr)).unwrap())
    }

    fn source(base: &Url, path: &str) -> Result<HttpAuditSource> {
        HttpAuditSource::new(base.join(path)?, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn fetches_json_body() -> Result<()> {
        let base = spawn_backend().await.unwrap();
        let body = source(&base, "audit")?.fetch().await?;
        assert_eq!(body, json!([{ "id": "1", "action": "LOGIN" }]));
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_error() -> Result<()> {
        let base = spawn_backend().await.unwrap();
        let result = source(&base, "broken")?.fetch().await;
        assert!(matches!(result, Err(Error::Status(500))));
        Ok(())
    }

    #[tokio::test]
    async fn non_json_body_is_error() -> Result<()> {
        let base = spawn_backend().await.unwrap();
        let result = source(&base, "html")?.fetch().await;
        assert!(matches!(result, Err(Error::Http(_))));
        Ok(())
    }

    #[tokio::test]
    async fn slow_backend_reports_timeout() -> Result<()> {
        let router = Router::new().route(
            "/audit",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!([]))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        let url = Url::parse(&format!("http://{}/audit", addr))?;
        let result = HttpAuditSource::new(url, Duration::from_millis(200))?.fetch().await;
        assert_eq!(result.unwrap_err().to_string(), "timeout");
        Ok(())
    }

    #[tokio::test]
    async fn stalled_body_reports_timeout() -> Result<()> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let head = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 64\r\n\r\n[";
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });
        let url = Url::parse(&format!("http://{}/audit", addr))?;
        let result = HttpAuditSource::new(url, Duration::from_millis(300))?.fetch().await;
        assert_eq!(result.unwrap_err().to_string(), "timeout");
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_error() -> Result<()> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{}/audit", addr))?;
        let result = HttpAuditSource::new(url, Duration::from_secs(2))?.fetch().await;
        assert!(result.is_err());
        Ok(())
    }
}
