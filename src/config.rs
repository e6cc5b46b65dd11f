//! Environment-driven configuration.
//! Used by: main, state, audit::source.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::render::list::{DisplayZone, TimeFormat, DEFAULT_TIME_FORMAT};
use crate::renderer::LoadGuard;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
const DEFAULT_AUDIT_PATH: &str = "/audit";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub backend_url: Url,
    pub audit_path: String,
    pub fetch_timeout: Duration,
    pub load_guard: LoadGuard,
    pub time_format: TimeFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset or blank keys fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend_url = Url::parse(&get("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.into()))?;
        if !matches!(backend_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "BACKEND_URL must be http or https, got {}",
                backend_url.scheme()
            )));
        }

        let fetch_timeout = match get("FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "FETCH_TIMEOUT_SECS must be a positive integer, got {raw}"
                    )))
                }
            },
            None => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        };

        let load_guard: LoadGuard = match get("LOAD_GUARD") {
            Some(raw) => raw.parse()?,
            None => LoadGuard::default(),
        };

        let zone: DisplayZone = match get("DISPLAY_TZ") {
            Some(raw) => raw.parse()?,
            None => DisplayZone::default(),
        };
        let pattern = get("TIME_FORMAT").unwrap_or_else(|| DEFAULT_TIME_FORMAT.into());

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            backend_url,
            audit_path: get("AUDIT_PATH").unwrap_or_else(|| DEFAULT_AUDIT_PATH.into()),
            fetch_timeout,
            load_guard,
            time_format: TimeFormat::new(pattern, zone)?,
        })
    }

    /// Absolute audit endpoint. A leading `/` in `AUDIT_PATH` replaces the
    /// backend URL's path; a relative one is resolved against it.
    pub fn audit_url(&self) -> Result<Url> {
        Ok(self.backend_url.join(&self.audit_path)?)
    }
}
