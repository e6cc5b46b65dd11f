//! auditview: fetch audit logs from a backend and serve them as a sorted,
//! escaped page.
//! Used by: binary entrypoint.

pub mod audit;
pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod render;
pub mod renderer;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod view;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Config::from_env()?;
    let state = state::build_state(&config)?;

    console::print_banner();
    console::print_startup(
        &config.bind_addr,
        config.audit_url()?.as_str(),
        config.load_guard,
        config.time_format.zone(),
    );
    tracing::info!("starting auditview on {}", config.bind_addr);

    server::run(state, &config.bind_addr).await?;
    Ok(())
}
