//! Ballot service
//!
//! - Vote API: GET /api/votes, POST|DELETE /api/votes/{key}
//! - Ops: /healthz, /readyz, /metrics
//! - Periodic heartbeat + RPS load report
//! - SIGHUP re-reads the config and re-arms the reporter

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ballot_service::{app_state::AppState, config, health::TracingSink, router, runtime};

const DEFAULT_CONFIG_PATH: &str = "ballot.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.service.listen_addr()?;

    let state = AppState::default();
    let reporter = runtime::build_reporter(&cfg, &state, Arc::new(TracingSink)).spawn();

    #[cfg(unix)]
    let reloader = runtime::spawn_config_reloader(path.clone(), reporter.control())?;

    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "ballot-service starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(runtime::shutdown_signal(state.clone()))
        .await?;

    #[cfg(unix)]
    reloader.abort();
    reporter.shutdown().await;
    tracing::info!("ballot-service stopped");
    Ok(())
}
