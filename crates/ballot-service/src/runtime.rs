//! Process wiring: reporter construction, config reload, shutdown signal.

use std::sync::Arc;
use std::time::Duration;

use ballot_core::error::Result;

use crate::app_state::AppState;
use crate::config::{self, ServiceConfig};
use crate::health::{
    HealthSink, NodeInfoSource, Reporter, ReporterControl, StaticNodeInfo, UpgradeDomainProbe,
};

/// Build (but do not start) the health reporter for `state`.
///
/// The upgrade-domain probe is installed only when the config lists domains.
pub fn build_reporter(cfg: &ServiceConfig, state: &AppState, sink: Arc<dyn HealthSink>) -> Reporter {
    let reporter = Reporter::new(state.requests().clone(), sink, cfg.health.interval())
        .with_metrics(state.metrics());

    let domains = &cfg.health.forced_error_upgrade_domains;
    if domains.is_empty() {
        return reporter;
    }

    tracing::warn!(?domains, node = %cfg.node.name, "forced health errors enabled for upgrade domains");
    let node: Arc<dyn NodeInfoSource> = Arc::new(StaticNodeInfo::from_config(&cfg.node));
    reporter.with_probe(Arc::new(UpgradeDomainProbe::new(node, domains.iter().cloned())))
}

/// Re-read `path` and re-arm the reporter with its interval.
///
/// On error nothing is changed: the previous interval stays in effect.
pub async fn reload_interval(path: &str, control: &ReporterControl) -> Result<Duration> {
    let cfg = config::load_from_file(path)?;
    let interval = cfg.health.interval();
    control.reconfigure(interval).await?;
    Ok(interval)
}

/// Reload the config file on every SIGHUP.
#[cfg(unix)]
pub fn spawn_config_reloader(
    path: String,
    control: ReporterControl,
) -> std::io::Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            match reload_interval(&path, &control).await {
                Ok(interval) => {
                    tracing::info!(%path, interval_secs = interval.as_secs(), "config reloaded")
                }
                Err(e) => {
                    tracing::warn!(%path, error = %e, "config reload rejected; keeping previous interval")
                }
            }
        }
    }))
}

/// Resolve on Ctrl-C or SIGTERM, then mark the service as draining.
pub async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    state.set_draining();
    tracing::info!("signal received, starting graceful shutdown");
}
