#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use ballot_service::health::HealthState;
use ballot_service::{app_state::AppState, config, runtime};

use sinks::RecordingSink;

fn write_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ballot-{}-{name}.yaml", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

#[tokio::test(start_paused = true)]
async fn reload_rearms_reporter_with_new_interval() {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let state = AppState::default();
    let sink = Arc::new(RecordingSink::default());
    let handle = runtime::build_reporter(&cfg, &state, sink.clone()).spawn();

    let path = write_config(
        "rearm",
        "version: 1\nhealth:\n  health_check_interval_seconds: 90\n",
    );
    let interval = runtime::reload_interval(path.to_str().unwrap(), &handle.control())
        .await
        .unwrap();
    assert_eq!(interval, Duration::from_secs(90));

    sleep(Duration::from_secs(89)).await;
    assert!(sink.health().is_empty());

    sleep(Duration::from_secs(2)).await;
    let health = sink.health();
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].time_to_live, Duration::from_secs(180));

    handle.shutdown().await;
    std::fs::remove_file(path).ok();
}

#[tokio::test(start_paused = true)]
async fn malformed_reload_keeps_previous_interval() {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let state = AppState::default();
    let sink = Arc::new(RecordingSink::default());
    let handle = runtime::build_reporter(&cfg, &state, sink.clone()).spawn();

    let path = write_config(
        "malformed",
        "version: 1\nhealth:\n  health_check_interval_seconds: often\n",
    );
    let err = runtime::reload_interval(path.to_str().unwrap(), &handle.control())
        .await
        .expect_err("must be rejected");
    assert_eq!(err.client_code().as_str(), "CONFIG_INVALID");

    let missing = runtime::reload_interval("/nonexistent/ballot.yaml", &handle.control()).await;
    assert!(missing.is_err());

    sleep(Duration::from_secs(31)).await;
    let health = sink.health();
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].time_to_live, Duration::from_secs(60));

    handle.shutdown().await;
    std::fs::remove_file(path).ok();
}

#[tokio::test(start_paused = true)]
async fn oversized_reload_is_rejected_and_reporter_keeps_running() {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let state = AppState::default();
    let sink = Arc::new(RecordingSink::default());
    let handle = runtime::build_reporter(&cfg, &state, sink.clone()).spawn();

    let path = write_config(
        "oversized",
        "version: 1\nhealth:\n  health_check_interval_seconds: 18000000000000000000\n",
    );
    let err = runtime::reload_interval(path.to_str().unwrap(), &handle.control())
        .await
        .expect_err("must be rejected");
    assert_eq!(err.client_code().as_str(), "CONFIG_INVALID");

    sleep(Duration::from_secs(31)).await;
    assert_eq!(sink.health().len(), 1);
    assert_eq!(sink.health()[0].time_to_live, Duration::from_secs(60));

    // The task is still alive and accepts commands.
    handle.reconfigure(Duration::from_secs(45)).await.unwrap();
    sleep(Duration::from_secs(46)).await;
    assert_eq!(sink.health().len(), 2);

    handle.shutdown().await;
    std::fs::remove_file(path).ok();
}

#[tokio::test(start_paused = true)]
async fn configured_upgrade_domain_forces_error() {
    let cfg = config::load_from_str(
        r#"
version: 1
health:
  forced_error_upgrade_domains: ["2", "3", "4"]
node:
  name: "node-3"
  upgrade_domain: "3"
"#,
    )
    .unwrap();
    let state = AppState::default();
    let sink = Arc::new(RecordingSink::default());
    let handle = runtime::build_reporter(&cfg, &state, sink.clone()).spawn();

    sleep(Duration::from_secs(31)).await;
    let states: Vec<_> = sink.health().iter().map(|s| s.state).collect();
    assert_eq!(states, vec![HealthState::Ok, HealthState::Error]);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn other_upgrade_domain_reports_ok_only() {
    let cfg = config::load_from_str(
        r#"
version: 1
health:
  forced_error_upgrade_domains: ["2", "3", "4"]
node:
  upgrade_domain: "0"
"#,
    )
    .unwrap();
    let state = AppState::default();
    let sink = Arc::new(RecordingSink::default());
    let handle = runtime::build_reporter(&cfg, &state, sink.clone()).spawn();

    sleep(Duration::from_secs(31)).await;
    let states: Vec<_> = sink.health().iter().map(|s| s.state).collect();
    assert_eq!(states, vec![HealthState::Ok]);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn unknown_upgrade_domain_skips_forced_error() {
    let cfg = config::load_from_str(
        "version: 1\nhealth:\n  forced_error_upgrade_domains: [\"2\"]\n",
    )
    .unwrap();
    let state = AppState::default();
    let sink = Arc::new(RecordingSink::default());
    let handle = runtime::build_reporter(&cfg, &state, sink.clone()).spawn();

    sleep(Duration::from_secs(31)).await;
    let states: Vec<_> = sink.health().iter().map(|s| s.state).collect();
    assert_eq!(states, vec![HealthState::Ok]);
    assert_eq!(sink.load().len(), 1);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn reporter_samples_the_shared_request_counter() {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let state = AppState::default();
    let sink = Arc::new(RecordingSink::default());
    let handle = runtime::build_reporter(&cfg, &state, sink.clone()).spawn();

    for _ in 0..60 {
        state.requests().record();
    }
    sleep(Duration::from_secs(31)).await;

    assert_eq!(sink.load()[0].value, 2);
    assert!(sink.health()[0].description.contains("Total requests: 60."));
    assert_eq!(state.metrics().load.get(&[("metric", "RPS")]), Some(2));

    handle.shutdown().await;
}
