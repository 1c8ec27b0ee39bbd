//! Periodic health & load reporter.
//!
//! One tokio task owns [`ReportState`] and alternates between waiting (for the
//! next tick or a control message) and running a cycle. Cycles run inline in
//! the task, so they never overlap; ticks missed during a slow cycle collapse
//! into a single catch-up tick. Control goes through a single channel: re-arm
//! with a new interval, or shut down.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use ballot_core::error::{BallotError, Result};
use ballot_core::RequestCounter;

use super::probe::AnomalyProbe;
use super::signal::{HealthSignal, LoadSample};
use super::sink::HealthSink;
use crate::obs::metrics::ServiceMetrics;

/// Reporting never runs more often than this.
pub const MIN_REPORT_INTERVAL: Duration = Duration::from_secs(30);
/// Reporting never waits longer than this between cycles.
pub const MAX_REPORT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

const CONTROL_QUEUE: usize = 8;

pub fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(MIN_REPORT_INTERVAL, MAX_REPORT_INTERVAL)
}

/// Throughput derived for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub total: u64,
    pub diff: u64,
    pub elapsed_secs: u64,
    pub rps: u64,
}

/// Counter sample from the previous cycle. Owned by the reporter task only.
#[derive(Debug)]
pub struct ReportState {
    last_count: u64,
    last_report: Instant,
    next_sequence: u64,
}

impl ReportState {
    pub fn new(last_count: u64, last_report: Instant, first_sequence: u64) -> Self {
        Self {
            last_count,
            last_report,
            next_sequence: first_sequence,
        }
    }

    /// Fold in a new counter sample taken at `now`.
    ///
    /// Elapsed time is counted in whole seconds with a floor of one, so two
    /// samples in the same second divide by one rather than zero.
    pub fn advance(&mut self, total: u64, now: Instant) -> CycleStats {
        let diff = total.saturating_sub(self.last_count);
        let elapsed_secs = now.saturating_duration_since(self.last_report).as_secs().max(1);
        let rps = diff / elapsed_secs;

        self.last_count = total;
        self.last_report = now;

        CycleStats {
            total,
            diff,
            elapsed_secs,
            rps,
        }
    }

    pub fn next_sequence(&mut self) -> u64 {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        seq
    }
}

#[derive(Debug)]
enum ReporterCommand {
    Reconfigure(Duration),
    Shutdown,
}

pub struct Reporter {
    requests: RequestCounter,
    sink: Arc<dyn HealthSink>,
    probe: Option<Arc<dyn AnomalyProbe>>,
    metrics: Arc<ServiceMetrics>,
    interval: Duration,
    state: ReportState,
}

impl Reporter {
    pub fn new(requests: RequestCounter, sink: Arc<dyn HealthSink>, interval: Duration) -> Self {
        let state = ReportState::new(requests.total(), Instant::now(), wall_clock_millis());
        Self {
            requests,
            sink,
            probe: None,
            metrics: Arc::new(ServiceMetrics::default()),
            interval: clamp_interval(interval),
            state,
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn AnomalyProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ServiceMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the reporting task. The first cycle runs one interval from now.
    pub fn spawn(self) -> ReporterHandle {
        let (tx, rx) = mpsc::channel(CONTROL_QUEUE);
        let task = tokio::spawn(self.run(rx));
        ReporterHandle {
            control: ReporterControl { tx },
            task,
        }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<ReporterCommand>) {
        let mut ticker = arm_ticker(self.interval);
        tracing::info!(interval_secs = self.interval.as_secs(), "health reporter started");

        loop {
            tokio::select! {
                biased;

                cmd = rx.recv() => match cmd {
                    Some(ReporterCommand::Reconfigure(interval)) => {
                        self.interval = clamp_interval(interval);
                        ticker = arm_ticker(self.interval);
                        tracing::info!(interval_secs = self.interval.as_secs(), "health reporter re-armed");
                    }
                    Some(ReporterCommand::Shutdown) | None => break,
                },
                _ = ticker.tick() => {
                    self.report_once().await;
                }
            }
        }

        tracing::info!("health reporter stopped");
    }

    /// Run one reporting cycle. Sink and probe failures are logged, never
    /// returned.
    pub async fn report_once(&mut self) -> CycleStats {
        let stats = self.state.advance(self.requests.total(), Instant::now());
        let ttl = self.interval.saturating_mul(2);

        tracing::debug!(
            total = stats.total,
            diff = stats.diff,
            elapsed_secs = stats.elapsed_secs,
            rps = stats.rps,
            "health cycle"
        );

        let heartbeat = HealthSignal::heartbeat(
            format!(
                "{} requests since last report. RPS: {} Total requests: {}.",
                stats.diff, stats.rps, stats.total
            ),
            ttl,
            self.state.next_sequence(),
        );
        self.emit_health(&heartbeat).await;
        self.emit_load(&[LoadSample::rps(stats.rps)]).await;

        if let Some(probe) = self.probe.clone() {
            match probe.is_anomalous().await {
                Ok(true) => {
                    let forced = HealthSignal::forced_error(ttl, self.state.next_sequence());
                    self.emit_health(&forced).await;
                }
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "anomaly probe failed; skipping forced error"),
            }
        }

        stats
    }

    async fn emit_health(&self, signal: &HealthSignal) {
        let outcome = match self.sink.report_health(signal).await {
            Ok(()) => "ok",
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    state = signal.state.as_str(),
                    seq = signal.sequence_number,
                    "health report failed"
                );
                "error"
            }
        };
        self.metrics
            .health_reports
            .inc(&[("state", signal.state.as_str()), ("outcome", outcome)]);
    }

    async fn emit_load(&self, samples: &[LoadSample]) {
        let outcome = match self.sink.report_load(samples).await {
            Ok(()) => "ok",
            Err(e) => {
                tracing::warn!(error = %e, "load report failed");
                "error"
            }
        };
        self.metrics.load_reports.inc(&[("outcome", outcome)]);
        for s in samples {
            self.metrics
                .load
                .set(&[("metric", s.name)], i64::try_from(s.value).unwrap_or(i64::MAX));
        }
    }
}

fn arm_ticker(period: Duration) -> Interval {
    let now = Instant::now();
    let start = now.checked_add(period).unwrap_or(now);
    let mut t = tokio::time::interval_at(start, period);
    t.set_missed_tick_behavior(MissedTickBehavior::Skip);
    t
}

fn wall_clock_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Cloneable sender half of the reporter's control channel.
#[derive(Clone, Debug)]
pub struct ReporterControl {
    tx: mpsc::Sender<ReporterCommand>,
}

impl ReporterControl {
    /// Re-arm the timer with a new interval (clamped to 30s..=24h). Counter state
    /// carries over.
    pub async fn reconfigure(&self, interval: Duration) -> Result<()> {
        self.tx
            .send(ReporterCommand::Reconfigure(interval))
            .await
            .map_err(|_| BallotError::Internal("health reporter stopped".into()))
    }
}

/// Owner of the running reporter task.
pub struct ReporterHandle {
    control: ReporterControl,
    task: JoinHandle<()>,
}

impl ReporterHandle {
    pub fn control(&self) -> ReporterControl {
        self.control.clone()
    }

    pub async fn reconfigure(&self, interval: Duration) -> Result<()> {
        self.control.reconfigure(interval).await
    }

    /// Stop the task and wait for it. An in-flight cycle finishes first; no
    /// cycle starts afterwards.
    pub async fn shutdown(self) {
        let _ = self.control.tx.send(ReporterCommand::Shutdown).await;
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "health reporter task ended abnormally");
        }
    }
}
