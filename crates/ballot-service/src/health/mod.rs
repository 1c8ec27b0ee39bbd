//! Self-reported health and load.
//!
//! A single background task samples the request counter on a fixed interval,
//! derives requests-per-second, and pushes a heartbeat and an `RPS` load
//! metric to a [`HealthSink`]. An optional [`AnomalyProbe`] can add a
//! short-lived error signal (used for canary rollback drills).

pub mod probe;
pub mod reporter;
pub mod signal;
pub mod sink;

pub use probe::{AnomalyProbe, NodeInfo, NodeInfoSource, StaticNodeInfo, UpgradeDomainProbe};
pub use reporter::{
    clamp_interval, CycleStats, ReportState, Reporter, ReporterControl, ReporterHandle,
    MAX_REPORT_INTERVAL, MIN_REPORT_INTERVAL,
};
pub use signal::{HealthSignal, HealthState, LoadSample};
pub use sink::{HealthSink, TracingSink};
