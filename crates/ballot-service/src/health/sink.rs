use async_trait::async_trait;

use ballot_core::error::Result;

use super::signal::{HealthSignal, LoadSample};

/// Destination for health and load reports (the hosting runtime's health
/// manager in production). Calls are not retried by the reporter.
#[async_trait]
pub trait HealthSink: Send + Sync {
    async fn report_health(&self, signal: &HealthSignal) -> Result<()>;
    async fn report_load(&self, samples: &[LoadSample]) -> Result<()>;
}

/// Writes every report as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl HealthSink for TracingSink {
    async fn report_health(&self, signal: &HealthSignal) -> Result<()> {
        tracing::info!(
            target: "ballot::health",
            source = signal.source_id,
            property = signal.property,
            state = signal.state.as_str(),
            ttl_secs = signal.time_to_live.as_secs(),
            remove_when_expired = signal.remove_when_expired,
            seq = signal.sequence_number,
            "{}",
            signal.description
        );
        Ok(())
    }

    async fn report_load(&self, samples: &[LoadSample]) -> Result<()> {
        for s in samples {
            tracing::info!(target: "ballot::health", metric = s.name, value = s.value, "load report");
        }
        Ok(())
    }
}
