use std::time::Duration;

/// Reporting source for every signal this service emits.
pub const SOURCE_ID: &str = "BallotServiceHealth";
/// Health property the heartbeat (and the forced error) are reported on.
pub const HEARTBEAT_PROPERTY: &str = "Heartbeat";
/// Load metric name for requests per second.
pub const RPS_METRIC: &str = "RPS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Ok,
    Error,
}

impl HealthState {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Ok => "ok",
            HealthState::Error => "error",
        }
    }
}

/// One health report, fire-and-forget to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthSignal {
    pub source_id: &'static str,
    pub property: &'static str,
    pub state: HealthState,
    pub description: String,
    /// How long downstream should trust this report before treating it as stale.
    pub time_to_live: Duration,
    /// Drop the report (instead of flagging it expired) once the TTL lapses.
    pub remove_when_expired: bool,
    /// Strictly increasing; a sink keeps the report with the highest number.
    pub sequence_number: u64,
}

impl HealthSignal {
    pub fn heartbeat(description: String, time_to_live: Duration, sequence_number: u64) -> Self {
        Self {
            source_id: SOURCE_ID,
            property: HEARTBEAT_PROPERTY,
            state: HealthState::Ok,
            description,
            time_to_live,
            remove_when_expired: false,
            sequence_number,
        }
    }

    /// Self-clearing error on the heartbeat property.
    pub fn forced_error(time_to_live: Duration, sequence_number: u64) -> Self {
        Self {
            source_id: SOURCE_ID,
            property: HEARTBEAT_PROPERTY,
            state: HealthState::Error,
            description: "Forced health error to trigger rollback.".to_string(),
            time_to_live,
            remove_when_expired: true,
            sequence_number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSample {
    pub name: &'static str,
    pub value: u64,
}

impl LoadSample {
    pub fn rps(value: u64) -> Self {
        Self {
            name: RPS_METRIC,
            value,
        }
    }
}
