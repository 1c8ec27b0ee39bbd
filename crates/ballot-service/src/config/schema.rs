use std::net::SocketAddr;
use std::time::Duration;

use ballot_core::error::{BallotError, Result};
use serde::Deserialize;

use crate::health::{clamp_interval, MAX_REPORT_INTERVAL};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub health: HealthSection,

    #[serde(default)]
    pub node: NodeSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BallotError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.service.validate()?;
        self.health.validate()?;

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            service: ServiceSection::default(),
            health: HealthSection::default(),
            node: NodeSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            BallotError::Config(format!("service.listen must be a socket address: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthSection {
    #[serde(
        default = "default_health_check_interval_seconds",
        alias = "HealthCheckIntervalSeconds"
    )]
    pub health_check_interval_seconds: u64,

    /// Upgrade domains on which the service reports a forced health error
    /// (canary rollback drill). Empty disables the check.
    #[serde(default)]
    pub forced_error_upgrade_domains: Vec<String>,
}

impl Default for HealthSection {
    fn default() -> Self {
        Self {
            health_check_interval_seconds: default_health_check_interval_seconds(),
            forced_error_upgrade_domains: Vec::new(),
        }
    }
}

impl HealthSection {
    pub fn validate(&self) -> Result<()> {
        if self.health_check_interval_seconds == 0 {
            return Err(BallotError::Config(
                "health.health_check_interval_seconds must be positive".into(),
            ));
        }
        if self.health_check_interval_seconds > MAX_REPORT_INTERVAL.as_secs() {
            return Err(BallotError::Config(format!(
                "health.health_check_interval_seconds must be at most {}",
                MAX_REPORT_INTERVAL.as_secs()
            )));
        }
        Ok(())
    }

    /// Reporting interval with the 30s floor (and one-day ceiling) applied.
    pub fn interval(&self) -> Duration {
        clamp_interval(Duration::from_secs(self.health_check_interval_seconds))
    }
}

fn default_health_check_interval_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSection {
    #[serde(default = "default_node_name")]
    pub name: String,

    #[serde(default)]
    pub upgrade_domain: Option<String>,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            name: default_node_name(),
            upgrade_domain: None,
        }
    }
}

fn default_node_name() -> String {
    "localhost".into()
}
