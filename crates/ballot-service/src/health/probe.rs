//! Anomaly probes: environment checks that can add a forced error signal.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use ballot_core::error::{BallotError, Result};

use crate::config::NodeSection;

/// Where this instance is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub node_name: String,
    pub upgrade_domain: String,
}

/// Node identity lookup. In production this queries the hosting runtime and
/// can fail; the reporter only logs such failures.
#[async_trait]
pub trait NodeInfoSource: Send + Sync {
    async fn node_info(&self) -> Result<NodeInfo>;
}

/// Node identity taken from configuration.
#[derive(Debug, Clone)]
pub struct StaticNodeInfo {
    node_name: String,
    upgrade_domain: Option<String>,
}

impl StaticNodeInfo {
    pub fn new(node_name: impl Into<String>, upgrade_domain: Option<String>) -> Self {
        Self {
            node_name: node_name.into(),
            upgrade_domain,
        }
    }

    pub fn from_config(node: &NodeSection) -> Self {
        Self::new(node.name.clone(), node.upgrade_domain.clone())
    }
}

#[async_trait]
impl NodeInfoSource for StaticNodeInfo {
    async fn node_info(&self) -> Result<NodeInfo> {
        let upgrade_domain = self.upgrade_domain.clone().ok_or_else(|| {
            BallotError::Internal(format!(
                "upgrade domain unknown for node {}",
                self.node_name
            ))
        })?;
        Ok(NodeInfo {
            node_name: self.node_name.clone(),
            upgrade_domain,
        })
    }
}

/// Predicate evaluated once per reporting cycle; `true` adds an error signal.
#[async_trait]
pub trait AnomalyProbe: Send + Sync {
    async fn is_anomalous(&self) -> Result<bool>;
}

/// Anomalous while the node sits in one of the configured upgrade domains.
pub struct UpgradeDomainProbe {
    node: Arc<dyn NodeInfoSource>,
    domains: HashSet<String>,
}

impl UpgradeDomainProbe {
    pub fn new<I, S>(node: Arc<dyn NodeInfoSource>, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            node,
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AnomalyProbe for UpgradeDomainProbe {
    async fn is_anomalous(&self) -> Result<bool> {
        if self.domains.is_empty() {
            return Ok(false);
        }
        let info = self.node.node_info().await?;
        Ok(self.domains.contains(&info.upgrade_domain))
    }
}
