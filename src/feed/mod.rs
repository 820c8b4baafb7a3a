//! Reference data feed.
//!
//! The explicit repository seam in front of the "remote" source of zones and
//! alerts. The shipped implementation serves the built-in reference dataset
//! after an artificial delay; a real backend integration would provide
//! another implementation of the same trait.

pub mod dataset;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{EmergencyAlert, EmergencyZone};

/// One full fetch result: both collections, replacing whatever is held.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub zones: Vec<EmergencyZone>,
    pub alerts: Vec<EmergencyAlert>,
}

/// Capability trait for the remote zones/alerts source.
#[async_trait]
pub trait ReferenceFeed: Send + Sync {
    /// Fetch a fresh snapshot of both collections.
    async fn fetch(&self) -> Result<FeedSnapshot, AppError>;
}

/// Feed backed by the built-in reference dataset, with a configurable
/// artificial delay standing in for network latency.
pub struct StaticFeed {
    delay: Duration,
}

impl StaticFeed {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ReferenceFeed for StaticFeed {
    async fn fetch(&self) -> Result<FeedSnapshot, AppError> {
        tokio::time::sleep(self.delay).await;

        Ok(FeedSnapshot {
            zones: dataset::reference_zones(),
            alerts: dataset::reference_alerts(),
        })
    }
}

/// Feed that always fails, for exercising the cache fallback path.
#[cfg(test)]
pub struct FailingFeed;

#[cfg(test)]
#[async_trait]
impl ReferenceFeed for FailingFeed {
    async fn fetch(&self) -> Result<FeedSnapshot, AppError> {
        Err(AppError::Internal("Reference feed unavailable".to_string()))
    }
}
