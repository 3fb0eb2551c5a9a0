//! Audience Store Port - Interface for audience group statistics.

use async_trait::async_trait;

use crate::domain::conversation::AudienceStats;

/// Errors that can occur during audience store operations
#[derive(Debug, thiserror::Error)]
pub enum AudienceStoreError {
    #[error("Audience group not found: {0}")]
    GroupNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Port for reading audience group statistics
#[async_trait]
pub trait AudienceStore: Send + Sync {
    /// Total audience size and per-group breakdown.
    async fn stats(&self) -> Result<AudienceStats, AudienceStoreError>;

    /// Total number of audience members across all groups.
    async fn member_count(&self) -> Result<usize, AudienceStoreError>;
}
