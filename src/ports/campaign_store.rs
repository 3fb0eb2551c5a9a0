//! Campaign Store Port - Interface for campaign persistence.

use async_trait::async_trait;

use crate::domain::conversation::CampaignRecord;
use crate::domain::foundation::Timestamp;

/// Errors that can occur during campaign store operations
#[derive(Debug, thiserror::Error)]
pub enum CampaignStoreError {
    #[error("Campaign not found: {0}")]
    NotFound(String),

    #[error("A campaign named '{0}' already exists")]
    DuplicateName(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// A campaign to be created.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub audience_group: String,
    pub template_ref: String,
    pub scheduled_at: Option<Timestamp>,
}

/// Port for persisting and listing campaigns
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Create a campaign, returning the stored record.
    ///
    /// # Errors
    /// Returns `DuplicateName` if a campaign with the same name exists.
    async fn create(&self, campaign: NewCampaign) -> Result<CampaignRecord, CampaignStoreError>;

    /// List all campaigns in creation order.
    async fn list(&self) -> Result<Vec<CampaignRecord>, CampaignStoreError>;

    /// Number of stored campaigns.
    async fn count(&self) -> Result<usize, CampaignStoreError>;
}
