//! In-Memory Campaign Store Adapter

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::conversation::CampaignRecord;
use crate::domain::foundation::Timestamp;
use crate::ports::{CampaignStore, CampaignStoreError, NewCampaign};

/// In-memory storage for campaigns
#[derive(Debug, Clone, Default)]
pub struct InMemoryCampaignStore {
    campaigns: Arc<RwLock<Vec<CampaignRecord>>>,
}

impl InMemoryCampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored campaigns (useful for tests)
    pub async fn clear(&self) {
        self.campaigns.write().await.clear();
    }
}

#[async_trait]
impl CampaignStore for InMemoryCampaignStore {
    async fn create(&self, campaign: NewCampaign) -> Result<CampaignRecord, CampaignStoreError> {
        let mut campaigns = self.campaigns.write().await;
        if campaigns
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&campaign.name))
        {
            return Err(CampaignStoreError::DuplicateName(campaign.name));
        }

        let status = if campaign.scheduled_at.is_some() {
            "scheduled"
        } else {
            "draft"
        };
        let record = CampaignRecord {
            id: Uuid::new_v4().to_string(),
            name: campaign.name,
            status: status.to_string(),
            created_at: Timestamp::now(),
        };
        campaigns.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<CampaignRecord>, CampaignStoreError> {
        Ok(self.campaigns.read().await.clone())
    }

    async fn count(&self) -> Result<usize, CampaignStoreError> {
        Ok(self.campaigns.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let store = InMemoryCampaignStore::new();
        let record = store
            .create(NewCampaign {
                name: "Fall Promo".to_string(),
                audience_group: "VIP".to_string(),
                template_ref: "promo".to_string(),
                scheduled_at: Some(Timestamp::now()),
            })
            .await
            .unwrap();

        assert_eq!(record.status, "scheduled");
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Fall Promo");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected_case_insensitively() {
        let store = InMemoryCampaignStore::new();
        let new = |name: &str| NewCampaign {
            name: name.to_string(),
            audience_group: "General".to_string(),
            template_ref: "default-template".to_string(),
            scheduled_at: None,
        };
        store.create(new("Fall Promo")).await.unwrap();
        let err = store.create(new("fall promo")).await.unwrap_err();
        assert!(matches!(err, CampaignStoreError::DuplicateName(_)));
    }
}
