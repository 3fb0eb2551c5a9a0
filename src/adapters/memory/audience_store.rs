//! In-Memory Audience Store Adapter

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::{AudienceGroupStats, AudienceStats};
use crate::ports::{AudienceStore, AudienceStoreError};

/// In-memory audience group membership counts
#[derive(Debug, Clone)]
pub struct InMemoryAudienceStore {
    groups: Arc<RwLock<Vec<AudienceGroupStats>>>,
}

impl InMemoryAudienceStore {
    pub fn new(groups: Vec<AudienceGroupStats>) -> Self {
        Self {
            groups: Arc::new(RwLock::new(groups)),
        }
    }

    /// A small fixed audience for development setups.
    pub fn seeded() -> Self {
        Self::new(vec![
            AudienceGroupStats {
                name: "General".to_string(),
                member_count: 120,
            },
            AudienceGroupStats {
                name: "VIP customers".to_string(),
                member_count: 25,
            },
            AudienceGroupStats {
                name: "Newsletter subscribers".to_string(),
                member_count: 310,
            },
        ])
    }
}

impl Default for InMemoryAudienceStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl AudienceStore for InMemoryAudienceStore {
    async fn stats(&self) -> Result<AudienceStats, AudienceStoreError> {
        let groups = self.groups.read().await.clone();
        let total_audience = groups.iter().map(|g| g.member_count).sum();
        Ok(AudienceStats {
            total_audience,
            groups,
        })
    }

    async fn member_count(&self) -> Result<usize, AudienceStoreError> {
        let groups = self.groups.read().await;
        Ok(groups.iter().map(|g| g.member_count).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stats_totals_across_groups() {
        let store = InMemoryAudienceStore::seeded();
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.groups.len(), 3);
        assert_eq!(stats.total_audience, 455);
        assert_eq!(store.member_count().await.unwrap(), 455);
    }

    #[tokio::test]
    async fn empty_store_reports_zero() {
        let store = InMemoryAudienceStore::default();
        assert_eq!(store.member_count().await.unwrap(), 0);
    }
}
