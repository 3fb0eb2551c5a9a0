//! In-memory adapters.
//!
//! Back the stores with `tokio::sync::RwLock`-guarded vectors. Useful
//! for development and tests; nothing survives a restart.

mod audience_store;
mod campaign_store;
mod knowledge_base;
mod template_store;

pub use audience_store::InMemoryAudienceStore;
pub use campaign_store::InMemoryCampaignStore;
pub use knowledge_base::StaticKnowledgeBase;
pub use template_store::InMemoryTemplateStore;
