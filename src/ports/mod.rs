//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CampaignStore` - Campaign persistence
//! - `TemplateStore` - Email template persistence
//! - `AudienceStore` - Audience group statistics
//! - `KnowledgeBase` - Contextual notes for help/unknown replies

mod audience_store;
mod campaign_store;
mod knowledge_base;
mod template_store;

pub use audience_store::{AudienceStore, AudienceStoreError};
pub use campaign_store::{CampaignStore, CampaignStoreError, NewCampaign};
pub use knowledge_base::KnowledgeBase;
pub use template_store::{NewTemplate, TemplateStore, TemplateStoreError};
