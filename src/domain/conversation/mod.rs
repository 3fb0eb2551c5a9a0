//! Conversational campaign assistant domain.
//!
//! The pipeline runs normalization, slot extraction, intent classification,
//! continuation resolution, and response composition as pure functions over
//! the utterance and a rolling history window. [`ConversationAgent`] ties
//! them together; callers execute the [`ActionRequest`] it proposes and
//! feed the outcome back for phrasing.

pub mod action;
pub mod agent;
pub mod composer;
pub mod continuation;
pub mod intent;
pub mod normalizer;
pub mod schedule;
pub mod slots;
pub mod sufficiency;
pub mod turn;

pub use action::{
    ActionOutcome, ActionRequest, AudienceGroupStats, AudienceStats, CampaignRecord,
    CreateCampaignParams, CreateTemplateParams, Operation, SystemStatusReport, Target,
    TemplateRecord,
};
pub use agent::{AgentResult, AgentSettings, ConversationAgent};
pub use composer::Composed;
pub use continuation::PendingSlot;
pub use intent::Intent;
pub use slots::{Slot, SlotKind};
pub use turn::{Role, Turn};
