//! Knowledge Base Port - Contextual notes for help and fallback replies.
//!
//! Lookups only enrich response text; they never influence intent
//! classification or slot extraction.

use async_trait::async_trait;

/// Port for retrieving short notes relevant to an utterance
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Notes relevant to the utterance, most relevant first.
    ///
    /// An empty result is normal and means the reply goes out unenriched.
    async fn lookup(&self, utterance: &str) -> Vec<String>;
}
