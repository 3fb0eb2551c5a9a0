//! ProcessMessage - One full conversational turn.
//!
//! Runs the agent over the utterance, executes any proposed action, and
//! phrases the outcome. Execution failures become replies, not errors:
//! the user always gets a message back.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::conversation::{
    ActionOutcome, ActionRequest, ConversationAgent, Intent, PendingSlot, Slot, Turn,
};
use crate::ports::KnowledgeBase;

use super::ExecuteActionHandler;

/// Command carrying one user message and its conversational context.
#[derive(Debug, Clone)]
pub struct ProcessMessageCommand {
    pub message: String,
    pub history: Vec<Turn>,
    /// Marker returned by the previous turn, if the caller kept it.
    pub pending_slot: Option<PendingSlot>,
}

/// Result of a processed turn.
#[derive(Debug, Clone)]
pub struct ProcessMessageResult {
    pub message: String,
    pub intent: Intent,
    pub confidence: f32,
    pub slots: Vec<Slot>,
    pub action: Option<ActionRequest>,
    pub outcome: Option<ActionOutcome>,
    pub suggestions: Vec<String>,
    pub pending_slot: Option<PendingSlot>,
}

/// Handler for processing chat messages.
pub struct ProcessMessageHandler {
    agent: ConversationAgent,
    executor: ExecuteActionHandler,
    knowledge: Arc<dyn KnowledgeBase>,
}

impl ProcessMessageHandler {
    pub fn new(
        agent: ConversationAgent,
        executor: ExecuteActionHandler,
        knowledge: Arc<dyn KnowledgeBase>,
    ) -> Self {
        Self {
            agent,
            executor,
            knowledge,
        }
    }

    pub async fn handle(&self, cmd: ProcessMessageCommand) -> ProcessMessageResult {
        let result = self
            .agent
            .process(&cmd.message, &cmd.history, cmd.pending_slot);
        info!(
            intent = %result.intent,
            confidence = result.confidence,
            slots = result.slots.len(),
            "processed message"
        );

        let mut message = result.message;
        let mut confidence = result.confidence;
        let mut suggestions = result.suggestions;
        let mut outcome = None;

        if let Some(action) = &result.action {
            let executed = match self.executor.handle(action).await {
                Ok(out) => Ok(out),
                Err(err) => {
                    warn!(code = %err.code, error = %err.message, "action failed");
                    Err(err.message)
                }
            };
            let (composed, reported) = self.agent.report(action, &executed);
            message = composed.message;
            suggestions = composed.suggestions;
            confidence = reported;
            outcome = executed.ok();
        } else if matches!(result.intent, Intent::HelpRequest | Intent::Unknown) {
            let notes = self.knowledge.lookup(&cmd.message).await;
            if !notes.is_empty() {
                if let Some(composed) = self.agent.enrich(result.intent, &notes) {
                    message = composed.message;
                    suggestions = composed.suggestions;
                }
            }
        }

        ProcessMessageResult {
            message,
            intent: result.intent,
            confidence,
            slots: result.slots,
            action: result.action,
            outcome,
            suggestions,
            pending_slot: result.pending_slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAudienceStore, InMemoryCampaignStore, InMemoryTemplateStore, StaticKnowledgeBase,
    };

    fn handler() -> ProcessMessageHandler {
        ProcessMessageHandler::new(
            ConversationAgent::default(),
            ExecuteActionHandler::new(
                Arc::new(InMemoryCampaignStore::new()),
                Arc::new(InMemoryTemplateStore::new()),
                Arc::new(InMemoryAudienceStore::seeded()),
            ),
            Arc::new(StaticKnowledgeBase::new()),
        )
    }

    fn command(message: &str) -> ProcessMessageCommand {
        ProcessMessageCommand {
            message: message.to_string(),
            history: Vec::new(),
            pending_slot: None,
        }
    }

    #[tokio::test]
    async fn full_campaign_message_creates_and_reports() {
        let result = handler()
            .handle(command(
                "create campaign named 'Fall Promo' for 'VIP customers' \
                 using 'Promo Template' scheduled for 'tomorrow'",
            ))
            .await;

        assert_eq!(result.intent, Intent::CreateCampaign);
        assert!(matches!(result.outcome, Some(ActionOutcome::CampaignCreated(_))));
        assert!(result.message.contains("Fall Promo"));
        assert_eq!(result.confidence, 0.9);
    }

    #[tokio::test]
    async fn duplicate_campaign_reports_failure_with_raw_error() {
        let handler = handler();
        let text = "create campaign named 'Fall Promo' for 'VIP customers' using 'Promo Template'";
        handler.handle(command(text)).await;
        let result = handler.handle(command(text)).await;

        assert!(result.outcome.is_none());
        assert!(result.message.contains("I couldn't"));
        assert!(result.message.contains("already exists"));
        assert_eq!(result.confidence, 0.4);
    }

    #[tokio::test]
    async fn help_reply_is_enriched_with_notes() {
        let result = handler()
            .handle(command("help me with campaigns please"))
            .await;
        assert_eq!(result.intent, Intent::HelpRequest);
        assert!(result.message.contains("Campaigns need"));
    }

    #[tokio::test]
    async fn greeting_is_not_enriched_or_executed() {
        let result = handler().handle(command("hello")).await;
        assert_eq!(result.intent, Intent::Greeting);
        assert!(result.action.is_none());
        assert!(result.outcome.is_none());
    }
}
