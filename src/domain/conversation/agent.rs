//! The conversation agent.
//!
//! A pure function of `(utterance, history, pending slot)`: classification,
//! slot extraction, the sufficiency gate, and continuation resolution all
//! happen in one synchronous `process` call with no I/O. Whatever action
//! the agent proposes is executed by the caller, who then asks the agent
//! to phrase the outcome.

use super::action::{ActionRequest, ActionOutcome, CreateCampaignParams, CreateTemplateParams};
use super::composer::{self, Composed};
use super::continuation::{
    accepts_answer, derive_pending, literal_answer, CampaignDraft, PendingSlot, TemplateDraft,
};
use super::intent::{classify, Intent};
use super::normalizer::normalize;
use super::schedule;
use super::slots::{extract, find_slot, Slot, SlotKind};
use super::sufficiency::{evaluate, Sufficiency};
use super::turn::Turn;

/// Tuning knobs for the agent, threaded in from configuration.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// How many trailing turns of history participate in continuation
    /// resolution and draft recovery.
    pub history_window: usize,
    /// Maximum length for a reply to count as a continuation answer.
    pub short_reply_max_chars: usize,
    /// Audience used when a campaign omits one.
    pub default_audience: String,
    /// Template reference used when a campaign omits one.
    pub default_template: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            history_window: 6,
            short_reply_max_chars: 100,
            default_audience: "General".to_string(),
            default_template: "default-template".to_string(),
        }
    }
}

/// Everything one `process` call produces.
#[derive(Debug, Clone)]
pub struct AgentResult {
    pub message: String,
    pub intent: Intent,
    pub confidence: f32,
    pub slots: Vec<Slot>,
    pub action: Option<ActionRequest>,
    pub suggestions: Vec<String>,
    /// Marker the caller should store and pass back on the next turn.
    pub pending_slot: Option<PendingSlot>,
}

/// Confidence for continuation answers; the previous question makes the
/// interpretation near-certain.
const CONTINUATION_CONFIDENCE: f32 = 0.95;

/// Confidence reported alongside clarification prompts.
const CLARIFICATION_CONFIDENCE: f32 = 0.7;

/// Stateless conversation agent for the RSVP campaign system.
#[derive(Debug, Clone, Default)]
pub struct ConversationAgent {
    settings: AgentSettings,
}

impl ConversationAgent {
    pub fn new(settings: AgentSettings) -> Self {
        Self { settings }
    }

    /// Processes one user utterance against the rolling history window.
    ///
    /// `pending` is the marker from the previous turn's result, if the
    /// caller kept it; without it the pending slot is re-derived from the
    /// previous assistant message. Never fails on user input: malformed or
    /// empty text yields an `unknown` result.
    pub fn process(
        &self,
        utterance: &str,
        history: &[Turn],
        pending: Option<PendingSlot>,
    ) -> AgentResult {
        let normalized = normalize(utterance);
        if normalized.trim().is_empty() {
            return result(composer::unknown(&[]), Intent::Unknown, 0.0, vec![], None);
        }

        let slots = extract(utterance, &normalized);

        let pending = pending.or_else(|| derive_pending(history, self.settings.history_window));
        if let Some(slot) = pending {
            if accepts_answer(slot, &normalized, self.settings.short_reply_max_chars) {
                return self.continue_flow(slot, utterance, history, slots);
            }
        }

        let (intent, confidence) = classify(&normalized, &slots);
        match intent {
            Intent::Greeting => result(composer::greeting(), intent, confidence, slots, None),
            Intent::HelpRequest => result(composer::help(&[]), intent, confidence, slots, None),
            Intent::VagueRequest => result(composer::vague(), intent, confidence, slots, None),
            Intent::Unknown => result(composer::unknown(&[]), intent, confidence, slots, None),
            Intent::CreateCampaign => self.handle_create_campaign(intent, confidence, slots),
            Intent::CreateTemplate => self.handle_create_template(utterance, history, confidence, slots),
            Intent::ShowCampaigns => emit(ActionRequest::ListCampaigns, intent, confidence, slots),
            Intent::ShowTemplates => emit(ActionRequest::ListTemplates, intent, confidence, slots),
            Intent::ShowAudience => emit(ActionRequest::AudienceStats, intent, confidence, slots),
            Intent::SystemStatus => emit(ActionRequest::SystemStatus, intent, confidence, slots),
        }
    }

    /// Phrases the outcome of an action the caller executed.
    ///
    /// Returns the composed reply and the confidence to report, which on
    /// failure is lower than the intent-classification confidence was.
    pub fn report(
        &self,
        action: &ActionRequest,
        outcome: &Result<ActionOutcome, String>,
    ) -> (Composed, f32) {
        composer::report(action, outcome)
    }

    /// Re-composes help/unknown replies with knowledge-base notes.
    ///
    /// Enrichment only changes response text; it never affects the
    /// classification that already happened.
    pub fn enrich(&self, intent: Intent, notes: &[String]) -> Option<Composed> {
        match intent {
            Intent::HelpRequest => Some(composer::help(notes)),
            Intent::Unknown => Some(composer::unknown(notes)),
            _ => None,
        }
    }

    fn handle_create_campaign(
        &self,
        intent: Intent,
        confidence: f32,
        slots: Vec<Slot>,
    ) -> AgentResult {
        match evaluate(intent, &slots) {
            Sufficiency::Sufficient => {
                let action = self.build_campaign_action(&slots);
                emit(action, intent, confidence, slots)
            }
            Sufficiency::Missing(missing) => {
                let composed = match find_slot(&slots, SlotKind::CampaignName) {
                    Some(name) => composer::campaign_partial_clarification(
                        &name.value,
                        find_slot(&slots, SlotKind::TemplateName).map(|s| s.value.as_str()),
                        find_slot(&slots, SlotKind::SchedulePhrase).map(|s| s.value.as_str()),
                        &missing,
                    ),
                    None => composer::campaign_clarification(&missing),
                };
                result(composed, intent, CLARIFICATION_CONFIDENCE, slots, None)
            }
            Sufficiency::NotApplicable => unreachable!("create_campaign declares a policy"),
        }
    }

    fn handle_create_template(
        &self,
        utterance: &str,
        history: &[Turn],
        confidence: f32,
        slots: Vec<Slot>,
    ) -> AgentResult {
        let mut draft = TemplateDraft::recover(utterance, history, self.settings.history_window);
        if draft.name.is_none() {
            draft.name = find_slot(&slots, SlotKind::TemplateName).map(|s| s.value.clone());
        }

        let intent = Intent::CreateTemplate;
        match (&draft.name, &draft.subject, &draft.content) {
            (None, _, _) => result(
                composer::template_clarification(),
                intent,
                CLARIFICATION_CONFIDENCE,
                slots,
                None,
            ),
            (Some(name), None, _) => {
                result(composer::ask_subject(name), intent, confidence, slots, None)
            }
            (Some(name), Some(subject), None) => result(
                composer::ask_content(name, subject),
                intent,
                confidence,
                slots,
                None,
            ),
            (Some(name), Some(subject), Some(content)) => {
                let action = ActionRequest::CreateTemplate(CreateTemplateParams::from_content(
                    name, subject, content,
                ));
                emit(action, intent, confidence, slots)
            }
        }
    }

    fn continue_flow(
        &self,
        pending: PendingSlot,
        utterance: &str,
        history: &[Turn],
        slots: Vec<Slot>,
    ) -> AgentResult {
        let answer = literal_answer(utterance);

        match pending {
            PendingSlot::AwaitingName => result(
                composer::ask_subject(&answer),
                Intent::CreateTemplate,
                CONTINUATION_CONFIDENCE,
                slots,
                None,
            ),
            PendingSlot::AwaitingSubject => {
                let draft = TemplateDraft::recover(utterance, history, self.settings.history_window);
                let name = draft.name.unwrap_or_else(|| "Untitled Template".to_string());
                result(
                    composer::ask_content(&name, &answer),
                    Intent::CreateTemplate,
                    CONTINUATION_CONFIDENCE,
                    slots,
                    None,
                )
            }
            PendingSlot::AwaitingContent => {
                let draft = TemplateDraft::recover(utterance, history, self.settings.history_window);
                let name = draft.name.unwrap_or_else(|| "Untitled Template".to_string());
                let subject = draft
                    .subject
                    .unwrap_or_else(|| format!("Subject for {}", name));
                let content = utterance.trim();
                let action = ActionRequest::CreateTemplate(CreateTemplateParams::from_content(
                    &name, &subject, content,
                ));
                emit(action, Intent::CreateTemplate, CONTINUATION_CONFIDENCE, slots)
            }
            PendingSlot::AwaitingAudience => {
                let draft = CampaignDraft::recover(history, self.settings.history_window);
                match draft.name {
                    Some(name) => {
                        let schedule_at =
                            draft.schedule.as_deref().and_then(schedule::resolve_phrase);
                        let action = ActionRequest::CreateCampaign(CreateCampaignParams {
                            name,
                            audience_group: answer,
                            template_ref: draft
                                .template
                                .unwrap_or_else(|| self.settings.default_template.clone()),
                            schedule_phrase: draft.schedule,
                            schedule_at,
                        });
                        emit(action, Intent::CreateCampaign, CONTINUATION_CONFIDENCE, slots)
                    }
                    // The echo was lost from the window; start over
                    None => {
                        let missing = match evaluate(Intent::CreateCampaign, &slots) {
                            Sufficiency::Missing(missing) => missing,
                            _ => vec![SlotKind::CampaignName],
                        };
                        result(
                            composer::campaign_clarification(&missing),
                            Intent::CreateCampaign,
                            CLARIFICATION_CONFIDENCE,
                            slots,
                            None,
                        )
                    }
                }
            }
        }
    }

    fn build_campaign_action(&self, slots: &[Slot]) -> ActionRequest {
        let schedule_phrase =
            find_slot(slots, SlotKind::SchedulePhrase).map(|s| s.value.clone());
        let schedule_at = schedule_phrase
            .as_deref()
            .and_then(schedule::resolve_phrase);

        ActionRequest::CreateCampaign(CreateCampaignParams {
            // The gate guarantees the name slot is present
            name: find_slot(slots, SlotKind::CampaignName)
                .map(|s| s.value.clone())
                .unwrap_or_default(),
            audience_group: find_slot(slots, SlotKind::AudienceGroup)
                .map(|s| s.value.clone())
                .unwrap_or_else(|| self.settings.default_audience.clone()),
            template_ref: find_slot(slots, SlotKind::TemplateName)
                .map(|s| s.value.clone())
                .unwrap_or_else(|| self.settings.default_template.clone()),
            schedule_phrase,
            schedule_at,
        })
    }
}

fn result(
    composed: Composed,
    intent: Intent,
    confidence: f32,
    slots: Vec<Slot>,
    action: Option<ActionRequest>,
) -> AgentResult {
    AgentResult {
        message: composed.message,
        intent,
        confidence,
        slots,
        action,
        suggestions: composed.suggestions,
        pending_slot: composed.pending_slot,
    }
}

fn emit(action: ActionRequest, intent: Intent, confidence: f32, slots: Vec<Slot>) -> AgentResult {
    let composed = composer::executing(&action);
    result(composed, intent, confidence, slots, Some(action))
}
