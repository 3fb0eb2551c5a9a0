//! Response composition.
//!
//! Deterministic templating of every user-facing message, plus the
//! suggested quick-replies the UI offers. Clarification prompts carry
//! their machine-readable pending-slot marker out-of-band, and their
//! phrasing doubles as the recovery format for the continuation
//! resolver's draft echoes, so wording changes here must be mirrored in
//! `continuation.rs`.

use super::action::{ActionOutcome, ActionRequest};
use super::continuation::PendingSlot;
use super::slots::SlotKind;

/// A composed reply: the message text, quick-reply suggestions, and the
/// slot the message is waiting on, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Composed {
    pub message: String,
    pub suggestions: Vec<String>,
    pub pending_slot: Option<PendingSlot>,
}

impl Composed {
    fn new(message: impl Into<String>, suggestions: &[&str]) -> Self {
        Self {
            message: message.into(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            pending_slot: None,
        }
    }

    fn pending(mut self, slot: PendingSlot) -> Self {
        self.pending_slot = Some(slot);
        self
    }
}

/// Confidence reported when an executed action failed. Deliberately lower
/// than any create/show intent confidence.
pub const FAILURE_CONFIDENCE: f32 = 0.4;

/// Confidence reported when an executed action succeeded.
pub const SUCCESS_CONFIDENCE: f32 = 0.9;

pub fn greeting() -> Composed {
    Composed::new(
        "Hello! I'm Juniper, your assistant for the RSVP system. I can help you \
         manage campaigns, create email templates, segment audiences, and check \
         system health. What would you like to work on today?",
        &[
            "Create a new campaign",
            "Show me my campaigns",
            "Create an email template",
            "Check system status",
        ],
    )
}

pub fn help(context_notes: &[String]) -> Composed {
    let mut message = String::from(
        "I can help you with:\n\n\
         - Campaign management: create, schedule, and monitor email campaigns\n\
         - Email templates: design and manage reusable templates\n\
         - Audience segmentation: organize your audience groups\n\
         - System monitoring: check record counts and health\n\n\
         What would you like to work on?",
    );
    append_notes(&mut message, context_notes);

    Composed::new(
        message,
        &[
            "Create a campaign for VIP customers",
            "Show me my templates",
            "Show audience stats",
        ],
    )
}

pub fn vague() -> Composed {
    Composed::new(
        "I'm not sure what you'd like me to do. Could you be more specific? \
         I can help with campaigns, templates, audience groups, or system status.",
        &["Create a campaign", "What can you do?", "Check system status"],
    )
}

pub fn unknown(context_notes: &[String]) -> Composed {
    let mut message = String::from(
        "I understand you want help, but I'm not sure exactly what you need. \
         Could you provide more details?",
    );
    append_notes(&mut message, context_notes);

    Composed::new(
        message,
        &["Create a campaign", "Show me campaigns", "What can you do?"],
    )
}

/// Clarification for a campaign missing its identifying name: asks for
/// every still-missing field, in declared order.
pub fn campaign_clarification(missing: &[SlotKind]) -> Composed {
    let mut message = String::from(
        "I'd be happy to help you create a campaign! To get started, I need \
         some details:\n",
    );
    for kind in missing {
        message.push_str(&format!("\n- {}: {}", kind.label(), field_question(*kind)));
    }
    message.push_str("\n\nCould you provide these?");

    Composed::new(
        message,
        &[
            "Create campaign named 'Summer Sale' for 'VIP customers' using 'Promo Template' scheduled for 'tomorrow'",
            "Show me existing templates first",
            "What information do you need?",
        ],
    )
}

/// Clarification for a campaign whose name is known: echoes the known
/// fields (in the recovery format) and lists only what is still needed.
pub fn campaign_partial_clarification(
    name: &str,
    template: Option<&str>,
    schedule: Option<&str>,
    missing: &[SlotKind],
) -> Composed {
    let mut message = format!("I have campaign \"{}\"", name);
    if let Some(template) = template {
        message.push_str(&format!(" using template \"{}\"", template));
    }
    if let Some(schedule) = schedule {
        message.push_str(&format!(" scheduled for \"{}\"", schedule));
    }
    let labels: Vec<&str> = missing.iter().map(|k| k.label()).collect();
    message.push_str(&format!(". I still need: {}.", labels.join(", ")));

    let pending = missing
        .contains(&SlotKind::AudienceGroup)
        .then_some(PendingSlot::AwaitingAudience);

    let composed = Composed::new(
        message,
        &["Send it to VIP customers", "Use the General audience"],
    );
    match pending {
        Some(slot) => composed.pending(slot),
        None => composed,
    }
}

/// Clarification for a template with no name: starts the guided flow.
pub fn template_clarification() -> Composed {
    Composed::new(
        "I'd be happy to create a template! I need a few details:\n\n\
         - Template name: what should we call it?\n\
         - Subject line: what should the email subject be?\n\
         - Content: what should the email say?\n\n\
         You can give them all at once, or just start with the name.",
        &[
            "Create a template named 'welcome'",
            "Show me existing templates",
        ],
    )
    .pending(PendingSlot::AwaitingName)
}

/// Asks for the subject line, echoing the name for draft recovery.
pub fn ask_subject(name: &str) -> Composed {
    Composed::new(
        format!(
            "Great! I'll create a template named \"{}\". What should the subject line be?",
            name
        ),
        &["Welcome to our event!", "Big news this week"],
    )
    .pending(PendingSlot::AwaitingSubject)
}

/// Asks for the content, echoing name and subject for draft recovery.
/// Must not contain the literal "subject line", which the fallback
/// derivation reads as the subject question.
pub fn ask_content(name: &str, subject: &str) -> Composed {
    Composed::new(
        format!(
            "Got it. The subject for template \"{}\" will be \"{}\". \
             What should the email content say?",
            name, subject
        ),
        &["A short welcome message", "Details about the upcoming event"],
    )
    .pending(PendingSlot::AwaitingContent)
}

/// Interim message while the caller executes an action.
pub fn executing(action: &ActionRequest) -> Composed {
    let message = match action {
        ActionRequest::CreateCampaign(params) => {
            format!("Creating campaign \"{}\" now...", params.name)
        }
        ActionRequest::CreateTemplate(params) => {
            format!("Creating template \"{}\" now...", params.name)
        }
        ActionRequest::ListCampaigns => "Fetching your campaigns...".to_string(),
        ActionRequest::ListTemplates => "Fetching your templates...".to_string(),
        ActionRequest::AudienceStats => "Fetching audience statistics...".to_string(),
        ActionRequest::SystemStatus => "Checking system status...".to_string(),
    };
    Composed::new(message, &["Show me my campaigns", "What can you do?"])
}

/// Phrases the outcome of an executed action.
///
/// Success includes the identifying fields of the records involved;
/// failure includes the underlying error text verbatim and reports
/// [`FAILURE_CONFIDENCE`] regardless of how confident classification was.
pub fn report(action: &ActionRequest, outcome: &Result<ActionOutcome, String>) -> (Composed, f32) {
    match outcome {
        Ok(outcome) => (report_success(outcome), SUCCESS_CONFIDENCE),
        Err(error) => (report_failure(action, error), FAILURE_CONFIDENCE),
    }
}

fn report_success(outcome: &ActionOutcome) -> Composed {
    match outcome {
        ActionOutcome::CampaignCreated(record) => Composed::new(
            format!(
                "Done! I've created your campaign.\n\n\
                 - Name: {}\n- Status: {}\n- Created: {}",
                record.name, record.status, record.created_at
            ),
            &["Show me all campaigns", "Create another campaign"],
        ),
        ActionOutcome::TemplateCreated(record) => Composed::new(
            format!(
                "Template \"{}\" is ready (id {}). You can use it in your next campaign.",
                record.name, record.id
            ),
            &["Create a campaign using it", "Show me my templates"],
        ),
        ActionOutcome::Campaigns(campaigns) => {
            if campaigns.is_empty() {
                return Composed::new(
                    "You don't have any campaigns yet. Would you like to create one?",
                    &["Create a new campaign", "Show me my templates"],
                );
            }
            let mut message = String::from("Here are your campaigns:\n");
            for (i, c) in campaigns.iter().enumerate() {
                message.push_str(&format!("\n{}. {} ({})", i + 1, c.name, c.status));
            }
            Composed::new(message, &["Create a new campaign", "Check system status"])
        }
        ActionOutcome::Templates(templates) => {
            if templates.is_empty() {
                return Composed::new(
                    "You don't have any templates yet. Would you like to create one?",
                    &["Create an email template"],
                );
            }
            let mut message = String::from("Here are your templates:\n");
            for (i, t) in templates.iter().enumerate() {
                message.push_str(&format!("\n{}. {}", i + 1, t.name));
            }
            Composed::new(message, &["Create a campaign", "Create another template"])
        }
        ActionOutcome::Audience(stats) => {
            let mut message = format!(
                "You have {} audience members across {} groups:\n",
                stats.total_audience,
                stats.groups.len()
            );
            for group in &stats.groups {
                message.push_str(&format!("\n- {}: {} members", group.name, group.member_count));
            }
            Composed::new(message, &["Create a campaign for a group", "Show campaigns"])
        }
        ActionOutcome::System(status) => Composed::new(
            format!(
                "Everything looks operational.\n\n\
                 - Campaigns: {}\n- Templates: {}\n- Audience members: {}\n- As of: {}",
                status.campaign_count,
                status.template_count,
                status.audience_count,
                status.timestamp
            ),
            &["Show me my campaigns", "Show audience stats"],
        ),
    }
}

fn report_failure(action: &ActionRequest, error: &str) -> Composed {
    let what = match action {
        ActionRequest::CreateCampaign(params) => format!("create campaign \"{}\"", params.name),
        ActionRequest::CreateTemplate(params) => format!("create template \"{}\"", params.name),
        ActionRequest::ListCampaigns => "fetch your campaigns".to_string(),
        ActionRequest::ListTemplates => "fetch your templates".to_string(),
        ActionRequest::AudienceStats => "fetch audience statistics".to_string(),
        ActionRequest::SystemStatus => "check system status".to_string(),
    };
    Composed::new(
        format!("I couldn't {}: {}. Please try again.", what, error),
        &["Try again", "Check system status"],
    )
}

fn field_question(kind: SlotKind) -> &'static str {
    match kind {
        SlotKind::CampaignName => "what should it be?",
        SlotKind::AudienceGroup => "which group is it for?",
        SlotKind::TemplateName => "which template should we use?",
        SlotKind::SchedulePhrase => "when should it be sent?",
        SlotKind::EmailAddress => "which address?",
        SlotKind::Integer => "how many?",
    }
}

fn append_notes(message: &mut String, notes: &[String]) {
    if notes.is_empty() {
        return;
    }
    message.push_str("\n\nThis might help:");
    for note in notes {
        message.push_str(&format!("\n- {}", note));
    }
}
