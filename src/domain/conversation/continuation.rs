//! Contextual continuation resolution.
//!
//! When the previous assistant turn asked a specific question, a short
//! follow-up from the user is treated as the literal answer to that pending
//! slot instead of being re-classified from scratch.
//!
//! The pending slot travels two ways: preferred, as the machine-readable
//! marker the composer attaches to every clarification (the caller stores
//! it and passes it back next turn); fallback, re-derived here from the
//! previous assistant message's text. The fallback couples to the
//! composer's prompt phrasing, which therefore must stay stable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::turn::{last_assistant_turn, Turn};

/// The slot a clarification question is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingSlot {
    /// Template flow: waiting for the template's name.
    AwaitingName,
    /// Template flow: waiting for the subject line.
    AwaitingSubject,
    /// Template flow: waiting for the body content.
    AwaitingContent,
    /// Campaign flow: waiting for the target audience.
    AwaitingAudience,
}

/// Derives the pending slot from the previous assistant turn's text.
///
/// Checked in order: the name question is matched before "subject line"
/// because the full template clarification mentions both.
pub fn derive_pending(history: &[Turn], window: usize) -> Option<PendingSlot> {
    let text = last_assistant_turn(history, window)?.text.to_lowercase();

    if text.contains("what should we call it") {
        Some(PendingSlot::AwaitingName)
    } else if text.contains("subject line") {
        Some(PendingSlot::AwaitingSubject)
    } else if text.contains("content") && text.contains("template") {
        Some(PendingSlot::AwaitingContent)
    } else if text.contains("i still need") && text.contains("audience") {
        Some(PendingSlot::AwaitingAudience)
    } else {
        None
    }
}

/// Whether the current utterance qualifies as an answer to the pending
/// question rather than a fresh request.
pub fn accepts_answer(pending: PendingSlot, normalized: &str, short_reply_max: usize) -> bool {
    match pending {
        // The content answer may be arbitrarily long free text
        PendingSlot::AwaitingContent => true,
        PendingSlot::AwaitingSubject => normalized.chars().count() < short_reply_max,
        PendingSlot::AwaitingName | PendingSlot::AwaitingAudience => {
            normalized.chars().count() < short_reply_max
                && !normalized.contains("campaign")
                && !normalized.contains("template")
        }
    }
}

/// Strips one layer of surrounding quotes from a literal answer.
pub fn literal_answer(utterance: &str) -> String {
    let trimmed = utterance.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

// Recovery patterns for fields the assistant echoed in earlier turns.
// The composer's phrasing and these regexes must move together.
static TEMPLATE_NAME_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)template (?:named\s+)?"([^"]+)""#).expect("echo pattern"));
static SUBJECT_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)subject .*?will be "([^"]+)""#).expect("echo pattern"));
static CAMPAIGN_NAME_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)campaign "([^"]+)""#).expect("echo pattern"));
static CAMPAIGN_TEMPLATE_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)using template "([^"]+)""#).expect("echo pattern"));
static CAMPAIGN_SCHEDULE_ECHO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)scheduled for "([^"]+)""#).expect("echo pattern"));

// Inline structured declaration patterns, e.g.
// "the template name should be test, the subject line should be Hello"
static INLINE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)template name should be ([^,]+)").expect("inline pattern"));
static INLINE_SUBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)subject(?: line)? should be ([^,]+)").expect("inline pattern"));
static INLINE_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)content should be ["']?([^"',]+)["']?"#).expect("inline pattern")
});

/// Working state of a guided template creation, rebuilt each turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub content: Option<String>,
}

impl TemplateDraft {
    /// Recovers draft fields from inline declarations in the current
    /// utterance and from assistant echoes in recent history. Inline
    /// declarations win over history.
    pub fn recover(utterance: &str, history: &[Turn], window: usize) -> Self {
        let mut draft = Self {
            name: capture(&INLINE_NAME, utterance).map(|v| literal_answer(&v)),
            subject: capture(&INLINE_SUBJECT, utterance).map(|v| literal_answer(&v)),
            content: capture(&INLINE_CONTENT, utterance),
        };

        let start = history.len().saturating_sub(window);
        for turn in history[start..].iter().rev().filter(|t| t.is_assistant()) {
            if draft.name.is_none() {
                draft.name = capture(&TEMPLATE_NAME_ECHO, &turn.text);
            }
            if draft.subject.is_none() {
                draft.subject = capture(&SUBJECT_ECHO, &turn.text);
            }
        }

        draft
    }
}

/// Working state of a guided campaign creation, rebuilt each turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignDraft {
    pub name: Option<String>,
    pub template: Option<String>,
    pub schedule: Option<String>,
}

impl CampaignDraft {
    /// Recovers campaign fields from assistant echoes in recent history.
    pub fn recover(history: &[Turn], window: usize) -> Self {
        let mut draft = Self::default();
        let start = history.len().saturating_sub(window);
        for turn in history[start..].iter().rev().filter(|t| t.is_assistant()) {
            if draft.name.is_none() {
                draft.name = capture(&CAMPAIGN_NAME_ECHO, &turn.text);
            }
            if draft.template.is_none() {
                draft.template = capture(&CAMPAIGN_TEMPLATE_ECHO, &turn.text);
            }
            if draft.schedule.is_none() {
                draft.schedule = capture(&CAMPAIGN_SCHEDULE_ECHO, &turn.text);
            }
        }
        draft
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}
