//! Slot (entity) extraction over per-kind ordered rule tables.
//!
//! Each slot kind carries its own ordered list of regex rules with declared
//! constant confidences. Extraction is first-match-wins per kind: the first
//! rule whose match passes validation supplies the slot, and later rules
//! never clobber it. Rules run against the original utterance so quoting
//! and casing survive into slot values; keyword gates consult the
//! normalized copy.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The kinds of typed information the agent extracts from user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    CampaignName,
    TemplateName,
    AudienceGroup,
    SchedulePhrase,
    EmailAddress,
    Integer,
}

impl SlotKind {
    /// All kinds in declaration order, which is also extraction order.
    pub const ALL: [SlotKind; 6] = [
        SlotKind::CampaignName,
        SlotKind::TemplateName,
        SlotKind::AudienceGroup,
        SlotKind::SchedulePhrase,
        SlotKind::EmailAddress,
        SlotKind::Integer,
    ];

    /// Human-readable label used in clarification prompts.
    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::CampaignName => "Campaign name",
            SlotKind::TemplateName => "Email template",
            SlotKind::AudienceGroup => "Target audience",
            SlotKind::SchedulePhrase => "Schedule",
            SlotKind::EmailAddress => "Email address",
            SlotKind::Integer => "Number",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SlotKind::CampaignName => "campaign_name",
            SlotKind::TemplateName => "template_name",
            SlotKind::AudienceGroup => "audience_group",
            SlotKind::SchedulePhrase => "schedule_phrase",
            SlotKind::EmailAddress => "email_address",
            SlotKind::Integer => "integer",
        };
        write!(f, "{}", s)
    }
}

/// A typed piece of information extracted from an utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: SlotKind,
    pub value: String,
    pub confidence: f32,
    pub matched_span: String,
}

impl Slot {
    pub fn new(
        kind: SlotKind,
        value: impl Into<String>,
        confidence: f32,
        matched_span: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            confidence,
            matched_span: matched_span.into(),
        }
    }
}

/// Returns the first slot of the given kind, if present.
pub fn find_slot(slots: &[Slot], kind: SlotKind) -> Option<&Slot> {
    slots.iter().find(|s| s.kind == kind)
}

/// One row of a per-kind extraction table.
struct SlotRule {
    kind: SlotKind,
    pattern: Regex,
    confidence: f32,
    /// Truncate loose captures at the first stop word (the regex crate has
    /// no lookahead, so bounding happens here instead of in the pattern).
    clip: bool,
    /// Rule applies only when the normalized utterance contains this word.
    keyword_gate: Option<&'static str>,
}

impl SlotRule {
    fn new(kind: SlotKind, confidence: f32, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("invalid slot pattern"),
            confidence,
            clip: false,
            keyword_gate: None,
        }
    }

    fn clipped(mut self) -> Self {
        self.clip = true;
        self
    }

    fn gated(mut self, keyword: &'static str) -> Self {
        self.keyword_gate = Some(keyword);
        self
    }
}

static RULES: Lazy<Vec<SlotRule>> = Lazy::new(|| {
    use SlotKind::*;
    vec![
        // campaign_name: prefer quoted captures
        SlotRule::new(CampaignName, 0.9, r#"(?i)(?:named|called|titled)\s+['"]([^'"]+)['"]"#)
            .gated("campaign"),
        SlotRule::new(CampaignName, 0.85, r#"(?i)campaign\s+['"]([^'"]+)['"]"#),
        SlotRule::new(CampaignName, 0.85, r#"(?i)['"]([^'"]+)['"]\s+campaign"#),
        SlotRule::new(
            CampaignName,
            0.7,
            r"(?i)campaign\s+(?:named|called|titled)\s+([A-Za-z0-9][A-Za-z0-9 ]*)",
        )
        .clipped(),
        SlotRule::new(
            CampaignName,
            0.6,
            r"(?i)(?:named|called|titled)\s+([A-Za-z0-9][A-Za-z0-9 ]*)",
        )
        .clipped()
        .gated("campaign"),
        // template_name
        SlotRule::new(TemplateName, 0.9, r#"(?i)(?:using|with)\s+['"]([^'"]+)['"]"#),
        SlotRule::new(TemplateName, 0.85, r#"(?i)template\s+['"]([^'"]+)['"]"#),
        SlotRule::new(TemplateName, 0.8, r#"(?i)(?:named|called|titled)\s+['"]([^'"]+)['"]"#)
            .gated("template"),
        SlotRule::new(
            TemplateName,
            0.7,
            r"(?i)template\s+(?:named|called|titled)\s+([A-Za-z0-9][A-Za-z0-9 ]*)",
        )
        .clipped(),
        SlotRule::new(
            TemplateName,
            0.55,
            r"(?i)using\s+(?:the\s+)?([A-Za-z0-9][A-Za-z0-9 ]*)",
        )
        .clipped(),
        // audience_group
        SlotRule::new(
            AudienceGroup,
            0.85,
            r#"(?i)(?:for|audience|target(?:ing)?)\s+['"]([^'"]+)['"]"#,
        ),
        SlotRule::new(
            AudienceGroup,
            0.7,
            r"(?i)(?:for|to)\s+(?:the\s+)?([A-Za-z][A-Za-z ]*?(?:customers|clients|members|subscribers|users|attendees))",
        ),
        SlotRule::new(
            AudienceGroup,
            0.5,
            r"(?i)\b(vip|customers|clients|members|subscribers)\b",
        ),
        // schedule_phrase
        SlotRule::new(
            SchedulePhrase,
            0.9,
            r#"(?i)(?:scheduled?\s+(?:for|at|on)|schedule)\s+['"]([^'"]+)['"]"#,
        ),
        SlotRule::new(
            SchedulePhrase,
            0.85,
            r"(?i)\b(tomorrow|today|tonight|next week|next month|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        ),
        SlotRule::new(SchedulePhrase, 0.85, r"(?i)\b(\d{1,2}:\d{2}\s*(?:am|pm)?)\b"),
        SlotRule::new(
            SchedulePhrase,
            0.6,
            r"(?i)(?:scheduled?\s+(?:for|at|on)|schedule)\s+([A-Za-z0-9][A-Za-z0-9: ]*)",
        )
        .clipped(),
        // email_address (RFC-lite)
        SlotRule::new(
            EmailAddress,
            0.95,
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        ),
        // integer
        SlotRule::new(Integer, 0.9, r"\b\d+\b"),
    ]
});

/// Words a loose capture is truncated at.
const STOP_WORDS: [&str; 12] = [
    "for", "using", "with", "scheduled", "schedule", "to", "on", "at", "and", "that", "targeting",
    "tomorrow",
];

/// Words that cannot stand alone as a slot value after clipping.
const FILLER_WORDS: [&str; 7] = ["a", "an", "the", "my", "this", "it", "new"];

/// Captures never accepted as a schedule value, even when a loose rule's
/// capture group would include them.
const SCHEDULE_EXCLUSIONS: [&str; 4] = ["campaign", "template", "audience", "capable"];

/// Relative-date words an audience capture must not be.
const SCHEDULE_WORDS: [&str; 13] = [
    "tomorrow",
    "today",
    "tonight",
    "next week",
    "next month",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "now",
];

/// Extracts typed slots from an utterance, at most one per kind.
///
/// `original` preserves casing and quoting for slot values; `normalized` is
/// only consulted for keyword gates. Re-running on the same input yields
/// identical slots.
pub fn extract(original: &str, normalized: &str) -> Vec<Slot> {
    let mut slots: Vec<Slot> = Vec::new();

    for kind in SlotKind::ALL {
        let accepted = RULES
            .iter()
            .filter(|rule| rule.kind == kind)
            .find_map(|rule| try_rule(rule, original, normalized));
        if let Some(slot) = accepted {
            slots.push(slot);
        }
    }

    slots
}

fn try_rule(rule: &SlotRule, original: &str, normalized: &str) -> Option<Slot> {
    if let Some(keyword) = rule.keyword_gate {
        if !normalized.contains(keyword) {
            return None;
        }
    }

    let caps = rule.pattern.captures(original)?;
    let span = caps.get(0)?.as_str();
    let raw = caps.get(1).map(|m| m.as_str()).unwrap_or(span);

    // Exclusions apply to the raw capture, before any clipping
    let raw = raw.trim();
    if !is_acceptable(rule.kind, raw) {
        return None;
    }

    let value = if rule.clip {
        clip_at_stop_word(raw)
    } else {
        raw.to_string()
    };
    if value.is_empty() || is_filler(&value) {
        return None;
    }

    Some(Slot::new(rule.kind, value, rule.confidence, span))
}

fn clip_at_stop_word(capture: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for word in capture.split_whitespace() {
        if STOP_WORDS.contains(&word.to_lowercase().as_str()) {
            break;
        }
        kept.push(word);
    }
    kept.join(" ")
}

fn is_filler(value: &str) -> bool {
    value
        .split_whitespace()
        .all(|word| FILLER_WORDS.contains(&word.to_lowercase().as_str()))
}

fn is_acceptable(kind: SlotKind, value: &str) -> bool {
    let lower = value.to_lowercase();
    match kind {
        SlotKind::SchedulePhrase => !SCHEDULE_EXCLUSIONS
            .iter()
            .any(|excluded| lower.contains(excluded)),
        // "scheduled for tomorrow" must not read as an audience of "tomorrow"
        SlotKind::AudienceGroup => !SCHEDULE_WORDS.contains(&lower.as_str()),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::normalizer::normalize;

    fn extract_text(text: &str) -> Vec<Slot> {
        extract(text, &normalize(text))
    }

    fn value_of(slots: &[Slot], kind: SlotKind) -> Option<String> {
        find_slot(slots, kind).map(|s| s.value.clone())
    }

    #[test]
    fn quoted_campaign_name_is_extracted() {
        let slots = extract_text("create a campaign named 'Fall Promo'");
        assert_eq!(
            value_of(&slots, SlotKind::CampaignName),
            Some("Fall Promo".to_string())
        );
    }

    #[test]
    fn full_create_utterance_yields_all_four_slots() {
        let slots = extract_text(
            "create campaign named 'Fall Promo' for 'VIP customers' using 'Promo Template' scheduled for 'tomorrow'",
        );
        assert_eq!(
            value_of(&slots, SlotKind::CampaignName),
            Some("Fall Promo".to_string())
        );
        assert_eq!(
            value_of(&slots, SlotKind::AudienceGroup),
            Some("VIP customers".to_string())
        );
        assert_eq!(
            value_of(&slots, SlotKind::TemplateName),
            Some("Promo Template".to_string())
        );
        assert_eq!(
            value_of(&slots, SlotKind::SchedulePhrase),
            Some("tomorrow".to_string())
        );
    }

    #[test]
    fn unquoted_create_utterance_clips_at_stop_words() {
        let slots = extract_text(
            "create campaign named Fall Promo for VIP customers using Promo Template scheduled for tomorrow",
        );
        assert_eq!(
            value_of(&slots, SlotKind::CampaignName),
            Some("Fall Promo".to_string())
        );
        assert_eq!(
            value_of(&slots, SlotKind::AudienceGroup),
            Some("VIP customers".to_string())
        );
        assert_eq!(
            value_of(&slots, SlotKind::TemplateName),
            Some("Promo Template".to_string())
        );
        assert_eq!(
            value_of(&slots, SlotKind::SchedulePhrase),
            Some("tomorrow".to_string())
        );
    }

    #[test]
    fn first_match_wins_over_later_quoted_strings() {
        let slots =
            extract_text("create a campaign named 'First Promo' or maybe named 'Second Promo'");
        assert_eq!(
            value_of(&slots, SlotKind::CampaignName),
            Some("First Promo".to_string())
        );
    }

    #[test]
    fn bare_create_yields_no_slots() {
        let slots = extract_text("create a campaign");
        assert!(slots.is_empty());
    }

    #[test]
    fn schedule_exclusions_reject_domain_nouns() {
        // "schedule a campaign" must not produce a schedule of "a campaign"
        let slots = extract_text("schedule a campaign");
        assert!(find_slot(&slots, SlotKind::SchedulePhrase).is_none());
    }

    #[test]
    fn scheduled_for_tomorrow_is_not_an_audience() {
        let slots = extract_text("create campaign named 'X' scheduled for 'tomorrow'");
        assert!(find_slot(&slots, SlotKind::AudienceGroup).is_none());
        assert_eq!(
            value_of(&slots, SlotKind::SchedulePhrase),
            Some("tomorrow".to_string())
        );
    }

    #[test]
    fn email_address_is_extracted() {
        let slots = extract_text("send a test to alex@example.com");
        assert_eq!(
            value_of(&slots, SlotKind::EmailAddress),
            Some("alex@example.com".to_string())
        );
    }

    #[test]
    fn integer_is_extracted() {
        let slots = extract_text("limit it to 50 recipients");
        assert_eq!(value_of(&slots, SlotKind::Integer), Some("50".to_string()));
    }

    #[test]
    fn time_of_day_is_a_schedule() {
        let slots = extract_text("send it at 14:30");
        assert_eq!(
            value_of(&slots, SlotKind::SchedulePhrase),
            Some("14:30".to_string())
        );
    }

    #[test]
    fn template_named_does_not_leak_into_campaign_name() {
        let slots = extract_text("create a template named 'Welcome'");
        assert!(find_slot(&slots, SlotKind::CampaignName).is_none());
        assert_eq!(
            value_of(&slots, SlotKind::TemplateName),
            Some("Welcome".to_string())
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extraction_is_idempotent(text in "[ -~]{0,120}") {
                let normalized = normalize(&text);
                let first = extract(&text, &normalized);
                let second = extract(&text, &normalized);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn at_most_one_slot_per_kind(text in "[ -~]{0,120}") {
                let slots = extract(&text, &normalize(&text));
                for kind in SlotKind::ALL {
                    prop_assert!(slots.iter().filter(|s| s.kind == kind).count() <= 1);
                }
            }
        }
    }
}
