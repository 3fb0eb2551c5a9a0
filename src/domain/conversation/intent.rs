//! Intent classification over an ordered rule table.
//!
//! Each rule declares its patterns and a base confidence. Rules are
//! evaluated in declaration order; a later rule only displaces the current
//! winner with strictly greater confidence, so ties keep the earlier rule
//! and classification is fully deterministic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::slots::{Slot, SlotKind};

/// Closed set of intents the agent recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    HelpRequest,
    CreateCampaign,
    CreateTemplate,
    ShowCampaigns,
    ShowTemplates,
    ShowAudience,
    SystemStatus,
    VagueRequest,
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Intent::Greeting => "greeting",
            Intent::HelpRequest => "help_request",
            Intent::CreateCampaign => "create_campaign",
            Intent::CreateTemplate => "create_template",
            Intent::ShowCampaigns => "show_campaigns",
            Intent::ShowTemplates => "show_templates",
            Intent::ShowAudience => "show_audience",
            Intent::SystemStatus => "system_status",
            Intent::VagueRequest => "vague_request",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// One row of the classification table.
struct IntentRule {
    intent: Intent,
    patterns: Vec<Regex>,
    confidence: f32,
}

impl IntentRule {
    fn new(intent: Intent, confidence: f32, patterns: &[&str]) -> Self {
        Self {
            intent,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("invalid intent pattern"))
                .collect(),
            confidence,
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Declaration order doubles as tie-break order.
static RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    vec![
        IntentRule::new(
            Intent::Greeting,
            0.9,
            &[
                r"^hello\b",
                r"^hi\b",
                r"^hey\b",
                r"^good (morning|afternoon|evening)\b",
                r"^greetings\b",
                r"^how.*(going|are you)",
            ],
        ),
        IntentRule::new(
            Intent::HelpRequest,
            0.8,
            &[
                r"\bhelp\b",
                r"what can you do",
                r"\bcapabilit",
                r"\bassist\b",
                r"\bguide\b",
                r"can you.*help",
            ],
        ),
        IntentRule::new(
            Intent::CreateCampaign,
            0.8,
            &[
                r"create.*\bcampaign",
                r"\bnew\b.*\bcampaign",
                r"\bcampaign\b.*\bcreate",
                r"send.*promotional",
            ],
        ),
        IntentRule::new(
            Intent::CreateTemplate,
            0.8,
            &[
                r"create.*\btemplate",
                r"\bnew\b.*\btemplate",
                r"design.*\btemplate",
                r"\btemplate\b.*\bcreate",
            ],
        ),
        IntentRule::new(
            Intent::ShowCampaigns,
            0.8,
            &[
                r"show.*\bcampaign",
                r"list.*\bcampaign",
                r"what.*\bcampaigns\b",
                r"\bmy campaigns\b",
                r"campaigns?\b.*\bhave\b",
            ],
        ),
        IntentRule::new(
            Intent::ShowTemplates,
            0.8,
            &[
                r"show.*\btemplate",
                r"list.*\btemplate",
                r"what.*\btemplates\b",
                r"\bmy templates\b",
                r"templates?\b.*\bhave\b",
            ],
        ),
        IntentRule::new(
            Intent::ShowAudience,
            0.8,
            &[
                r"show.*\baudience",
                r"list.*\baudience",
                r"audience.*(data|stats)",
                r"\bmy audience\b",
                r"how many.*(contacts|members|audience)",
            ],
        ),
        IntentRule::new(
            Intent::SystemStatus,
            0.7,
            &[
                r"system.*status",
                r"\bstatus\b",
                r"\bhealth\b",
                r"is.*working",
                r"everything.*working",
            ],
        ),
        IntentRule::new(
            Intent::VagueRequest,
            0.6,
            &[
                r"^\?$",
                r"do something",
                r"what is this",
                r"show (me )?everything",
                r"not sure.*what",
            ],
        ),
    ]
});

/// Confidence ceiling applied by the slot-presence boost.
const BOOST_CAP: f32 = 0.95;
const BOOST: f32 = 0.1;

/// Classifies a normalized utterance against the rule table.
///
/// Already-extracted slots disambiguate the two create intents: a detected
/// name slot of the matching kind boosts confidence, capped at 0.95.
/// An empty utterance is `unknown` with confidence 0.
pub fn classify(normalized: &str, slots: &[Slot]) -> (Intent, f32) {
    let text = normalized.trim();
    if text.is_empty() {
        return (Intent::Unknown, 0.0);
    }

    let mut best = Intent::Unknown;
    let mut best_confidence = 0.0_f32;

    for rule in RULES.iter() {
        if rule.confidence > best_confidence && rule.matches(text) {
            best = rule.intent;
            best_confidence = rule.confidence;
        }
    }

    let boosted = match best {
        Intent::CreateCampaign if has_kind(slots, SlotKind::CampaignName) => true,
        Intent::CreateTemplate if has_kind(slots, SlotKind::TemplateName) => true,
        _ => false,
    };
    if boosted {
        best_confidence = (best_confidence + BOOST).min(BOOST_CAP);
    }

    (best, best_confidence)
}

fn has_kind(slots: &[Slot], kind: SlotKind) -> bool {
    slots.iter().any(|s| s.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::normalizer::normalize;

    fn classify_text(text: &str) -> (Intent, f32) {
        classify(&normalize(text), &[])
    }

    #[test]
    fn empty_utterance_is_unknown_with_zero_confidence() {
        assert_eq!(classify("", &[]), (Intent::Unknown, 0.0));
        assert_eq!(classify("   ", &[]), (Intent::Unknown, 0.0));
    }

    #[test]
    fn hello_is_greeting() {
        let (intent, confidence) = classify_text("hello");
        assert_eq!(intent, Intent::Greeting);
        assert!(confidence >= 0.85);
    }

    #[test]
    fn single_question_mark_is_vague() {
        let (intent, _) = classify_text("?");
        assert_eq!(intent, Intent::VagueRequest);
    }

    #[test]
    fn create_campaign_matches() {
        let (intent, _) = classify_text("create a campaign");
        assert_eq!(intent, Intent::CreateCampaign);
    }

    #[test]
    fn show_campaigns_matches_with_synonym() {
        let (intent, _) = classify_text("show me my campaigns");
        assert_eq!(intent, Intent::ShowCampaigns);
    }

    #[test]
    fn gibberish_is_unknown() {
        let (intent, confidence) = classify_text("xyzzy plugh quux");
        assert_eq!(intent, Intent::Unknown);
        assert!(confidence <= 0.5);
    }

    #[test]
    fn competing_matches_keep_earlier_declared_rule() {
        // Satisfies both create_campaign and show_campaigns at equal
        // confidence; the earlier-declared rule must win every time.
        let text = normalize("create a campaign and show campaigns");
        let first = classify(&text, &[]);
        for _ in 0..10 {
            assert_eq!(classify(&text, &[]), first);
        }
        assert_eq!(first.0, Intent::CreateCampaign);
    }

    #[test]
    fn name_slot_boosts_create_campaign() {
        let slots = vec![Slot::new(
            SlotKind::CampaignName,
            "Fall Promo",
            0.9,
            "named 'Fall Promo'",
        )];
        let (_, plain) = classify("create a campaign", &[]);
        let (intent, boosted) = classify("create a campaign", &slots);
        assert_eq!(intent, Intent::CreateCampaign);
        assert!(boosted > plain);
        assert!(boosted <= BOOST_CAP);
    }

    #[test]
    fn status_keyword_matches_system_status() {
        let (intent, _) = classify_text("status");
        assert_eq!(intent, Intent::SystemStatus);
    }
}
