//! Static Knowledge Base Adapter
//!
//! Keyword-matched notes used to enrich help and fallback replies.

use async_trait::async_trait;

use crate::ports::KnowledgeBase;

/// A note together with the keywords that surface it.
#[derive(Debug, Clone)]
struct Note {
    keywords: &'static [&'static str],
    text: &'static str,
}

const NOTES: &[Note] = &[
    Note {
        keywords: &["campaign", "send", "blast"],
        text: "Campaigns need a name, an audience, a template, and a schedule; \
               I can fill in defaults for everything except the name.",
    },
    Note {
        keywords: &["template", "email", "subject"],
        text: "Templates have a name, a subject line, and body content; \
               I will walk you through each one.",
    },
    Note {
        keywords: &["audience", "contacts", "subscribers"],
        text: "Audience groups are managed in the contacts screen; \
               ask me for audience stats to see group sizes.",
    },
    Note {
        keywords: &["schedule", "time", "when"],
        text: "Schedules accept phrases like 'tomorrow', 'next week', \
               or an exact date and time.",
    },
];

/// Knowledge base backed by a fixed note table
#[derive(Debug, Clone, Default)]
pub struct StaticKnowledgeBase;

impl StaticKnowledgeBase {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KnowledgeBase for StaticKnowledgeBase {
    async fn lookup(&self, utterance: &str) -> Vec<String> {
        let lowered = utterance.to_lowercase();
        NOTES
            .iter()
            .filter(|note| note.keywords.iter().any(|k| lowered.contains(k)))
            .map(|note| note.text.to_string())
            .collect()
    }
}
