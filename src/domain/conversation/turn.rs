//! Turn entity for conversation history.
//!
//! Turns are immutable records of user/assistant exchanges. The agent never
//! owns history storage; the caller supplies the full prior window on every
//! call.

use crate::domain::foundation::Timestamp;
use serde::{Deserialize, Serialize};

/// Role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// User input.
    User,
    /// Assistant response.
    Assistant,
}

/// One immutable exchange unit in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The role of the author.
    pub role: Role,

    /// The literal utterance.
    pub text: String,

    /// When the turn was created.
    pub timestamp: Timestamp,
}

impl Turn {
    /// Creates a user turn stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Creates an assistant turn stamped now.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Returns true if this turn is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this turn is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Returns the most recent assistant turn within the last `window` turns.
pub fn last_assistant_turn(history: &[Turn], window: usize) -> Option<&Turn> {
    let start = history.len().saturating_sub(window);
    history[start..].iter().rev().find(|t| t.is_assistant())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_has_user_role() {
        let turn = Turn::user("hello");
        assert!(turn.is_user());
        assert!(!turn.is_assistant());
    }

    #[test]
    fn role_serializes_to_snake_case() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn last_assistant_turn_finds_most_recent() {
        let history = vec![
            Turn::assistant("first"),
            Turn::user("reply"),
            Turn::assistant("second"),
            Turn::user("another"),
        ];
        let found = last_assistant_turn(&history, 6).unwrap();
        assert_eq!(found.text, "second");
    }

    #[test]
    fn last_assistant_turn_respects_window() {
        let history = vec![
            Turn::assistant("too old"),
            Turn::user("a"),
            Turn::user("b"),
            Turn::user("c"),
        ];
        assert!(last_assistant_turn(&history, 3).is_none());
    }

    #[test]
    fn last_assistant_turn_empty_history() {
        assert!(last_assistant_turn(&[], 6).is_none());
    }
}
