//! HTTP DTOs for agent endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{
    ActionOutcome, ActionRequest, Intent, PendingSlot, Role, Slot, Turn,
};
use crate::domain::foundation::Timestamp;

/// One prior turn as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnDto {
    pub role: Role,
    pub text: String,
}

impl TurnDto {
    pub fn into_turn(self) -> Turn {
        Turn {
            role: self.role,
            text: self.text,
            timestamp: Timestamp::now(),
        }
    }
}

/// Request body for POST /agent/messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<TurnDto>,
    /// Marker from the previous response, echoed back by the client.
    #[serde(default)]
    pub pending_slot: Option<PendingSlot>,
}

/// Response body for POST /agent/messages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub intent: Intent,
    pub confidence: f32,
    pub slots: Vec<Slot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ActionOutcome>,
    pub suggestions: Vec<String>,
    /// Machine-readable continuation marker; display text never carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_slot: Option<PendingSlot>,
}

/// Response body for GET /agent/status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub campaign_count: usize,
    pub template_count: usize,
    pub audience_count: usize,
    pub timestamp: String,
}

/// Standard error payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_defaults_optional_fields() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(request.message, "hello");
        assert!(request.history.is_empty());
        assert!(request.pending_slot.is_none());
    }

    #[test]
    fn pending_slot_round_trips_as_snake_case() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"message": "Big Sale", "pendingSlot": "awaiting_subject"}"#,
        )
        .unwrap();
        assert_eq!(request.pending_slot, Some(PendingSlot::AwaitingSubject));
    }

    #[test]
    fn chat_response_omits_empty_action() {
        let response = ChatResponse {
            message: "Hi".to_string(),
            intent: Intent::Greeting,
            confidence: 0.9,
            slots: vec![],
            action: None,
            outcome: None,
            suggestions: vec![],
            pending_slot: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("action"));
        assert!(!json.contains("pendingSlot"));
    }
}
