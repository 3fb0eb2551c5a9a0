//! HTTP handlers for agent endpoints.
//!
//! These handlers connect Axum routes to application layer operations.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::chat::{ProcessMessageCommand, ProcessMessageHandler};
use crate::domain::foundation::Timestamp;
use crate::ports::{AudienceStore, CampaignStore, TemplateStore};

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, StatusResponse};

/// Shared application state for agent handlers.
#[derive(Clone)]
pub struct AgentAppState {
    pub process_message: Arc<ProcessMessageHandler>,
    pub campaigns: Arc<dyn CampaignStore>,
    pub templates: Arc<dyn TemplateStore>,
    pub audience: Arc<dyn AudienceStore>,
}

/// POST /agent/messages - process one user message.
pub async fn post_message(
    State(state): State<AgentAppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let history = request
        .history
        .into_iter()
        .map(|turn| turn.into_turn())
        .collect();

    let result = state
        .process_message
        .handle(ProcessMessageCommand {
            message: request.message,
            history,
            pending_slot: request.pending_slot,
        })
        .await;

    Json(ChatResponse {
        message: result.message,
        intent: result.intent,
        confidence: result.confidence,
        slots: result.slots,
        action: result.action,
        outcome: result.outcome,
        suggestions: result.suggestions,
        pending_slot: result.pending_slot,
    })
}

/// GET /agent/status - storage counts and liveness.
pub async fn get_status(State(state): State<AgentAppState>) -> impl IntoResponse {
    let campaign_count = match state.campaigns.count().await {
        Ok(count) => count,
        Err(err) => return store_unavailable(err.to_string()),
    };
    let template_count = match state.templates.count().await {
        Ok(count) => count,
        Err(err) => return store_unavailable(err.to_string()),
    };
    let audience_count = match state.audience.member_count().await {
        Ok(count) => count,
        Err(err) => return store_unavailable(err.to_string()),
    };

    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "operational",
            campaign_count,
            template_count,
            audience_count,
            timestamp: Timestamp::now().to_rfc3339(),
        }),
    )
        .into_response()
}

fn store_unavailable(message: String) -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            code: "STORE_UNAVAILABLE".to_string(),
            message,
        }),
    )
        .into_response()
}
