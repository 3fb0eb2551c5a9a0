//! Axum routes for agent endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_status, post_message, AgentAppState};

/// Creates routes for agent endpoints.
///
/// REST Endpoints:
/// - POST /agent/messages - Process one user message
/// - GET /agent/status - Storage counts and liveness
pub fn agent_routes() -> Router<AgentAppState> {
    Router::new()
        .route("/agent/messages", post(post_message))
        .route("/agent/status", get(get_status))
}

/// Combined router with all agent routes under /api.
pub fn agent_router() -> Router<AgentAppState> {
    Router::new().nest("/api", agent_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_routes_creates_valid_router() {
        let _routes = agent_routes();
    }

    #[test]
    fn agent_router_creates_combined_router() {
        let _router = agent_router();
    }
}
