//! HTTP surface for the conversation agent.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse, ErrorResponse, StatusResponse, TurnDto};
pub use handlers::AgentAppState;
pub use routes::{agent_router, agent_routes};
