//! juniper-agent server: conversational campaign assistant over HTTP.
//!
//! Logging: set `RUST_LOG=juniper_agent=debug` (or `info`, `warn`) to adjust
//! log output; defaults come from server configuration.

use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use juniper_agent::adapters::http::agent::{agent_router, AgentAppState};
use juniper_agent::adapters::memory::{
    InMemoryAudienceStore, InMemoryCampaignStore, InMemoryTemplateStore, StaticKnowledgeBase,
};
use juniper_agent::application::handlers::chat::{ExecuteActionHandler, ProcessMessageHandler};
use juniper_agent::config::AppConfig;
use juniper_agent::domain::conversation::ConversationAgent;
use juniper_agent::ports::{AudienceStore, CampaignStore, TemplateStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let campaigns: Arc<dyn CampaignStore> = Arc::new(InMemoryCampaignStore::new());
    let templates: Arc<dyn TemplateStore> =
        Arc::new(InMemoryTemplateStore::new().with_default_template().await);
    let audience: Arc<dyn AudienceStore> = Arc::new(InMemoryAudienceStore::seeded());

    let agent = ConversationAgent::new(config.agent.settings());
    let executor = ExecuteActionHandler::new(
        Arc::clone(&campaigns),
        Arc::clone(&templates),
        Arc::clone(&audience),
    );
    let process_message = Arc::new(ProcessMessageHandler::new(
        agent,
        executor,
        Arc::new(StaticKnowledgeBase::new()),
    ));

    let state = AgentAppState {
        process_message,
        campaigns,
        templates,
        audience,
    };

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins = config
            .server
            .cors_origins_list()
            .into_iter()
            .map(|origin| origin.parse::<axum::http::HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = agent_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr();
    info!(%addr, "starting juniper-agent server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
