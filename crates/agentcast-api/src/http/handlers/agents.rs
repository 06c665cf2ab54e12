//! Agent listing and one-shot invocation.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use agentcast_core::dispatch::NO_RESPONSE_TEXT;
use agentcast_types::agent::AgentKind;
use agentcast_types::session::DEFAULT_SESSION_ID;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestClock};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AgentList {
    pub agents: Vec<AgentKind>,
}

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub agent: AgentKind,
    pub content: String,
}

/// GET /api/v1/agents - Advertised agent identifiers.
pub async fn list_agents(State(state): State<AppState>) -> Json<ApiResponse<AgentList>> {
    let clock = RequestClock::start();
    let body = AgentList {
        agents: state.registry.kinds(),
    };
    Json(clock.success(body).with_link("self", "/api/v1/agents"))
}

/// POST /api/v1/run/{agent_type} - Run an agent and return its whole answer.
pub async fn run_agent(
    State(state): State<AppState>,
    Path(agent_type): Path<String>,
    Json(body): Json<RunRequest>,
) -> Result<Json<ApiResponse<RunResponse>>, AppError> {
    let clock = RequestClock::start();

    let (kind, agent) = state.registry.resolve(&agent_type)?;
    if body.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }
    let session_id = body
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    tracing::info!(agent = %kind, session_id = %session_id, "run request");
    let response = state.dispatcher.invoke(agent, body.query, session_id).await?;

    let content = response
        .content
        .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());
    Ok(Json(clock.success(RunResponse { agent: kind, content })))
}
