//! Agent listing and one-shot runs from the terminal.

use anyhow::Result;
use console::style;

use agentcast_core::dispatch::NO_RESPONSE_TEXT;
use agentcast_types::session::DEFAULT_SESSION_ID;

use crate::state::AppState;

/// Print the registered agents with their display names.
pub fn list_agents(state: &AppState, json: bool) -> Result<()> {
    let kinds = state.registry.kinds();

    if json {
        let agents: Vec<serde_json::Value> = kinds
            .iter()
            .filter_map(|kind| {
                let agent = state.registry.get(*kind)?;
                Some(serde_json::json!({
                    "agent_type": kind.as_str(),
                    "name": agent.name(),
                }))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&agents)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("── Agents ──").dim());
    for kind in kinds {
        let Some(agent) = state.registry.get(kind) else {
            continue;
        };
        println!(
            "  {:<10} {}",
            style(kind.as_str()).cyan().bold(),
            style(agent.name()).dim()
        );
    }
    println!();
    println!(
        "  Provider: {} ({})",
        style(&state.provider_name).bold(),
        state.config.model.model_id
    );
    println!();
    Ok(())
}

/// Run `agent_type` on `query` and print the whole answer.
pub async fn run_agent(
    state: &AppState,
    agent_type: &str,
    query: String,
    session: Option<String>,
    json: bool,
) -> Result<()> {
    let (kind, agent) = state.registry.resolve(agent_type)?;
    if query.trim().is_empty() {
        anyhow::bail!("query must not be empty");
    }
    let session_id = session.unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    tracing::info!(agent = %kind, session_id = %session_id, "running agent from CLI");
    let response = state.dispatcher.invoke(agent, query, session_id).await?;
    let content = response
        .content
        .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());

    if json {
        let out = serde_json::json!({
            "agent": kind.as_str(),
            "content": content,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{content}");
    }
    Ok(())
}
