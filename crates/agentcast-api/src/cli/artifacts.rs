//! Artifact directory listing.

use anyhow::Result;
use console::style;

use agentcast_core::storage::artifact_store::ArtifactStore;

use crate::state::AppState;

pub async fn list_artifacts(state: &AppState, json: bool) -> Result<()> {
    let files = state.artifacts.list().await?;

    if json {
        let out = serde_json::json!({ "files": files });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("── Artifacts ──").dim(),
        style(state.artifacts.base_dir().display()).dim()
    );
    if files.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for file in &files {
        println!("  {file}");
    }
    println!();
    Ok(())
}
