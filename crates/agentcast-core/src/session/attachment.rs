//! Folding an attached artifact into the query text.

use tracing::warn;

use crate::storage::artifact_store::ArtifactStore;

/// Append the contents of `filename` to `query`, or a note explaining why
/// it could not be read.
///
/// Never fails: an unreadable attachment degrades to a note the agent can
/// see, and the session carries on.
pub async fn augment_query<S: ArtifactStore>(store: &S, query: &str, filename: &str) -> String {
    match store.read(filename).await {
        Ok(content) => {
            format!("{query}\n\n--- Attached File: {filename} ---\n{content}\n--- End of File ---")
        }
        Err(e) => {
            warn!(filename, error = %e, "could not read attached file");
            format!("{query}\n\n[Note: Could not read file {filename}: {e}]")
        }
    }
}
