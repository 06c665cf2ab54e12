//! Artifact types for agentcast.
//!
//! Artifacts are files generated by agents or uploaded by clients, stored
//! flat in a single directory.

use serde::{Deserialize, Serialize};

/// Maximum size accepted for a single artifact upload (50 MB).
pub const MAX_ARTIFACT_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Result of storing an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    pub filename: String,
    pub path: String,
}
