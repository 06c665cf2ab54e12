//! Artifact store trait.
//!
//! A flat directory of files produced by agents or uploaded by clients.
//! The streaming session only ever calls [`ArtifactStore::read`].

use std::path::PathBuf;

use agentcast_types::error::ArtifactError;

/// Trait for flat artifact storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in agentcast-infra.
pub trait ArtifactStore: Send + Sync {
    /// Read an artifact as UTF-8 text.
    fn read(
        &self,
        filename: &str,
    ) -> impl std::future::Future<Output = Result<String, ArtifactError>> + Send;

    /// Read an artifact's raw bytes.
    fn read_bytes(
        &self,
        filename: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, ArtifactError>> + Send;

    /// Store an artifact, replacing any file with the same name.
    fn write(
        &self,
        filename: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf, ArtifactError>> + Send;

    /// List the names of all stored artifacts (regular files only).
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<String>, ArtifactError>> + Send;
}

/// Reject names that could escape the artifact directory.
pub fn validate_filename(filename: &str) -> Result<(), ArtifactError> {
    if filename.is_empty()
        || filename == "."
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains('\0')
    {
        return Err(ArtifactError::InvalidName(filename.to_string()));
    }
    Ok(())
}
