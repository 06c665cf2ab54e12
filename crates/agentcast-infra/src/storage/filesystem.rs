//! Local filesystem artifact store.
//!
//! Implements the `ArtifactStore` trait from `agentcast-core` with every
//! artifact stored directly under one directory:
//!
//! ```text
//! {base_dir}/
//!   report.csv
//!   notes.txt
//! ```
//!
//! Subdirectories are never created and are ignored when listing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use agentcast_core::storage::artifact_store::{ArtifactStore, validate_filename};
use agentcast_types::artifact::MAX_ARTIFACT_SIZE_BYTES;
use agentcast_types::error::ArtifactError;

/// Flat directory of artifacts.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    base_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create the directory if needed and return the store.
    pub async fn open(base_dir: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let store = Self::new(base_dir);
        tokio::fs::create_dir_all(&store.base_dir)
            .await
            .map_err(|e| ArtifactError::Io(format!("failed to create artifacts dir: {e}")))?;
        Ok(store)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a validated name to its path on disk.
    fn file_path(&self, filename: &str) -> Result<PathBuf, ArtifactError> {
        validate_filename(filename)?;
        Ok(self.base_dir.join(filename))
    }
}

fn map_io(filename: &str, err: std::io::Error) -> ArtifactError {
    match err.kind() {
        ErrorKind::NotFound => ArtifactError::NotFound(filename.to_string()),
        _ => ArtifactError::Io(err.to_string()),
    }
}

impl ArtifactStore for LocalArtifactStore {
    async fn read(&self, filename: &str) -> Result<String, ArtifactError> {
        let bytes = self.read_bytes(filename).await?;
        String::from_utf8(bytes).map_err(|_| ArtifactError::NotText(filename.to_string()))
    }

    async fn read_bytes(&self, filename: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.file_path(filename)?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| map_io(filename, e))?;
        if !metadata.is_file() {
            return Err(ArtifactError::NotFound(filename.to_string()));
        }

        tokio::fs::read(&path).await.map_err(|e| map_io(filename, e))
    }

    async fn write(&self, filename: &str, data: &[u8]) -> Result<PathBuf, ArtifactError> {
        if data.len() as u64 > MAX_ARTIFACT_SIZE_BYTES {
            return Err(ArtifactError::TooLarge {
                size: data.len() as u64,
                max: MAX_ARTIFACT_SIZE_BYTES,
            });
        }
        let path = self.file_path(filename)?;

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| ArtifactError::Io(format!("failed to create artifacts dir: {e}")))?;
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| ArtifactError::Io(format!("failed to write {filename}: {e}")))?;

        tracing::debug!(filename, size = data.len(), "artifact stored");
        Ok(path)
    }

    async fn list(&self) -> Result<Vec<String>, ArtifactError> {
        let mut entries = match tokio::fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ArtifactError::Io(e.to_string())),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ArtifactError::Io(e.to_string()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store() -> (TempDir, LocalArtifactStore) {
        let tmp = TempDir::new().unwrap();
        let store = LocalArtifactStore::open(tmp.path().join("tmp")).await.unwrap();
        (tmp, store)
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (_tmp, store) = store().await;
        let path = store.write("notes.txt", b"hello\nworld").await.unwrap();

        assert_eq!(path, store.base_dir().join("notes.txt"));
        assert_eq!(store.read("notes.txt").await.unwrap(), "hello\nworld");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let (_tmp, store) = store().await;
        store.write("a.txt", b"one").await.unwrap();
        store.write("a.txt", b"two").await.unwrap();
        assert_eq!(store.read("a.txt").await.unwrap(), "two");
    }

    #[tokio::test]
    async fn test_read_missing() {
        let (_tmp, store) = store().await;
        let err = store.read("missing.txt").await.unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(ref name) if name == "missing.txt"));
    }

    #[tokio::test]
    async fn test_read_binary_as_text_fails() {
        let (_tmp, store) = store().await;
        store.write("blob.bin", &[0xff, 0xfe, 0x00]).await.unwrap();

        assert!(matches!(
            store.read("blob.bin").await,
            Err(ArtifactError::NotText(_))
        ));
        assert_eq!(store.read_bytes("blob.bin").await.unwrap(), vec![0xff, 0xfe, 0x00]);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let (tmp, store) = store().await;
        tokio::fs::write(tmp.path().join("secret.txt"), b"s").await.unwrap();

        for name in ["../secret.txt", "sub/x.txt", ".."] {
            assert!(matches!(
                store.read(name).await,
                Err(ArtifactError::InvalidName(_))
            ));
            assert!(matches!(
                store.write(name, b"x").await,
                Err(ArtifactError::InvalidName(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_size_limit() {
        let (_tmp, store) = store().await;
        let data = vec![0u8; (MAX_ARTIFACT_SIZE_BYTES + 1) as usize];
        let err = store.write("big.bin", &data).await.unwrap_err();
        assert!(matches!(err, ArtifactError::TooLarge { .. }));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_sorted_files_only() {
        let (_tmp, store) = store().await;
        store.write("b.csv", b"1").await.unwrap();
        store.write("a.txt", b"2").await.unwrap();
        tokio::fs::create_dir(store.base_dir().join("subdir")).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["a.txt", "b.csv"]);
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(tmp.path().join("never-created"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_directory_is_not_readable_as_artifact() {
        let (_tmp, store) = store().await;
        tokio::fs::create_dir(store.base_dir().join("subdir")).await.unwrap();
        assert!(matches!(
            store.read("subdir").await,
            Err(ArtifactError::NotFound(_))
        ));
    }
}
