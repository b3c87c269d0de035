//! Local filesystem seen-state storage.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{SeenFile, SeenState, SeenStore};

/// Seen-state stored as a single JSON file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSeenStore {
    path: PathBuf,
}

impl LocalSeenStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await
    }
}

#[async_trait]
impl SeenStore for LocalSeenStore {
    async fn load(&self) -> Result<SeenState> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SeenState::new());
            }
            Err(e) => {
                return Err(AppError::state_read(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let file: SeenFile = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::state_read(format!("corrupt state file {}: {}", self.path.display(), e))
        })?;
        Ok(file.boards)
    }

    async fn save(&self, state: &SeenState) -> Result<()> {
        let file = SeenFile::new(state.clone());
        let bytes = serde_json::to_vec_pretty(&file)
            .map_err(|e| AppError::state_write(format!("serialize failed: {e}")))?;

        self.write_bytes(&bytes).await.map_err(|e| {
            AppError::state_write(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn state_with(company: &str, ids: &[&str]) -> SeenState {
        let mut state = SeenState::new();
        state.insert(
            company.to_string(),
            ids.iter().map(|id| id.to_string()).collect::<BTreeSet<_>>(),
        );
        state
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_state() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSeenStore::new(tmp.path().join("seen.json"));

        let state = store.load().await.unwrap();
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSeenStore::new(tmp.path().join("seen.json"));

        let state = state_with("Rogo", &["a", "b"]);
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSeenStore::new(tmp.path().join("nested/dir/seen.json"));

        store.save(&state_with("X", &["1"])).await.unwrap();
        assert_eq!(store.load().await.unwrap(), state_with("X", &["1"]));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_hard_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = LocalSeenStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, AppError::StateRead(_)));
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_state() {
        let tmp = TempDir::new().unwrap();
        let store = LocalSeenStore::new(tmp.path().join("seen.json"));

        store.save(&state_with("Rogo", &["a"])).await.unwrap();
        store.save(&state_with("Notion", &["z"])).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert!(!loaded.contains_key("Rogo"));
        assert!(loaded.contains_key("Notion"));
    }
}
