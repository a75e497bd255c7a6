use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::{ports::SnapshotStore, DomainError, IndexSnapshot};

/// Index snapshot persisted as a single pretty-printed JSON file.
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load(&self) -> Result<IndexSnapshot, DomainError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::snapshot(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let snapshot: IndexSnapshot = serde_json::from_slice(&raw).map_err(|e| {
            DomainError::snapshot(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        snapshot.validate()?;

        if snapshot.metadata.total_chunks != snapshot.len() {
            tracing::warn!(
                path = %self.path.display(),
                declared = snapshot.metadata.total_chunks,
                actual = snapshot.len(),
                "snapshot chunk count disagrees with metadata"
            );
        }

        Ok(snapshot)
    }

    async fn save(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::snapshot(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            DomainError::snapshot(format!("failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            DomainError::snapshot(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        Ok(())
    }
}
