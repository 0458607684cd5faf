use anyhow::{anyhow, Result};
use async_trait::async_trait;
use glob::{glob, Pattern};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use super::ObjectStore;

const TEMP_MARKER: &str = ".tmp-";

/// Blob store backed by a local directory; keys map to relative paths
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_plain {
            return Err(anyhow!("Invalid object key '{}'", key));
        }

        Ok(self.root.join(relative))
    }

    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow!("Failed to read {}: {}", path.display(), e)),
        }
    }

    async fn put(&self, key: &str, body: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow!("Failed to create {}: {}", parent.display(), e))?;
        }

        // Write next to the target, then rename over it
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Invalid object key '{}'", key))?;
        let temp_path = path.with_file_name(format!(
            "{}{}{}",
            file_name,
            TEMP_MARKER,
            Uuid::new_v4().simple()
        ));

        tokio::fs::write(&temp_path, body)
            .await
            .map_err(|e| anyhow!("Failed to write {}: {}", temp_path.display(), e))?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(anyhow!("Failed to move object into {}: {}", path.display(), e));
        }

        debug!("Stored {} ({} bytes)", path.display(), body.len());
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let root = self
            .root
            .to_str()
            .ok_or_else(|| anyhow!("Storage root is not valid UTF-8"))?;
        let pattern = format!("{}/**/*", Pattern::escape(root));

        let mut keys = Vec::new();
        for entry in glob(&pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
            let path = entry.map_err(|e| anyhow!("Glob entry error: {}", e))?;
            if !path.is_file() {
                continue;
            }

            match self.key_for(&path) {
                Some(key) if key.starts_with(prefix) && !key.contains(TEMP_MARKER) => {
                    keys.push(key)
                }
                _ => {}
            }
        }

        keys.sort();
        Ok(keys)
    }
}
