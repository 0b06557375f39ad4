use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use vf_core::{Error, PreferenceStore, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Preferences kept in a small JSON document on disk.
///
/// A missing file reads as empty. Writes go to a sibling temporary file that
/// is renamed over the document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }
        serde_json::from_slice(&raw)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))
    }

    async fn save(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, serde_json::to_vec_pretty(document)?).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!("💾 Preferences written to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        document.entries.insert(key.to_string(), value.to_string());
        document.updated_at = Some(Utc::now());
        self.save(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("preferences.json");

        let store = FileStore::new(&path);
        assert_eq!(store.get("verifai-theme").await.unwrap(), None);
        store.set("verifai-theme", "light").await.unwrap();
        store.set("other", "value").await.unwrap();
        store.set("verifai-theme", "ocean").await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("verifai-theme").await.unwrap().as_deref(), Some("ocean"));
        assert_eq!(reopened.get("other").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        let result = store.get("verifai-theme").await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("preferences.json");
        std::fs::write(&path, "\n").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("verifai-theme").await.unwrap(), None);
    }
}
