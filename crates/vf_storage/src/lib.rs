use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use vf_core::{Error, PreferenceStore, Result};

pub mod backends;

pub use backends::*;

/// `<config dir>/verifai/preferences.json`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("verifai").join("preferences.json"))
}

pub fn create_store(kind: &str, path: Option<&Path>) -> Result<Arc<dyn PreferenceStore>> {
    let store: Arc<dyn PreferenceStore> = match kind {
        "memory" => Arc::new(MemoryStore::new()),
        "file" => {
            let path = path
                .map(Path::to_path_buf)
                .or_else(default_path)
                .ok_or_else(|| Error::Storage("No preferences path given and no config directory found".to_string()))?;
            Arc::new(FileStore::new(path))
        }
        other => {
            return Err(Error::Storage(format!(
                "Unknown preference store: {} (expected memory or file)",
                other
            )))
        }
    };
    info!("🗄️ Preferences kept in {} store", store.name());
    Ok(store)
}

pub mod prelude {
    pub use super::{create_store, default_path};
    pub use super::backends::*;
}
