use async_trait::async_trait;
use crate::Result;

/// String key/value persistence for client-side preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    fn name(&self) -> &str;

    /// Read a value, `None` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
