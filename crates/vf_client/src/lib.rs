use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vf_core::{BackendStatus, Result, Service, Verifier};

pub mod backends;

pub use backends::{HttpVerifier, ScriptedVerifier};

/// Where the detection backends live and how long to wait for them.
#[derive(Debug, Clone)]
pub struct Config {
    pub text_url: String,
    pub image_url: String,
    /// `None` waits as long as the connection stays open.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_url: Service::Text.default_base_url().to_string(),
            image_url: Service::Image.default_base_url().to_string(),
            timeout: None,
        }
    }
}

pub fn create_verifier(config: &Config) -> Result<Arc<dyn Verifier>> {
    let verifier = HttpVerifier::new(config)?;
    info!(
        "🔗 Detection backends: text at {}, image at {}",
        verifier.endpoint(Service::Text),
        verifier.endpoint(Service::Image)
    );
    Ok(Arc::new(verifier))
}

/// Probe every backend concurrently.
pub async fn probe_all(verifier: &dyn Verifier) -> Vec<BackendStatus> {
    join_all(Service::ALL.iter().map(|service| verifier.health(*service))).await
}

pub mod prelude {
    pub use super::{create_verifier, probe_all, Config};
    pub use super::backends::*;
    pub use vf_core::{Result, Error, Verifier, VerifyError};
}
