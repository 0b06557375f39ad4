use async_trait::async_trait;
use std::fmt;

use crate::error::VerifyError;
use crate::types::{BackendStatus, ImageVerification, Service, TextVerification};
use crate::upload::DataUrl;

pub type VerifyResult<T> = std::result::Result<T, VerifyError>;

#[async_trait]
pub trait Verifier: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Where requests for `service` are sent, for messages and logs.
    fn endpoint(&self, service: Service) -> String;

    /// Score a piece of text against the text detection backend.
    async fn check_text(&self, text: &str) -> VerifyResult<TextVerification>;

    /// Score an image, posted as a data URL, against the image detection backend.
    async fn check_image(&self, image: &DataUrl) -> VerifyResult<ImageVerification>;

    /// Probe a backend. Never fails: unreachable backends are reported as such.
    async fn health(&self, service: Service) -> BackendStatus;
}
