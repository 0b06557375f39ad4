use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use vf_core::{
    BackendStatus, DataUrl, ImageVerification, Service, SubScores, TextVerification, Verdict,
    Verifier, VerifyError, VerifyResult,
};

struct Scripted<T> {
    delay: Duration,
    outcome: VerifyResult<T>,
}

/// In-process verifier that replays queued outcomes, optionally after a delay.
///
/// Each call pops the next outcome for its service; an empty queue answers
/// with a transport failure.
#[derive(Default)]
pub struct ScriptedVerifier {
    text: Mutex<VecDeque<Scripted<TextVerification>>>,
    image: Mutex<VecDeque<Scripted<ImageVerification>>>,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
    last_image: Mutex<Option<DataUrl>>,
}

impl ScriptedVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, outcome: VerifyResult<TextVerification>) -> &Self {
        self.push_text_after(Duration::ZERO, outcome)
    }

    pub fn push_text_after(&self, delay: Duration, outcome: VerifyResult<TextVerification>) -> &Self {
        if let Ok(mut queue) = self.text.lock() {
            queue.push_back(Scripted { delay, outcome });
        }
        self
    }

    pub fn push_image(&self, outcome: VerifyResult<ImageVerification>) -> &Self {
        self.push_image_after(Duration::ZERO, outcome)
    }

    pub fn push_image_after(&self, delay: Duration, outcome: VerifyResult<ImageVerification>) -> &Self {
        if let Ok(mut queue) = self.image.lock() {
            queue.push_back(Scripted { delay, outcome });
        }
        self
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().ok().and_then(|last| last.clone())
    }

    pub fn last_image(&self) -> Option<DataUrl> {
        self.last_image.lock().ok().and_then(|last| last.clone())
    }

    /// Transport failure as the HTTP verifier reports it for a default endpoint.
    pub fn unreachable(service: Service) -> VerifyError {
        VerifyError::Transport {
            service,
            endpoint: format!("{}/{}", service.default_base_url(), service.check_path()),
            port: Some(default_port(service)),
            reason: "connection refused".to_string(),
        }
    }

    async fn replay<T>(queue: &Mutex<VecDeque<Scripted<T>>>, service: Service) -> VerifyResult<T> {
        let next = queue.lock().ok().and_then(|mut queue| queue.pop_front());
        match next {
            Some(Scripted { delay, outcome }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                outcome
            }
            None => Err(Self::unreachable(service)),
        }
    }
}

fn default_port(service: Service) -> u16 {
    match service {
        Service::Text => 5000,
        Service::Image => 5001,
    }
}

/// A text result with the given verdict and credibility and fixed sub-scores.
pub fn text_result(verdict: &str, credibility: u8) -> TextVerification {
    TextVerification {
        verdict: Verdict::from(verdict),
        credibility,
        scores: SubScores {
            ml_score: 0.5,
            bert_score: 0.5,
            llm_score: 0.5,
            web_score: 0.5,
        },
    }
}

/// An image result with the given verdict and credibility and no optional fields.
pub fn image_result(verdict: &str, credibility: u8) -> ImageVerification {
    ImageVerification {
        verdict: Verdict::from(verdict),
        credibility,
        alert: String::new(),
        extracted_text: None,
        concerns: None,
        scores: SubScores::default(),
        image_manipulation_score: 0.0,
    }
}

impl fmt::Debug for ScriptedVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedVerifier")
            .field("text_calls", &self.text_calls())
            .field("image_calls", &self.image_calls())
            .finish()
    }
}

#[async_trait]
impl Verifier for ScriptedVerifier {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn endpoint(&self, service: Service) -> String {
        format!("{}/{}", service.default_base_url(), service.check_path())
    }

    async fn check_text(&self, text: &str) -> VerifyResult<TextVerification> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_text.lock() {
            *last = Some(text.to_string());
        }
        Self::replay(&self.text, Service::Text).await
    }

    async fn check_image(&self, image: &DataUrl) -> VerifyResult<ImageVerification> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_image.lock() {
            *last = Some(image.clone());
        }
        Self::replay(&self.image, Service::Image).await
    }

    async fn health(&self, service: Service) -> BackendStatus {
        BackendStatus {
            service,
            endpoint: self.endpoint(service),
            reachable: true,
            http_status: Some(200),
            report: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let verifier = ScriptedVerifier::new();
        verifier
            .push_text(Ok(text_result("REAL", 85)))
            .push_text(Ok(text_result("FAKE", 10)));

        assert_eq!(verifier.check_text("a").await.unwrap().verdict, Verdict::Real);
        assert_eq!(verifier.check_text("b").await.unwrap().verdict, Verdict::Fake);
        assert!(verifier.check_text("c").await.unwrap_err().is_transport());
        assert_eq!(verifier.text_calls(), 3);
        assert_eq!(verifier.last_text().as_deref(), Some("c"));
        assert_eq!(verifier.image_calls(), 0);
    }
}
