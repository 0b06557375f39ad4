use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use vf_core::{Error, PreferenceStore, Result, SelectedFile, Theme, Verifier};

use crate::messages;
use crate::state::{PageState, ResultPanel, UploadedImage};

/// Owns the page state and runs every user action against it.
///
/// Verifications release the state lock while the request is in flight, so
/// overlapping calls are allowed and whichever response lands last is what
/// the panel shows.
#[derive(Clone)]
pub struct Controller {
    state: Arc<RwLock<PageState>>,
    verifier: Arc<dyn Verifier>,
    preferences: Arc<dyn PreferenceStore>,
}

impl Controller {
    pub fn new(verifier: Arc<dyn Verifier>, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(PageState::default())),
            verifier,
            preferences,
        }
    }

    pub fn verifier(&self) -> &Arc<dyn Verifier> {
        &self.verifier
    }

    pub async fn snapshot(&self) -> PageState {
        self.state.read().await.clone()
    }

    /// Applies the persisted theme, `dark` when none was stored.
    pub async fn load_theme(&self) -> Result<Theme> {
        let stored = match self.preferences.get(Theme::STORAGE_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("⚠️ Could not read saved theme, using default: {}", e);
                None
            }
        };
        let theme = stored.map(Theme::new).unwrap_or_default();
        self.set_theme(theme.clone()).await?;
        Ok(theme)
    }

    pub async fn set_theme(&self, theme: impl Into<Theme>) -> Result<()> {
        let theme = theme.into();
        self.state.write().await.theme = theme.clone();
        if !theme.is_builtin() {
            debug!("Theme {} has no built-in styles", theme);
        }
        info!("🎨 Theme set to {}", theme);
        self.preferences.set(Theme::STORAGE_KEY, theme.name()).await
    }

    pub async fn on_file_selected(&self, file: SelectedFile) -> Result<()> {
        let name = file.name.clone();
        let size = file.bytes.len();
        let data_url = tokio::task::spawn_blocking(move || file.into_data_url())
            .await
            .map_err(|e| Error::External(e.into()))?;
        info!(
            "🖼️ Image selected: {} ({} bytes, {})",
            name.as_deref().unwrap_or("unnamed"),
            size,
            data_url.mime_type()
        );

        let mut state = self.state.write().await;
        state.upload.image = Some(UploadedImage { name, data_url });
        state.upload.drag_over = false;
        state.image_result = ResultPanel::Hidden;
        Ok(())
    }

    pub async fn on_remove_image(&self) {
        let mut state = self.state.write().await;
        state.upload.image = None;
        state.image_result = ResultPanel::Hidden;
        info!("🗑️ Image removed");
    }

    pub async fn set_drag_over(&self, over: bool) {
        self.state.write().await.upload.drag_over = over;
    }

    /// Runs a text check and returns the panel it left behind.
    ///
    /// Backend failures are rendered into the panel and still return `Ok`;
    /// only blank input is an error, and it never reaches the backend.
    pub async fn verify_text(&self, input: &str) -> Result<ResultPanel> {
        let text = input.trim();
        if text.is_empty() {
            return Err(self.raise_alert(messages::EMPTY_TEXT).await);
        }

        {
            let mut state = self.state.write().await;
            state.text_input = input.to_string();
            state.text_result = ResultPanel::Loading;
        }
        info!("🔎 Verifying text ({} chars)", text.chars().count());

        let panel = match self.verifier.check_text(text).await {
            Ok(result) => {
                if !result.verdict.is_recognized() {
                    warn!("❓ Unrecognized text verdict from backend: {:?}", result.verdict.label());
                }
                ResultPanel::Text(result)
            }
            Err(e) => {
                warn!("❌ Text verification failed: {}", e);
                ResultPanel::Failed(messages::failure(&e))
            }
        };

        self.state.write().await.text_result = panel.clone();
        Ok(panel)
    }

    /// Runs an image check on the selected image and returns the panel it left behind.
    pub async fn verify_image(&self) -> Result<ResultPanel> {
        let image = {
            let state = self.state.read().await;
            state.upload.image.as_ref().map(|image| image.data_url.clone())
        };
        let Some(image) = image else {
            return Err(self.raise_alert(messages::MISSING_IMAGE).await);
        };

        self.state.write().await.image_result = ResultPanel::Loading;
        info!("🔎 Verifying image ({})", image.mime_type());

        let panel = match self.verifier.check_image(&image).await {
            Ok(result) => {
                if !result.verdict.is_recognized() {
                    warn!("❓ Unrecognized image verdict from backend: {:?}", result.verdict.label());
                }
                ResultPanel::Image(result)
            }
            Err(e) => {
                warn!("❌ Image verification failed: {}", e);
                ResultPanel::Failed(messages::failure(&e))
            }
        };

        self.state.write().await.image_result = panel.clone();
        Ok(panel)
    }

    /// Returns the index of the open item afterwards.
    pub async fn toggle_faq(&self, index: usize) -> Option<usize> {
        let mut state = self.state.write().await;
        state.faq.toggle(index);
        state.faq.open()
    }

    /// Returns whether the menu is open afterwards.
    pub async fn toggle_mobile_menu(&self) -> bool {
        let mut state = self.state.write().await;
        state.nav.toggle();
        state.nav.is_open()
    }

    pub async fn dismiss_alert(&self) {
        self.state.write().await.alert = None;
    }

    async fn raise_alert(&self, message: &str) -> Error {
        warn!("🚫 {}", message);
        self.state.write().await.alert = Some(message.to_string());
        Error::Validation(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vf_client::backends::scripted::{image_result, text_result};
    use vf_client::ScriptedVerifier;
    use vf_core::{DataUrl, Service, VerifyError};
    use vf_storage::{FileStore, MemoryStore};

    fn controller(verifier: &Arc<ScriptedVerifier>) -> Controller {
        Controller::new(verifier.clone(), Arc::new(MemoryStore::new()))
    }

    fn png() -> SelectedFile {
        SelectedFile::new(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).with_name("claim.png")
    }

    #[tokio::test]
    async fn test_theme_survives_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("preferences.json");
        let verifier = Arc::new(ScriptedVerifier::new());

        let first = Controller::new(verifier.clone(), Arc::new(FileStore::new(&path)));
        assert_eq!(first.load_theme().await.unwrap(), Theme::dark());
        for name in ["light", "ocean", "neon", "light"] {
            first.set_theme(name).await.unwrap();
        }

        let reloaded = Controller::new(verifier, Arc::new(FileStore::new(&path)));
        assert_eq!(reloaded.load_theme().await.unwrap(), Theme::light());
        assert_eq!(reloaded.snapshot().await.theme, Theme::light());
    }

    #[tokio::test]
    async fn test_blank_text_never_sends_a_request() {
        let verifier = Arc::new(ScriptedVerifier::new());
        let controller = controller(&verifier);

        for input in ["", "   ", "\n\t  \n"] {
            let result = controller.verify_text(input).await;
            assert!(matches!(result, Err(Error::Validation(_))));
        }
        assert_eq!(verifier.text_calls(), 0);

        let state = controller.snapshot().await;
        assert_eq!(state.alert.as_deref(), Some("Please enter some text to analyze"));
        assert!(!state.text_result.is_visible());

        controller.dismiss_alert().await;
        assert!(controller.snapshot().await.alert.is_none());
    }

    #[tokio::test]
    async fn test_text_is_trimmed_before_sending() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier.push_text(Ok(text_result("REAL", 85)));
        let controller = controller(&verifier);

        let panel = controller.verify_text("  The bridge opened in 1932  ").await.unwrap();
        assert!(matches!(panel, ResultPanel::Text(_)));
        assert_eq!(verifier.last_text().as_deref(), Some("The bridge opened in 1932"));
        assert_eq!(controller.snapshot().await.text_input, "  The bridge opened in 1932  ");
    }

    #[tokio::test]
    async fn test_server_failure_uses_message_or_fallback() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier
            .push_text(Err(VerifyError::Server {
                service: Service::Text,
                status: 400,
                message: Some("text required".to_string()),
            }))
            .push_text(Err(VerifyError::Server {
                service: Service::Text,
                status: 502,
                message: None,
            }));
        let controller = controller(&verifier);

        controller.verify_text("claim").await.unwrap();
        assert!(matches!(controller.snapshot().await.text_result, ResultPanel::Failed(ref m) if m == "text required"));

        controller.verify_text("claim").await.unwrap();
        assert!(matches!(controller.snapshot().await.text_result, ResultPanel::Failed(ref m) if m == "Server error"));
        assert_eq!(verifier.text_calls(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_clears_loading() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier
            .push_text(Err(ScriptedVerifier::unreachable(Service::Text)))
            .push_image(Err(ScriptedVerifier::unreachable(Service::Image)));
        let controller = controller(&verifier);

        controller.verify_text("claim").await.unwrap();
        controller.on_file_selected(png()).await.unwrap();
        controller.verify_image().await.unwrap();

        let state = controller.snapshot().await;
        assert!(!state.text_result.is_loading());
        assert!(!state.image_result.is_loading());
        match (&state.text_result, &state.image_result) {
            (ResultPanel::Failed(text), ResultPanel::Failed(image)) => {
                assert_eq!(text, &messages::unreachable(Service::Text, Some(5000)));
                assert_eq!(image, &messages::unreachable(Service::Image, Some(5001)));
            }
            other => panic!("unexpected panels: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_panel_is_loading_while_request_is_pending() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier.push_text_after(Duration::from_millis(200), Ok(text_result("FAKE", 10)));
        let controller = controller(&verifier);

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.verify_text("claim").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(controller.snapshot().await.text_result.is_loading());

        pending.await.unwrap().unwrap();
        assert!(matches!(controller.snapshot().await.text_result, ResultPanel::Text(_)));
    }

    #[tokio::test]
    async fn test_last_response_wins() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier
            .push_text_after(Duration::from_millis(150), Ok(text_result("REAL", 85)))
            .push_text_after(Duration::from_millis(10), Ok(text_result("FAKE", 10)));
        let controller = controller(&verifier);

        let slow = controller.verify_text("first claim");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.verify_text("second claim").await
        };
        let (slow, fast) = tokio::join!(slow, fast);
        slow.unwrap();
        fast.unwrap();

        match controller.snapshot().await.text_result {
            ResultPanel::Text(result) => assert_eq!(result.credibility, 85),
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_image_requires_upload() {
        let verifier = Arc::new(ScriptedVerifier::new());
        let controller = controller(&verifier);

        let result = controller.verify_image().await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(verifier.image_calls(), 0);
        assert_eq!(controller.snapshot().await.alert.as_deref(), Some("Please upload an image first"));
    }

    #[tokio::test]
    async fn test_file_selection_shows_preview_and_clears_result() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier.push_image(Ok(image_result("REAL", 90)));
        let controller = controller(&verifier);

        controller.set_drag_over(true).await;
        controller.on_file_selected(png()).await.unwrap();
        controller.verify_image().await.unwrap();
        assert!(controller.snapshot().await.image_result.is_visible());

        controller.on_file_selected(png()).await.unwrap();
        let state = controller.snapshot().await;
        assert!(!state.image_result.is_visible());
        assert!(state.upload.shows_preview());
        assert!(!state.upload.shows_prompt());
        assert!(!state.upload.drag_over);
        assert!(state.upload.preview_src().starts_with("data:image/png;base64,"));
        assert_eq!(
            verifier.last_image().map(|url| url.mime_type().to_string()).as_deref(),
            Some("image/png")
        );
    }

    #[tokio::test]
    async fn test_remove_image_restores_prompt() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier
            .push_image(Ok(image_result("FAKE", 12)))
            .push_image(Err(ScriptedVerifier::unreachable(Service::Image)));
        let controller = controller(&verifier);

        controller.on_remove_image().await;
        assert!(controller.snapshot().await.upload.shows_prompt());

        for _ in 0..2 {
            controller.on_file_selected(png()).await.unwrap();
            controller.verify_image().await.unwrap();
            controller.on_remove_image().await;

            let state = controller.snapshot().await;
            assert!(state.upload.shows_prompt());
            assert_eq!(state.upload.preview_src(), "");
            assert!(!state.image_result.is_visible());
        }
    }

    #[tokio::test]
    async fn test_image_is_posted_as_data_url() {
        let verifier = Arc::new(ScriptedVerifier::new());
        verifier.push_image(Ok(image_result("SUSPICIOUS", 40)));
        let controller = controller(&verifier);

        controller
            .on_file_selected(SelectedFile::new(b"GIF89a....".to_vec()))
            .await
            .unwrap();
        controller.verify_image().await.unwrap();
        let posted = verifier.last_image().unwrap();
        assert_eq!(posted, DataUrl::encode("image/gif", b"GIF89a...."));
    }

    #[tokio::test]
    async fn test_faq_and_menu() {
        let verifier = Arc::new(ScriptedVerifier::new());
        let controller = controller(&verifier);

        assert_eq!(controller.snapshot().await.faq.open(), None);
        assert_eq!(controller.toggle_faq(0).await, Some(0));
        assert_eq!(controller.toggle_faq(3).await, Some(3));
        assert!(!controller.snapshot().await.faq.is_open(0));
        assert_eq!(controller.toggle_faq(3).await, None);

        assert!(controller.toggle_mobile_menu().await);
        assert!(!controller.toggle_mobile_menu().await);
    }
}
