use serde::Serialize;
use vf_core::{DataUrl, ImageVerification, TextVerification, Theme};

/// Everything the page shows, owned by the controller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageState {
    pub theme: Theme,
    pub text_input: String,
    pub upload: UploadState,
    pub text_result: ResultPanel,
    pub image_result: ResultPanel,
    pub faq: FaqState,
    pub nav: NavState,
    /// Pending blocking alert, shown until dismissed.
    pub alert: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadState {
    pub image: Option<UploadedImage>,
    pub drag_over: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedImage {
    pub name: Option<String>,
    pub data_url: DataUrl,
}

impl UploadState {
    /// Source of the preview `<img>`, empty when nothing is selected.
    pub fn preview_src(&self) -> &str {
        self.image.as_ref().map(|image| image.data_url.as_str()).unwrap_or("")
    }

    pub fn shows_prompt(&self) -> bool {
        self.image.is_none()
    }

    pub fn shows_preview(&self) -> bool {
        self.image.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ResultPanel {
    #[default]
    Hidden,
    Loading,
    Text(TextVerification),
    Image(ImageVerification),
    Failed(String),
}

impl ResultPanel {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultPanel::Hidden)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResultPanel::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResultPanel::Failed(_))
    }
}

/// Single-open accordion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FaqState {
    open: Option<usize>,
}

impl FaqState {
    /// Opens `index` and closes every other item, or closes `index` if it was open.
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.open == Some(index) { None } else { Some(index) };
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open(&self) -> Option<usize> {
        self.open
    }
}

/// Mirrored on the nav-links container and the menu button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    open: bool,
}

impl NavState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
