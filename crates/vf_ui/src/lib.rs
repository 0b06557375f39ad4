pub mod content;
pub mod controller;
pub mod messages;
pub mod state;
pub mod style;
pub mod view;

pub use content::PageContent;
pub use controller::Controller;
pub use state::{FaqState, NavState, PageState, ResultPanel, UploadState, UploadedImage};
pub use style::{image_tone, text_tone, Icon, Tone};

pub mod prelude {
    pub use crate::{Controller, PageContent, PageState, ResultPanel};
    pub use crate::view::{plain, render_page};
    pub use vf_core::{Error, Result, SelectedFile, Theme};
}
