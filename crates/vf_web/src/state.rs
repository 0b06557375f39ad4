use std::sync::Arc;
use vf_core::{PreferenceStore, Verifier};
use vf_ui::{Controller, PageContent};

pub struct AppState {
    pub controller: Controller,
    pub content: PageContent,
}

impl AppState {
    pub fn new(verifier: Arc<dyn Verifier>, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            controller: Controller::new(verifier, preferences),
            content: PageContent::default(),
        }
    }
}
