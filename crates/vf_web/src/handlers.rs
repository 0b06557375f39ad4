use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use vf_core::{BackendStatus, SelectedFile};
use vf_ui::view::render_page;
use vf_ui::PageState;

use crate::{AppError, AppState};

const STYLESHEET: &str = include_str!("../static/styles.css");

#[derive(Deserialize)]
pub struct ThemeForm {
    theme: String,
}

#[derive(Deserialize)]
pub struct TextForm {
    #[serde(default)]
    text: String,
}

/// Validation failures already raised the page alert; they still land back on the page.
fn back_to<T>(anchor: &str, result: vf_core::Result<T>) -> Result<Redirect, AppError> {
    match result {
        Ok(_) | Err(vf_core::Error::Validation(_)) => Ok(Redirect::to(anchor)),
        Err(e) => Err(e.into()),
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = state.controller.snapshot().await;
    Html(render_page(&page, &state.content))
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ThemeForm>,
) -> Result<Redirect, AppError> {
    state.controller.set_theme(form.theme).await?;
    Ok(Redirect::to("/"))
}

pub async fn verify_text(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TextForm>,
) -> Result<Redirect, AppError> {
    back_to("/#text", state.controller.verify_text(&form.text).await)
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let name = field.file_name().filter(|n| !n.is_empty()).map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        if name.is_none() && bytes.is_empty() {
            debug!("Upload submitted without a file");
            break;
        }

        let mut file = SelectedFile::new(bytes.to_vec());
        file.name = name;
        file.content_type = content_type;
        state.controller.on_file_selected(file).await?;
        break;
    }
    Ok(Redirect::to("/#image"))
}

pub async fn remove_image(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.on_remove_image().await;
    Redirect::to("/#image")
}

pub async fn verify_image(State(state): State<Arc<AppState>>) -> Result<Redirect, AppError> {
    back_to("/#image", state.controller.verify_image().await)
}

pub async fn toggle_faq(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    if index >= state.content.faq.len() {
        return Err(AppError::NotFound);
    }
    state.controller.toggle_faq(index).await;
    Ok(Redirect::to("/#faq"))
}

pub async fn toggle_nav(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.toggle_mobile_menu().await;
    Redirect::to("/")
}

pub async fn dismiss_alert(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.dismiss_alert().await;
    Redirect::to("/")
}

pub async fn page_state(State(state): State<Arc<AppState>>) -> Json<PageState> {
    Json(state.controller.snapshot().await)
}

pub async fn backend_health(State(state): State<Arc<AppState>>) -> Json<Vec<BackendStatus>> {
    let verifier = state.controller.verifier().clone();
    Json(vf_client::probe_all(verifier.as_ref()).await)
}
