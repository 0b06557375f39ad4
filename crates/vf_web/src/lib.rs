use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Largest request body accepted, sized for image uploads.
pub const UPLOAD_LIMIT: usize = 32 * 1024 * 1024;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/static/styles.css", get(handlers::stylesheet))
        .route("/theme", post(handlers::set_theme))
        .route("/verify/text", post(handlers::verify_text))
        .route("/upload", post(handlers::upload_image))
        .route("/upload/remove", post(handlers::remove_image))
        .route("/verify/image", post(handlers::verify_image))
        .route("/faq/:index", post(handlers::toggle_faq))
        .route("/nav", post(handlers::toggle_nav))
        .route("/alert/dismiss", post(handlers::dismiss_alert))
        .route("/api/state", get(handlers::page_state))
        .route("/api/health", get(handlers::backend_health))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> vf_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Serving VerifAI on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use vf_core::{Error, Result};
    pub use crate::{create_app, serve, AppState};
}
