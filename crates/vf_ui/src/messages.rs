//! User-facing strings for alerts, loading states and failures.

use vf_core::{Service, VerifyError};

pub const EMPTY_TEXT: &str = "Please enter some text to analyze";
pub const MISSING_IMAGE: &str = "Please upload an image first";

pub const ANALYZING_TEXT: &str = "Analyzing text...";
pub const ANALYZING_IMAGE: &str = "Analyzing image...";

pub const SERVER_ERROR: &str = "Server error";
pub const INVALID_RESPONSE: &str = "Invalid response from server";

/// Fixed diagnostic for a backend that never answered.
pub fn unreachable(service: Service, port: Option<u16>) -> String {
    let running = match port {
        Some(port) => format!("running on port {}", port),
        None => "running".to_string(),
    };
    match service {
        Service::Text => format!(
            "Backend not reachable. Make sure the text detection server is {}.",
            running
        ),
        Service::Image => format!(
            "Image detection service not reachable. Make sure the image detection server is {}.",
            running
        ),
    }
}

/// Text shown in a result panel for a failed exchange.
pub fn failure(err: &VerifyError) -> String {
    match err {
        VerifyError::Server { message, .. } => message.clone().unwrap_or_else(|| SERVER_ERROR.to_string()),
        VerifyError::Transport { service, port, .. } => unreachable(*service, *port),
        VerifyError::Decode { .. } => INVALID_RESPONSE.to_string(),
    }
}
