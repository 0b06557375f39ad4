pub mod http;
pub mod scripted;

pub use http::HttpVerifier;
pub use scripted::ScriptedVerifier;
