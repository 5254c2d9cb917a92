//! AI edit integration
//!
//! An opaque external collaborator: the editor submits the current image
//! plus a natural-language instruction and gets a newly generated image
//! back. Latency and failure modes are the service's own; every failure
//! surfaces as a single `EditError`. No retry or cancellation is layered
//! on top.

pub mod client;

pub use client::GeminiClient;

/// Configuration for the Gemini API client
///
/// The API key is a pre-provisioned credential read from the environment.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: "gemini-2.5-flash-image-preview".to_string(),
            timeout_seconds: 120,
        }
    }
}
