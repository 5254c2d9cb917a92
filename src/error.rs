//! Error types for the editor
//!
//! Every asynchronous operation resolves to one of these families and is
//! caught at the await point: the busy overlay is cleared and a single
//! user-visible message replaces any previous one. A failed operation never
//! touches the edit history.

use thiserror::Error;

/// Failure to turn an uploaded file or data URI into a snapshot
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized image format")]
    UnknownFormat,

    #[error("not a base64 data URI")]
    NotADataUri,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Failure during the adjustment filter pass
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] DecodeError),

    #[error("failed to decode image for rendering: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode rendered image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("render task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Failure of an AI edit request, of any kind
#[derive(Debug, Error)]
pub enum EditError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    // Pending adjustments are baked in before submission, so a render
    // failure surfaces through the edit path as well.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Failure while preparing or writing an exported image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write exported file: {0}")]
    Io(#[from] std::io::Error),
}
