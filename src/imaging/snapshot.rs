//! Immutable encoded image snapshots
//!
//! The canonical in-memory representation of an image is a base64 data URI
//! (`data:<mime>;base64,<payload>`), the same value for the original upload,
//! every AI edit result, and the export. Snapshots are compared by content
//! and never mutated; edits always construct a new snapshot.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tokio::fs;

use crate::error::DecodeError;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// One immutable image in the edit history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    uri: String,
}

impl Snapshot {
    /// Wrap encoded image bytes into a data URI snapshot
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            uri: format!("{DATA_PREFIX}{mime_type}{BASE64_MARKER}{}", BASE64.encode(bytes)),
        }
    }

    /// Wrap an already base64-encoded payload (no prefix) into a snapshot
    ///
    /// This is the shape the AI service responds with; the payload is
    /// re-wrapped using the MIME type of the submitted image.
    pub fn from_payload(payload: String, mime_type: &str) -> Self {
        Self {
            uri: format!("{DATA_PREFIX}{mime_type}{BASE64_MARKER}{payload}"),
        }
    }

    /// Validate and wrap an existing data URI string
    pub fn from_data_uri(uri: String) -> Result<Self, DecodeError> {
        if !uri.starts_with(DATA_PREFIX) || !uri.contains(BASE64_MARKER) {
            return Err(DecodeError::NotADataUri);
        }
        Ok(Self { uri })
    }

    /// Load an image file from disk and build a snapshot from it
    ///
    /// The MIME type is sniffed from the file content, not the extension.
    pub async fn load_from_file(path: PathBuf) -> Result<Self, DecodeError> {
        let bytes = fs::read(&path).await?;
        let format = image::guess_format(&bytes).map_err(|_| DecodeError::UnknownFormat)?;

        println!("🖼️  Loaded {} ({} bytes)", path.display(), bytes.len());

        Ok(Self::from_bytes(&bytes, format.to_mime_type()))
    }

    /// The full data URI
    pub fn as_data_uri(&self) -> &str {
        &self.uri
    }

    /// MIME type between the `data:` prefix and the first `;`
    pub fn mime_type(&self) -> &str {
        let rest = &self.uri[DATA_PREFIX.len()..];
        &rest[..rest.find(';').unwrap_or(rest.len())]
    }

    /// Base64 payload without the data URI prefix
    pub fn payload(&self) -> &str {
        match self.uri.find(BASE64_MARKER) {
            Some(pos) => &self.uri[pos + BASE64_MARKER.len()..],
            None => "",
        }
    }

    /// Decode the payload back into raw encoded image bytes
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        Ok(BASE64.decode(self.payload())?)
    }

    /// File extension derived from the MIME subtype, `png` when absent
    pub fn extension(&self) -> &str {
        match self.mime_type().split('/').nth(1) {
            Some(sub) if !sub.is_empty() => sub,
            _ => "png",
        }
    }
}
