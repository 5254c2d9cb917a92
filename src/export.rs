//! Export boundary
//!
//! Baking for export reuses the same renderer call as an AI edit, but the
//! result is handed to the caller for saving instead of being committed:
//! downloading a preview is not an edit, so the history stays untouched.

use std::path::Path;

use chrono::Utc;

use crate::error::ExportError;
use crate::imaging::{render, Snapshot};
use crate::state::adjust::Adjustments;

/// Filename prefix for exported images
pub const APP_NAME: &str = "tuCaEditor";

/// Bake pending adjustments (when non-neutral) into the snapshot to export.
///
/// Does not mutate any session state.
pub async fn prepare_for_export(
    current: &Snapshot,
    pending: Adjustments,
) -> Result<Snapshot, ExportError> {
    Ok(render::apply_adjustments(current, pending).await?)
}

/// Suggested filename: `<appName>_<unixMillis>.<extension>`
///
/// The extension comes from the MIME subtype of the snapshot actually being
/// written, which can differ from the upload after a PNG fallback.
pub fn export_filename(snapshot: &Snapshot) -> String {
    format!(
        "{}_{}.{}",
        APP_NAME,
        Utc::now().timestamp_millis(),
        snapshot.extension()
    )
}

/// Write the snapshot's image bytes to the chosen destination
pub fn write_to(snapshot: &Snapshot, destination: &Path) -> Result<(), ExportError> {
    let bytes = snapshot
        .decode()
        .map_err(crate::error::RenderError::Snapshot)?;
    std::fs::write(destination, bytes)?;

    println!("💾 Exported image to {}", destination.display());
    Ok(())
}
