//! Image handling module
//!
//! - Snapshots: immutable base64 data URI image values (snapshot.rs)
//! - Renderer: bakes adjustments into new snapshots (render.rs)

pub mod render;
pub mod snapshot;

pub use snapshot::Snapshot;
