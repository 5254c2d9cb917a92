//! View components
//!
//! Pure presentation driven by the session state: the upload screen, the
//! editor with its preview and toolbar, and the adjustments panel. All
//! mutation flows back through `Message` handling in main.rs.

pub mod adjustments;
pub mod editor;
pub mod upload;
