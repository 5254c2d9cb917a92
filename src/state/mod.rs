//! State management module
//!
//! This module owns all editor state:
//! - Pending adjustment values (adjust.rs)
//! - The edit session with its snapshot history (session.rs)
//!
//! Everything here is synchronous and infallible; the asynchronous work
//! (decode, render, AI round-trip) lives with the application driver, which
//! feeds results back into these types.

pub mod adjust;
pub mod session;

pub use adjust::Adjustments;
pub use session::EditSession;
