//! Edit session state machine
//!
//! One session owns the whole edit state for one loaded image: the ordered
//! history of snapshots (index 0 is always the original upload) and the
//! pending, uncommitted adjustment values. All mutation goes through the
//! methods here; the UI layer only reads.
//!
//! Invariants:
//! - `history` is never empty; `history[0]` is the original and never changes
//! - `current()` and `original()` are computed from the history, never stored
//! - pending adjustments reset to neutral on every snapshot transition
//!   (commit, undo, reset) so they cannot carry over onto a new image

use super::adjust::Adjustments;
use crate::imaging::Snapshot;

/// All edit state for one loaded image
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Append-only snapshot history; index 0 = original upload
    history: Vec<Snapshot>,
    /// Uncommitted preview adjustments, baked in at edit or export time
    pending: Adjustments,
}

impl EditSession {
    /// Start a session from a freshly uploaded snapshot
    pub fn new(original: Snapshot) -> Self {
        Self {
            history: vec![original],
            pending: Adjustments::default(),
        }
    }

    /// The first snapshot ever loaded
    pub fn original(&self) -> &Snapshot {
        &self.history[0]
    }

    /// The snapshot currently shown, always the history tail
    pub fn current(&self) -> &Snapshot {
        self.history.last().expect("session history is never empty")
    }

    /// Number of snapshots in the history (at least 1)
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The pending adjustment values
    pub fn adjustments(&self) -> Adjustments {
        self.pending
    }

    /// Preview-only mutation of the pending adjustments.
    ///
    /// No snapshot changes, nothing async; the values are only baked into a
    /// new snapshot by an AI edit or an export.
    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.pending = adjustments;
    }

    /// Append a successful AI edit result and reset pending adjustments
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.history.push(snapshot);
        self.pending.reset();
    }

    /// True while there is something to undo
    pub fn can_undo(&self) -> bool {
        self.history.len() > 1
    }

    /// Drop the latest snapshot; no-op when only the original remains.
    ///
    /// Popping can never empty the history.
    pub fn undo(&mut self) {
        if self.history.len() > 1 {
            self.history.pop();
            self.pending.reset();
        }
    }

    /// Truncate the history back to just the original
    pub fn reset_to_original(&mut self) {
        self.history.truncate(1);
        self.pending.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: &str) -> Snapshot {
        Snapshot::from_bytes(tag.as_bytes(), "image/png")
    }

    #[test]
    fn test_new_session_seeds_history() {
        let session = EditSession::new(snap("a"));

        assert_eq!(session.history_len(), 1);
        assert_eq!(session.current(), session.original());
        assert!(session.adjustments().is_neutral());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_adjustments_are_pending_only() {
        let mut session = EditSession::new(snap("a"));

        let mut adjustments = Adjustments::default();
        adjustments.brightness = 150;
        session.set_adjustments(adjustments);

        assert_eq!(session.adjustments().brightness, 150);
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.current(), &snap("a"));
    }

    #[test]
    fn test_commit_appends_and_resets_pending() {
        let mut session = EditSession::new(snap("a"));
        let mut adjustments = Adjustments::default();
        adjustments.brightness = 150;
        session.set_adjustments(adjustments);

        session.commit(snap("b"));

        assert_eq!(session.history_len(), 2);
        assert_eq!(session.current(), &snap("b"));
        assert_eq!(session.original(), &snap("a"));
        assert!(session.adjustments().is_neutral());
    }

    #[test]
    fn test_history_grows_one_per_commit() {
        let mut session = EditSession::new(snap("a"));
        for i in 0..5 {
            session.commit(snap(&format!("edit-{i}")));
            assert_eq!(session.history_len(), i + 2);
            assert_eq!(session.original(), &snap("a"));
        }
    }

    #[test]
    fn test_undo_pops_and_resets_pending() {
        let mut session = EditSession::new(snap("a"));
        session.commit(snap("b"));
        let mut adjustments = Adjustments::default();
        adjustments.saturation = 40;
        session.set_adjustments(adjustments);

        session.undo();

        assert_eq!(session.history_len(), 1);
        assert_eq!(session.current(), &snap("a"));
        assert!(session.adjustments().is_neutral());
    }

    #[test]
    fn test_undo_on_original_is_noop() {
        let mut session = EditSession::new(snap("a"));
        let mut adjustments = Adjustments::default();
        adjustments.contrast = 130;
        session.set_adjustments(adjustments);

        session.undo();

        // Nothing to undo: state is untouched, including pending values
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.adjustments().contrast, 130);
    }

    #[test]
    fn test_reset_to_original_truncates() {
        let mut session = EditSession::new(snap("a"));
        session.commit(snap("b"));
        session.commit(snap("c"));
        assert_eq!(session.history_len(), 3);

        session.reset_to_original();

        assert_eq!(session.history_len(), 1);
        assert_eq!(session.current(), &snap("a"));
        assert!(session.adjustments().is_neutral());
    }
}
