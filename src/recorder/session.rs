//! src/recorder/session.rs
//!
//! Transient per-recording state

use crate::core::types::ModifierFlags;
use crate::hotkey::SuspendGuard;

/// State that exists only while a recording is in flight.
///
/// Created on the transition into `Recording`, destroyed on every
/// transition out. Dropping the session releases its dispatch suspension,
/// so an abandoned session can never leave global hotkeys disabled.
pub struct RecordingSession {
    /// Modifiers currently held, masked to the allowed set; feeds the
    /// host's "ready to record" rendering
    pending_flags: ModifierFlags,

    /// Scoped dispatch suspension for the duration of the session
    _guard: SuspendGuard,
}

impl RecordingSession {
    pub(crate) fn begin(guard: SuspendGuard) -> Self {
        Self {
            pending_flags: ModifierFlags::NONE,
            _guard: guard,
        }
    }

    /// Modifiers held right now, for live feedback.
    pub fn pending_flags(&self) -> ModifierFlags {
        self.pending_flags
    }

    pub(crate) fn set_pending_flags(&mut self, flags: ModifierFlags) {
        self.pending_flags = flags;
    }
}
