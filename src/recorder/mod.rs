// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recording state machine
//!
//! `ShortcutRecorder` is the interaction core of the capture widget: it
//! interprets the raw events the host event loop delivers, runs proposed
//! combinations through the validator, and commits or rejects them.
//!
//! # States
//!
//! - `Idle`: resting state, reusable indefinitely
//! - `Hovering`: pointer over the capture area, not yet clicked
//! - `Recording`: a session is in flight; dispatch is suspended
//! - `Removing`: pointer over the clear affordance
//!
//! # Event model
//!
//! Single-threaded and synchronous: each event is fully processed on the
//! delivering thread before the next is accepted, and flags-changed events
//! are never reordered relative to key-down. Hit-testing geometry is the
//! host's problem; pointer events arrive with a pre-resolved [`HitRegion`].
//!
//! Rejections never end the session: the reason is surfaced and the user
//! may keep trying until a combination is accepted or the session is
//! cancelled (escape, clear click, focus loss).

mod session;

pub use session::RecordingSession;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::flags::{to_canonical, FlagEncoding};
use crate::core::keys::keycode;
use crate::core::menu::MenuSnapshot;
use crate::core::types::{FlagPolicy, KeyCombo, ModifierFlags};
use crate::core::validator::{validate_combo, DelegateVerdict, RejectReason, ValidationDelegate};
use crate::hotkey::{HotKeyLifecycle, SuspendGuard};

/// Interaction states of the widget.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecorderState {
    /// Resting state
    Idle,
    /// Pointer over the capture area
    Hovering,
    /// A recording session is in flight
    Recording,
    /// Pointer over the clear affordance
    Removing,
}

/// Where a pointer event landed, as resolved by the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HitRegion {
    /// The capture area of the widget
    Capture,
    /// The clear ("remove") affordance
    Clear,
}

/// What one delivered event did to the widget.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordOutcome {
    /// A recording session began
    Started,
    /// A combination was accepted and committed
    Committed(KeyCombo),
    /// The combination was rejected; the session continues
    Rejected(RejectReason),
    /// The session was cancelled without committing
    Cancelled,
    /// The committed combination was cleared
    Cleared,
    /// The event had no effect in the current state
    Ignored,
}

/// Callback fired on every committed change.
pub type ChangeListener = dyn FnMut(KeyCombo);

/// Supplies the current menu snapshot at validation time, so conflict
/// detection always sees live menus.
pub type MenuSource = dyn Fn() -> MenuSnapshot;

/// The recording state machine.
///
/// # Example
///
/// ```
/// use shortcut_capture::core::keys::keycode;
/// use shortcut_capture::core::flags::{from_canonical, FlagEncoding};
/// use shortcut_capture::core::types::ModifierFlags;
/// use shortcut_capture::recorder::{HitRegion, RecordOutcome, ShortcutRecorder};
///
/// let mut recorder = ShortcutRecorder::new();
/// recorder.on_mouse_down(HitRegion::Capture);
///
/// let native = from_canonical(ModifierFlags::COMMAND, FlagEncoding::WindowServer);
/// match recorder.on_key_down(keycode::K, native) {
///     RecordOutcome::Committed(combo) => assert_eq!(combo.to_string(), "⌘K"),
///     other => panic!("unexpected outcome: {:?}", other),
/// }
/// ```
pub struct ShortcutRecorder {
    state: RecorderState,
    combo: KeyCombo,
    policy: FlagPolicy,
    session: Option<RecordingSession>,
    lifecycle: Rc<RefCell<HotKeyLifecycle>>,
    menu_source: Option<Box<MenuSource>>,
    excluded_titles: Vec<String>,
    delegate: Option<Box<ValidationDelegate>>,
    on_change: Option<Box<ChangeListener>>,
    last_rejection: Option<RejectReason>,
}

impl ShortcutRecorder {
    /// Creates a recorder with global hotkey capture disabled.
    pub fn new() -> Self {
        Self::with_lifecycle(Rc::new(RefCell::new(HotKeyLifecycle::disabled())))
    }

    /// Creates a recorder sharing the given hotkey lifecycle.
    pub fn with_lifecycle(lifecycle: Rc<RefCell<HotKeyLifecycle>>) -> Self {
        Self {
            state: RecorderState::Idle,
            combo: KeyCombo::CLEAR,
            policy: FlagPolicy::default(),
            session: None,
            lifecycle,
            menu_source: None,
            excluded_titles: Vec::new(),
            delegate: None,
            on_change: None,
            last_rejection: None,
        }
    }

    /// Current interaction state.
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// The committed combination (the clear combo when nothing is set).
    pub fn key_combo(&self) -> KeyCombo {
        self.combo
    }

    /// Human-readable rendering of the committed combination, e.g. `⌘⇧K`.
    pub fn display_string(&self) -> String {
        self.combo.to_string()
    }

    /// Modifiers held during the in-flight session, for live feedback.
    /// Empty when not recording.
    pub fn pending_flags(&self) -> ModifierFlags {
        self.session
            .as_ref()
            .map(RecordingSession::pending_flags)
            .unwrap_or(ModifierFlags::NONE)
    }

    /// The reason the last proposal was rejected, until the next session
    /// starts or a combination is committed.
    pub fn last_rejection(&self) -> Option<&RejectReason> {
        self.last_rejection.as_ref()
    }

    /// Applies a recording policy.
    ///
    /// An inconsistent policy (required modifiers outside the allowed
    /// mask) is reconciled here, not at validation time: required flags
    /// win, and the adjustment is logged.
    pub fn configure(&mut self, policy: FlagPolicy) {
        if !policy.is_reconciled() {
            log::warn!(
                "required flags {:?} not contained in allowed flags {:?}; widening allowed mask",
                policy.required_flags,
                policy.allowed_flags
            );
        }
        self.policy = policy.reconciled();
    }

    /// The active (already reconciled) policy.
    pub fn policy(&self) -> FlagPolicy {
        self.policy
    }

    /// Whether recording sessions suspend system-wide hotkey dispatch.
    pub fn set_can_capture_global_hot_keys(&mut self, enabled: bool) {
        self.lifecycle.borrow_mut().set_capture_enabled(enabled);
    }

    /// Installs the live menu snapshot provider used for conflict scans.
    pub fn set_menu_source(&mut self, source: impl Fn() -> MenuSnapshot + 'static) {
        self.menu_source = Some(Box::new(source));
    }

    /// Menu item titles the conflict scan must skip (the host's immutable
    /// items, typically). Empty by default, which makes the scan
    /// exhaustive.
    pub fn set_excluded_titles(&mut self, titles: Vec<String>) {
        self.excluded_titles = titles;
    }

    /// Installs the caller veto consulted after every other check.
    pub fn set_validation_delegate(
        &mut self,
        delegate: impl Fn(i32, ModifierFlags) -> DelegateVerdict + 'static,
    ) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Removes the caller veto.
    pub fn remove_validation_delegate(&mut self) {
        self.delegate = None;
    }

    /// Installs the listener fired on every committed change.
    pub fn on_key_combo_changed(&mut self, listener: impl FnMut(KeyCombo) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Sets the combination programmatically, bypassing validation.
    ///
    /// Trusted path: any in-flight session is abandoned (its suspension
    /// released), the widget returns to `Idle`, and the change listener
    /// fires if the value actually changed.
    pub fn set_key_combo(&mut self, combo: KeyCombo) {
        self.end_session();
        self.state = RecorderState::Idle;
        self.commit(combo);
    }

    /// A mouse click, already hit-tested by the host.
    pub fn on_mouse_down(&mut self, region: HitRegion) -> RecordOutcome {
        match (self.state, region) {
            // At most one session per widget: re-clicking is a no-op
            (RecorderState::Recording, HitRegion::Capture) => RecordOutcome::Ignored,

            // Snapback: cancel the session, keep the committed combo
            (RecorderState::Recording, HitRegion::Clear) => {
                self.end_session();
                self.state = RecorderState::Idle;
                log::debug!("recording cancelled via clear affordance");
                RecordOutcome::Cancelled
            }

            (_, HitRegion::Capture) => {
                let guard = SuspendGuard::acquire(Rc::clone(&self.lifecycle));
                self.session = Some(RecordingSession::begin(guard));
                self.last_rejection = None;
                self.state = RecorderState::Recording;
                log::debug!("recording started");
                RecordOutcome::Started
            }

            (_, HitRegion::Clear) => {
                self.state = RecorderState::Idle;
                if self.combo.is_set() {
                    self.commit(KeyCombo::CLEAR);
                    RecordOutcome::Cleared
                } else {
                    RecordOutcome::Ignored
                }
            }
        }
    }

    /// Pointer movement over the widget; `None` means the pointer left.
    ///
    /// Hover state never interrupts an in-flight session.
    pub fn on_pointer_moved(&mut self, region: Option<HitRegion>) {
        if self.state == RecorderState::Recording {
            return;
        }
        self.state = match region {
            None => RecorderState::Idle,
            Some(HitRegion::Capture) => RecorderState::Hovering,
            Some(HitRegion::Clear) => RecorderState::Removing,
        };
    }

    /// A flags-changed event in the window-server encoding.
    ///
    /// Updates the pending flags only; nothing is finalised until a
    /// key-down arrives.
    pub fn on_modifier_flags_changed(&mut self, native_flags: u32) {
        let flags = to_canonical(native_flags, FlagEncoding::WindowServer);
        if let Some(session) = self.session.as_mut() {
            session.set_pending_flags(flags & self.policy.allowed_flags);
        }
    }

    /// A key-down event in the window-server encoding.
    ///
    /// While recording this either commits a combination, cancels the
    /// session (escape/backspace, unless the policy records them), or
    /// rejects and keeps the session alive for a retry. Outside of
    /// recording it is ignored.
    pub fn on_key_down(&mut self, key_code: i32, native_flags: u32) -> RecordOutcome {
        if self.state != RecorderState::Recording {
            return RecordOutcome::Ignored;
        }

        let flags = to_canonical(native_flags, FlagEncoding::WindowServer);

        let is_cancel_key = key_code == keycode::ESCAPE || key_code == keycode::BACKSPACE;
        if is_cancel_key && !self.policy.escape_keys_record {
            self.end_session();
            self.state = RecorderState::Idle;
            log::debug!("recording cancelled via cancel key {}", key_code);
            return RecordOutcome::Cancelled;
        }

        let menu = self.menu_source.as_ref().map(|source| source());
        let outcome = validate_combo(
            key_code,
            flags,
            &self.policy,
            menu.as_ref(),
            &self.excluded_titles,
            self.delegate.as_deref(),
        );

        match outcome {
            Ok(combo) => {
                self.end_session();
                self.state = RecorderState::Idle;
                self.last_rejection = None;
                self.commit(combo);
                log::info!("recorded {}", combo);
                RecordOutcome::Committed(combo)
            }
            Err(reason) => {
                log::debug!("proposal rejected: {}", reason);
                self.last_rejection = Some(reason.clone());
                RecordOutcome::Rejected(reason)
            }
        }
    }

    /// Focus left the widget: abandon any session, keep the committed
    /// combination.
    pub fn on_focus_lost(&mut self) {
        if self.session.is_some() {
            log::debug!("recording abandoned on focus loss");
        }
        self.end_session();
        self.state = RecorderState::Idle;
    }

    /// Drops the in-flight session; its guard resumes dispatch exactly
    /// once regardless of how the session ends.
    fn end_session(&mut self) {
        self.session = None;
    }

    fn commit(&mut self, combo: KeyCombo) {
        if combo == self.combo {
            return;
        }
        self.combo = combo;
        if let Some(listener) = self.on_change.as_mut() {
            listener(combo);
        }
    }
}

impl Default for ShortcutRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
