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

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::flags::{from_canonical, FlagEncoding};
use crate::core::keys::keycode;
use crate::core::menu::{MenuItem, MenuSnapshot};
use crate::core::types::{FlagPolicy, KeyCombo, ModifierFlags};
use crate::core::validator::{DelegateVerdict, RejectReason};
use crate::hotkey::{DispatchSuspension, HotKeyLifecycle};
use crate::recorder::{HitRegion, RecordOutcome, RecorderState, ShortcutRecorder};

/// Counts calls into the host suspension mechanism.
#[derive(Clone, Default)]
struct CountingSuspension {
    counts: Rc<RefCell<(u32, u32)>>,
}

impl CountingSuspension {
    fn suspends(&self) -> u32 {
        self.counts.borrow().0
    }

    fn resumes(&self) -> u32 {
        self.counts.borrow().1
    }
}

impl DispatchSuspension for CountingSuspension {
    fn suspend_dispatch(&mut self) {
        self.counts.borrow_mut().0 += 1;
    }

    fn resume_dispatch(&mut self) {
        self.counts.borrow_mut().1 += 1;
    }
}

fn counting_recorder() -> (ShortcutRecorder, CountingSuspension) {
    let counter = CountingSuspension::default();
    let lifecycle = Rc::new(RefCell::new(HotKeyLifecycle::new(Box::new(counter.clone()))));
    (ShortcutRecorder::with_lifecycle(lifecycle), counter)
}

fn native(flags: ModifierFlags) -> u32 {
    from_canonical(flags, FlagEncoding::WindowServer)
}

fn permissive_policy() -> FlagPolicy {
    FlagPolicy {
        allows_key_only: true,
        ..FlagPolicy::default()
    }
}

#[test]
fn test_click_starts_recording() {
    let mut recorder = ShortcutRecorder::new();

    assert_eq!(recorder.state(), RecorderState::Idle);
    assert_eq!(recorder.on_mouse_down(HitRegion::Capture), RecordOutcome::Started);
    assert_eq!(recorder.state(), RecorderState::Recording);
}

#[test]
fn test_click_while_recording_is_noop() {
    let (mut recorder, counter) = counting_recorder();

    recorder.on_mouse_down(HitRegion::Capture);
    assert_eq!(counter.suspends(), 1);

    // A second click must not allocate a second lifecycle token
    assert_eq!(recorder.on_mouse_down(HitRegion::Capture), RecordOutcome::Ignored);
    assert_eq!(recorder.state(), RecorderState::Recording);
    assert_eq!(counter.suspends(), 1);
    assert_eq!(counter.resumes(), 0);
}

#[test]
fn test_accept_commits_and_returns_to_idle() {
    let (mut recorder, counter) = counting_recorder();
    recorder.configure(permissive_policy());

    recorder.on_mouse_down(HitRegion::Capture);
    let outcome = recorder.on_key_down(keycode::K, native(ModifierFlags::COMMAND));

    let expected = KeyCombo::new(keycode::K, ModifierFlags::COMMAND);
    assert_eq!(outcome, RecordOutcome::Committed(expected));
    assert_eq!(recorder.key_combo(), expected);
    assert_eq!(recorder.state(), RecorderState::Idle);
    assert_eq!(counter.suspends(), 1);
    assert_eq!(counter.resumes(), 1);
}

#[test]
fn test_reject_keeps_session_alive_for_retry() {
    let (mut recorder, counter) = counting_recorder();
    // Default policy: a modifier is required

    recorder.on_mouse_down(HitRegion::Capture);
    let outcome = recorder.on_key_down(keycode::K, native(ModifierFlags::NONE));

    assert_eq!(outcome, RecordOutcome::Rejected(RejectReason::ModifierRequired));
    assert_eq!(recorder.state(), RecorderState::Recording);
    assert_eq!(recorder.last_rejection(), Some(&RejectReason::ModifierRequired));
    assert_eq!(counter.resumes(), 0);

    // Retrying within the same session succeeds without a new suspend
    let outcome = recorder.on_key_down(keycode::K, native(ModifierFlags::COMMAND));
    assert!(matches!(outcome, RecordOutcome::Committed(_)));
    assert_eq!(counter.suspends(), 1);
    assert_eq!(counter.resumes(), 1);
    assert!(recorder.last_rejection().is_none());
}

#[test]
fn test_flags_changed_updates_pending_only() {
    let mut recorder = ShortcutRecorder::new();
    recorder.on_mouse_down(HitRegion::Capture);

    recorder.on_modifier_flags_changed(native(ModifierFlags::COMMAND | ModifierFlags::SHIFT));

    assert_eq!(
        recorder.pending_flags(),
        ModifierFlags::COMMAND | ModifierFlags::SHIFT
    );
    // Nothing committed, still recording
    assert_eq!(recorder.state(), RecorderState::Recording);
    assert!(!recorder.key_combo().is_set());
}

#[test]
fn test_pending_flags_masked_to_allowed() {
    let mut recorder = ShortcutRecorder::new();
    recorder.configure(FlagPolicy {
        allowed_flags: ModifierFlags::COMMAND | ModifierFlags::SHIFT,
        ..FlagPolicy::default()
    });

    recorder.on_mouse_down(HitRegion::Capture);
    recorder.on_modifier_flags_changed(native(ModifierFlags::COMMAND | ModifierFlags::CONTROL));

    assert_eq!(recorder.pending_flags(), ModifierFlags::COMMAND);
}

#[test]
fn test_flags_changed_ignored_when_idle() {
    let mut recorder = ShortcutRecorder::new();
    recorder.on_modifier_flags_changed(native(ModifierFlags::COMMAND));

    assert_eq!(recorder.pending_flags(), ModifierFlags::NONE);
}

#[test]
fn test_escape_cancels_by_default() {
    let (mut recorder, counter) = counting_recorder();
    let previous = KeyCombo::new(keycode::T, ModifierFlags::COMMAND);
    recorder.set_key_combo(previous);

    recorder.on_mouse_down(HitRegion::Capture);
    let outcome = recorder.on_key_down(keycode::ESCAPE, 0);

    assert_eq!(outcome, RecordOutcome::Cancelled);
    assert_eq!(recorder.state(), RecorderState::Idle);
    // The previously committed combo survives a cancel
    assert_eq!(recorder.key_combo(), previous);
    assert_eq!(counter.resumes(), 1);
}

#[test]
fn test_backspace_cancels_by_default() {
    let mut recorder = ShortcutRecorder::new();
    recorder.on_mouse_down(HitRegion::Capture);

    assert_eq!(recorder.on_key_down(keycode::BACKSPACE, 0), RecordOutcome::Cancelled);
    assert_eq!(recorder.state(), RecorderState::Idle);
}

#[test]
fn test_escape_routes_through_validation_when_recordable() {
    let mut recorder = ShortcutRecorder::new();
    recorder.configure(FlagPolicy {
        escape_keys_record: true,
        ..FlagPolicy::default()
    });

    recorder.on_mouse_down(HitRegion::Capture);

    // Bare escape fails the key-only policy instead of cancelling
    let outcome = recorder.on_key_down(keycode::ESCAPE, 0);
    assert_eq!(outcome, RecordOutcome::Rejected(RejectReason::ModifierRequired));
    assert_eq!(recorder.state(), RecorderState::Recording);

    // ⌘⎋ is an ordinary recordable combination
    let outcome = recorder.on_key_down(keycode::ESCAPE, native(ModifierFlags::COMMAND));
    assert_eq!(
        outcome,
        RecordOutcome::Committed(KeyCombo::new(keycode::ESCAPE, ModifierFlags::COMMAND))
    );
}

#[test]
fn test_focus_loss_abandons_session() {
    let (mut recorder, counter) = counting_recorder();
    let previous = KeyCombo::new(keycode::T, ModifierFlags::COMMAND);
    recorder.set_key_combo(previous);

    recorder.on_mouse_down(HitRegion::Capture);
    recorder.on_focus_lost();

    assert_eq!(recorder.state(), RecorderState::Idle);
    assert_eq!(recorder.key_combo(), previous);
    assert_eq!(counter.suspends(), 1);
    assert_eq!(counter.resumes(), 1);
}

#[test]
fn test_key_down_ignored_when_not_recording() {
    let mut recorder = ShortcutRecorder::new();

    assert_eq!(
        recorder.on_key_down(keycode::K, native(ModifierFlags::COMMAND)),
        RecordOutcome::Ignored
    );
    assert!(!recorder.key_combo().is_set());
}

#[test]
fn test_programmatic_set_bypasses_validation() {
    let mut recorder = ShortcutRecorder::new();
    // Delegate that would veto everything
    recorder.set_validation_delegate(|_, _| DelegateVerdict::Deny(None));

    let combo = KeyCombo::new(keycode::Q, ModifierFlags::COMMAND);
    recorder.set_key_combo(combo);

    assert_eq!(recorder.key_combo(), combo);
}

#[test]
fn test_programmatic_set_clears_in_flight_session() {
    let (mut recorder, counter) = counting_recorder();

    recorder.on_mouse_down(HitRegion::Capture);
    recorder.set_key_combo(KeyCombo::new(keycode::J, ModifierFlags::OPTION));

    assert_eq!(recorder.state(), RecorderState::Idle);
    assert_eq!(counter.suspends(), 1);
    assert_eq!(counter.resumes(), 1);
}

#[test]
fn test_change_notification_fires_only_on_committed_change() {
    let mut recorder = ShortcutRecorder::new();

    let seen: Rc<RefCell<Vec<KeyCombo>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    recorder.on_key_combo_changed(move |combo| sink.borrow_mut().push(combo));

    // Rejection fires nothing (default policy requires a modifier)
    recorder.on_mouse_down(HitRegion::Capture);
    recorder.on_key_down(keycode::K, native(ModifierFlags::NONE));
    assert!(seen.borrow().is_empty());

    // Accept fires once
    let combo = KeyCombo::new(keycode::K, ModifierFlags::COMMAND);
    recorder.on_key_down(keycode::K, native(ModifierFlags::COMMAND));
    assert_eq!(seen.borrow().as_slice(), &[combo]);

    // Programmatic set to the same value fires nothing
    recorder.set_key_combo(combo);
    assert_eq!(seen.borrow().len(), 1);

    // Programmatic set to a new value fires
    let other = KeyCombo::new(keycode::P, ModifierFlags::CONTROL);
    recorder.set_key_combo(other);
    assert_eq!(seen.borrow().as_slice(), &[combo, other]);
}

#[test]
fn test_clear_click_clears_committed_combo() {
    let mut recorder = ShortcutRecorder::new();
    let seen: Rc<RefCell<Vec<KeyCombo>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    recorder.on_key_combo_changed(move |combo| sink.borrow_mut().push(combo));

    recorder.set_key_combo(KeyCombo::new(keycode::K, ModifierFlags::COMMAND));
    assert_eq!(recorder.on_mouse_down(HitRegion::Clear), RecordOutcome::Cleared);
    assert!(!recorder.key_combo().is_set());
    assert_eq!(seen.borrow().last(), Some(&KeyCombo::CLEAR));

    // Clearing an already-empty combo does nothing
    let notifications = seen.borrow().len();
    assert_eq!(recorder.on_mouse_down(HitRegion::Clear), RecordOutcome::Ignored);
    assert_eq!(seen.borrow().len(), notifications);
}

#[test]
fn test_clear_click_while_recording_snaps_back() {
    let (mut recorder, counter) = counting_recorder();
    let previous = KeyCombo::new(keycode::K, ModifierFlags::COMMAND);
    recorder.set_key_combo(previous);

    recorder.on_mouse_down(HitRegion::Capture);
    assert_eq!(recorder.on_mouse_down(HitRegion::Clear), RecordOutcome::Cancelled);

    // Snapback keeps the committed combo
    assert_eq!(recorder.key_combo(), previous);
    assert_eq!(recorder.state(), RecorderState::Idle);
    assert_eq!(counter.resumes(), 1);
}

#[test]
fn test_hover_transitions() {
    let mut recorder = ShortcutRecorder::new();

    recorder.on_pointer_moved(Some(HitRegion::Capture));
    assert_eq!(recorder.state(), RecorderState::Hovering);

    recorder.on_pointer_moved(Some(HitRegion::Clear));
    assert_eq!(recorder.state(), RecorderState::Removing);

    recorder.on_pointer_moved(None);
    assert_eq!(recorder.state(), RecorderState::Idle);
}

#[test]
fn test_hover_does_not_interrupt_recording() {
    let mut recorder = ShortcutRecorder::new();
    recorder.on_mouse_down(HitRegion::Capture);

    recorder.on_pointer_moved(None);
    assert_eq!(recorder.state(), RecorderState::Recording);
}

#[test]
fn test_menu_conflict_surfaces_through_recorder() {
    let mut recorder = ShortcutRecorder::new();
    recorder.configure(permissive_policy());
    recorder.set_menu_source(|| {
        MenuSnapshot::new(vec![MenuItem::with_equivalent(
            "New",
            'n',
            ModifierFlags::COMMAND,
        )])
    });

    recorder.on_mouse_down(HitRegion::Capture);
    let outcome = recorder.on_key_down(keycode::N, native(ModifierFlags::COMMAND));

    assert_eq!(
        outcome,
        RecordOutcome::Rejected(RejectReason::MenuConflict {
            title: "New".to_string()
        })
    );

    // Excluding the item lifts the conflict within the same session
    recorder.set_excluded_titles(vec!["New".to_string()]);
    let outcome = recorder.on_key_down(keycode::N, native(ModifierFlags::COMMAND));
    assert!(matches!(outcome, RecordOutcome::Committed(_)));
}

#[test]
fn test_inconsistent_policy_reconciled_at_configure_time() {
    let mut recorder = ShortcutRecorder::new();
    recorder.configure(FlagPolicy {
        allowed_flags: ModifierFlags::SHIFT,
        required_flags: ModifierFlags::COMMAND,
        allows_key_only: false,
        escape_keys_record: false,
    });

    // Required flags won: ⌘⇧K validates against the widened mask
    recorder.on_mouse_down(HitRegion::Capture);
    let outcome = recorder.on_key_down(
        keycode::K,
        native(ModifierFlags::COMMAND | ModifierFlags::SHIFT),
    );
    assert!(matches!(outcome, RecordOutcome::Committed(_)));
}

#[test]
fn test_display_string_of_committed_combo() {
    let mut recorder = ShortcutRecorder::new();
    recorder.set_key_combo(KeyCombo::new(
        keycode::K,
        ModifierFlags::COMMAND | ModifierFlags::SHIFT,
    ));

    assert_eq!(recorder.display_string(), "⇧⌘K");
}
