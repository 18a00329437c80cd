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

//! Global hotkey dispatch suspension
//!
//! While a combination is being recorded, system-wide hotkey dispatch must
//! be suspended for the process or the keystroke would be stolen before the
//! widget sees it. This module owns only the *lifecycle* of that
//! suspension; the mechanism itself is host-supplied through
//! [`DispatchSuspension`].
//!
//! # Balance invariant
//!
//! Every `suspend` is matched by exactly one `resume` on every exit path
//! from recording (accept, cancel, focus loss, programmatic set). The
//! [`SuspendGuard`] enforces this with deterministic destruction: dropping
//! an unreleased guard resumes, so even an aborted session cannot leak the
//! suspension.
//!
//! A `resume` without a matching `suspend` is a programming error: it
//! asserts in debug builds and is ignored in release builds.

use std::cell::RefCell;
use std::rc::Rc;

/// Host-supplied mechanism that turns process-wide hotkey dispatch off
/// and back on. The default [`NullSuspension`] does nothing.
pub trait DispatchSuspension {
    /// Disable system-wide hotkey dispatch for the process.
    fn suspend_dispatch(&mut self);

    /// Restore system-wide hotkey dispatch.
    fn resume_dispatch(&mut self);
}

/// No-op suspension for hosts without global hotkeys (and for tests).
#[derive(Debug, Default)]
pub struct NullSuspension;

impl DispatchSuspension for NullSuspension {
    fn suspend_dispatch(&mut self) {}

    fn resume_dispatch(&mut self) {}
}

/// Opaque proof of an outstanding suspension.
///
/// Deliberately neither `Clone` nor `Copy`: handing it to
/// [`HotKeyLifecycle::resume`] consumes it, so a token cannot be resumed
/// twice.
#[derive(Debug)]
pub struct SuspendToken {
    id: u64,
}

/// Manages the single outstanding dispatch suspension for one widget.
pub struct HotKeyLifecycle {
    capture_enabled: bool,
    hook: Box<dyn DispatchSuspension>,
    active: Option<u64>,
    next_id: u64,
}

impl HotKeyLifecycle {
    /// Creates a lifecycle with global capture enabled, backed by the
    /// given host mechanism.
    pub fn new(hook: Box<dyn DispatchSuspension>) -> Self {
        Self {
            capture_enabled: true,
            hook,
            active: None,
            next_id: 0,
        }
    }

    /// Creates a lifecycle with global capture disabled: `suspend` and
    /// `resume` become no-ops and no token is ever allocated.
    pub fn disabled() -> Self {
        Self {
            capture_enabled: false,
            hook: Box::new(NullSuspension),
            active: None,
            next_id: 0,
        }
    }

    /// Whether global capture is currently configured on.
    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled
    }

    /// Turns global capture on or off for future sessions.
    pub fn set_capture_enabled(&mut self, enabled: bool) {
        self.capture_enabled = enabled;
    }

    /// True while a suspension is outstanding.
    pub fn is_suspended(&self) -> bool {
        self.active.is_some()
    }

    /// Suspends system-wide hotkey dispatch.
    ///
    /// Returns `None` without touching the host mechanism when capture is
    /// disabled, or when a suspension is already outstanding (the state
    /// machine prevents the latter; it is reported as misuse here).
    pub fn suspend(&mut self) -> Option<SuspendToken> {
        if !self.capture_enabled {
            return None;
        }
        if self.active.is_some() {
            debug_assert!(false, "suspend while already suspended");
            log::warn!("hotkey dispatch suspend requested while already suspended");
            return None;
        }

        self.next_id += 1;
        self.active = Some(self.next_id);
        self.hook.suspend_dispatch();
        log::debug!("hotkey dispatch suspended (token {})", self.next_id);
        Some(SuspendToken { id: self.next_id })
    }

    /// Resumes system-wide hotkey dispatch for the given token.
    ///
    /// A token that does not match the outstanding suspension asserts in
    /// debug builds and is ignored in release builds.
    pub fn resume(&mut self, token: SuspendToken) {
        match self.active {
            Some(id) if id == token.id => {
                self.active = None;
                self.hook.resume_dispatch();
                log::debug!("hotkey dispatch resumed (token {})", token.id);
            }
            _ => {
                debug_assert!(false, "resume without matching suspend");
                log::warn!(
                    "hotkey dispatch resume for stale token {} ignored",
                    token.id
                );
            }
        }
    }
}

/// Scoped suspension: acquired when recording starts, released exactly
/// once when the session ends however it ends.
pub struct SuspendGuard {
    lifecycle: Rc<RefCell<HotKeyLifecycle>>,
    token: Option<SuspendToken>,
}

impl SuspendGuard {
    /// Suspends dispatch and captures the token (if capture is enabled).
    pub fn acquire(lifecycle: Rc<RefCell<HotKeyLifecycle>>) -> Self {
        let token = lifecycle.borrow_mut().suspend();
        Self { lifecycle, token }
    }

    /// Explicitly releases the suspension.
    pub fn release(mut self) {
        self.release_token();
    }

    fn release_token(&mut self) {
        if let Some(token) = self.token.take() {
            self.lifecycle.borrow_mut().resume(token);
        }
    }
}

impl Drop for SuspendGuard {
    fn drop(&mut self) {
        self.release_token();
    }
}

#[cfg(test)]
mod tests;
