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

//! Shortcut Capture
//!
//! The interaction core of a keyboard-shortcut capture widget: a user
//! presses a key combination and the widget records it, rejecting
//! combinations that collide with application menus or a caller-supplied
//! policy.
//!
//! # Features
//!
//! - **Recording state machine:** click to record, retry on rejection,
//!   cancel via escape, clear affordance, or focus loss
//! - **Ordered validation:** structural checks, live menu-conflict
//!   scanning, and a delegate veto, every rejection with a readable reason
//! - **Flag translation:** pure bijection between the window-server and
//!   legacy hotkey modifier-mask encodings
//! - **Scoped hotkey suspension:** system-wide dispatch is suspended for
//!   exactly the lifetime of a recording session
//! - **Autosave store:** atomic JSON persistence of named combinations
//!
//! # Architecture
//!
//! - **`core`:** value types, flag translation, validation, menu snapshots
//! - **`recorder`:** the event-driven state machine
//! - **`hotkey`:** dispatch-suspension lifecycle with drop-safe guards
//! - **`config`:** autosave persistence (host-driven, never touched by the
//!   recorder itself)
//!
//! Rendering, hit-testing geometry, and the OS hotkey mechanism are the
//! host's responsibility; events arrive pre-digested and the suspension
//! backend is a trait object.
//!
//! # Examples
//!
//! ## Recording a combination
//!
//! ```
//! use shortcut_capture::core::flags::{from_canonical, FlagEncoding};
//! use shortcut_capture::core::keys::keycode;
//! use shortcut_capture::core::types::ModifierFlags;
//! use shortcut_capture::recorder::{HitRegion, RecordOutcome, ShortcutRecorder};
//!
//! let mut recorder = ShortcutRecorder::new();
//! recorder.on_mouse_down(HitRegion::Capture);
//!
//! let native = from_canonical(ModifierFlags::COMMAND | ModifierFlags::SHIFT,
//!                             FlagEncoding::WindowServer);
//! match recorder.on_key_down(keycode::K, native) {
//!     RecordOutcome::Committed(combo) => assert_eq!(combo.to_string(), "⇧⌘K"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## Rejecting a menu conflict
//!
//! ```
//! use shortcut_capture::core::menu::{MenuItem, MenuSnapshot};
//! use shortcut_capture::core::types::{FlagPolicy, ModifierFlags};
//! use shortcut_capture::core::keys::keycode;
//! use shortcut_capture::core::validator::{validate_combo, RejectReason};
//!
//! let menu = MenuSnapshot::new(vec![
//!     MenuItem::with_equivalent("New", 'n', ModifierFlags::COMMAND),
//! ]);
//!
//! let outcome = validate_combo(
//!     keycode::N,
//!     ModifierFlags::COMMAND,
//!     &FlagPolicy::default(),
//!     Some(&menu),
//!     &[],
//!     None,
//! );
//! assert_eq!(outcome, Err(RejectReason::MenuConflict { title: "New".into() }));
//! ```

pub mod config;
pub mod core;
pub mod hotkey;
pub mod recorder;

// Re-export commonly used types for convenience
pub use crate::core::{FlagPolicy, KeyCombo, Modifier, ModifierFlags};
pub use crate::recorder::{RecordOutcome, RecorderState, ShortcutRecorder};
