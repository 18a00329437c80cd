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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms
//! for shortcut capture, including:
//! - Value types for combinations, modifier masks, and recording policy
//! - Translation between the two native modifier-mask encodings
//! - The ordered validation pipeline with menu-conflict scanning
//! - Duplicate key-equivalent detection over menu snapshots
//! - The menu-definition file parser used by the CLI
//!
//! All business logic is isolated from UI and I/O concerns so it can be
//! unit-tested without a host event loop.

pub mod conflict;
pub mod flags;
pub mod keys;
pub mod menu;
pub mod parser;
pub mod types;
pub mod validator;

pub use conflict::{Conflict, ConflictDetector};
pub use flags::{from_canonical, to_canonical, FlagEncoding};
pub use menu::{KeyEquivalent, MenuItem, MenuSnapshot};
pub use types::*;
pub use validator::{validate_combo, DelegateVerdict, RejectReason, ValidationOutcome};

#[cfg(test)]
mod tests;
