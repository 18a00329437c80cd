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

//! Key-combination validation
//!
//! Decides, combination by combination, whether a proposed shortcut may be
//! accepted. Checks run in a fixed order and short-circuit on the first
//! rejection, so the most actionable message surfaces first: structural
//! violations (missing modifier) before semantic conflicts (menu clash)
//! before caller-specific policy (delegate veto).
//!
//! A rejection is never silent and never fatal: every variant renders a
//! human-readable reason for the UI, and the recording session survives it
//! so the user can retry.

use thiserror::Error;

use crate::core::keys;
use crate::core::menu::MenuSnapshot;
use crate::core::types::{FlagPolicy, KeyCombo, ModifierFlags};

/// Why a proposed combination was rejected
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RejectReason {
    /// No key was pressed (key code is the unset sentinel)
    #[error("no key")]
    NoKey,

    /// A held modifier is outside the allowed mask
    #[error("disallowed modifier used")]
    DisallowedModifier,

    /// A required modifier is not held
    #[error("missing required modifier")]
    MissingRequiredModifier,

    /// No modifier held and the policy does not permit bare keys
    #[error("modifier required")]
    ModifierRequired,

    /// The combination is already taken by a menu item
    #[error("already used by menu item \"{title}\"")]
    MenuConflict { title: String },

    /// The validation delegate vetoed the combination
    #[error("{reason}")]
    Vetoed { reason: String },
}

/// Answer from the caller-supplied validation delegate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DelegateVerdict {
    /// The delegate permits the combination
    Allow,
    /// The delegate rejects it, optionally saying why
    Deny(Option<String>),
}

/// Caller-supplied veto: final say over a combination that passed every
/// structural and menu check.
pub type ValidationDelegate = dyn Fn(i32, ModifierFlags) -> DelegateVerdict;

/// Result of validating one proposed combination.
pub type ValidationOutcome = Result<KeyCombo, RejectReason>;

/// Validates a proposed (key code, flags) pair against the policy, the
/// menu snapshot, and the optional delegate.
///
/// Checks, in order (short-circuits on first rejection):
/// 1. the key code must be set;
/// 2. no held modifier may fall outside `policy.allowed_flags`;
/// 3. every bit of `policy.required_flags` must be held;
/// 4. a bare key needs `policy.allows_key_only`;
/// 5. the combination must not collide with a menu key equivalent
///    (submenus included; items in `excluded_titles` skipped);
/// 6. the delegate, when present, may veto with its own reason.
///
/// On success the normalised combination is returned.
pub fn validate_combo(
    key_code: i32,
    flags: ModifierFlags,
    policy: &FlagPolicy,
    menu: Option<&MenuSnapshot>,
    excluded_titles: &[String],
    delegate: Option<&ValidationDelegate>,
) -> ValidationOutcome {
    if key_code < 0 {
        return Err(RejectReason::NoKey);
    }

    let effective = flags & policy.allowed_flags;
    if !flags.difference(policy.allowed_flags).is_empty() {
        return Err(RejectReason::DisallowedModifier);
    }

    if !effective.contains(policy.required_flags) {
        return Err(RejectReason::MissingRequiredModifier);
    }

    if effective.is_empty() && !policy.allows_key_only {
        return Err(RejectReason::ModifierRequired);
    }

    if let (Some(menu), Some(character)) = (menu, keys::key_equivalent_char(key_code)) {
        if let Some(taken) = menu.find_equivalent(character, flags, excluded_titles) {
            return Err(RejectReason::MenuConflict { title: taken.title });
        }
    }

    if let Some(delegate) = delegate {
        if let DelegateVerdict::Deny(reason) = delegate(key_code, flags) {
            return Err(RejectReason::Vetoed {
                reason: reason.unwrap_or_else(|| "rejected by delegate".to_string()),
            });
        }
    }

    Ok(KeyCombo::new(key_code, flags))
}
