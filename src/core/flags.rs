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

//! Modifier-mask translation between the two native encodings
//!
//! The host platform carries two incompatible bit layouts for the same
//! four physical modifier keys: the window-server event mask and the
//! legacy hotkey-API mask. Neither matches the other's bit ordering, so
//! the mapping is a fixed per-modifier bijection rather than a shift.
//!
//! Translation is pure and total: every combination of the four bits is
//! representable in both encodings, and unrelated bits in a native mask
//! (caps lock, function, device-dependent noise) are dropped on the way
//! to canonical form.

use crate::core::types::{Modifier, ModifierFlags};

/// Native modifier-mask encodings understood by the translator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlagEncoding {
    /// Window-server event mask (device-independent modifier bits)
    WindowServer,
    /// Legacy hotkey-API mask
    LegacyHotKey,
}

impl FlagEncoding {
    /// The native bit for one modifier in this encoding.
    ///
    /// Window-server: shift 1<<17, control 1<<18, option 1<<19,
    /// command 1<<20. Legacy hotkey: command 1<<8, shift 1<<9,
    /// option 1<<11, control 1<<12.
    pub fn native_bit(self, modifier: Modifier) -> u32 {
        match (self, modifier) {
            (FlagEncoding::WindowServer, Modifier::Shift) => 1 << 17,
            (FlagEncoding::WindowServer, Modifier::Control) => 1 << 18,
            (FlagEncoding::WindowServer, Modifier::Option) => 1 << 19,
            (FlagEncoding::WindowServer, Modifier::Command) => 1 << 20,
            (FlagEncoding::LegacyHotKey, Modifier::Command) => 1 << 8,
            (FlagEncoding::LegacyHotKey, Modifier::Shift) => 1 << 9,
            (FlagEncoding::LegacyHotKey, Modifier::Option) => 1 << 11,
            (FlagEncoding::LegacyHotKey, Modifier::Control) => 1 << 12,
        }
    }
}

/// Translates a native modifier mask into canonical flags.
///
/// Bits the encoding does not define are ignored.
pub fn to_canonical(native: u32, encoding: FlagEncoding) -> ModifierFlags {
    let mut flags = ModifierFlags::NONE;
    for modifier in Modifier::ALL {
        if native & encoding.native_bit(modifier) != 0 {
            flags |= ModifierFlags::from_modifier(modifier);
        }
    }
    flags
}

/// Translates canonical flags into a native modifier mask.
pub fn from_canonical(flags: ModifierFlags, encoding: FlagEncoding) -> u32 {
    let mut native = 0u32;
    for modifier in Modifier::ALL {
        if flags.contains(ModifierFlags::from_modifier(modifier)) {
            native |= encoding.native_bit(modifier);
        }
    }
    native
}

/// Convenience: re-encode a native mask from one encoding to the other.
pub fn translate(native: u32, from: FlagEncoding, to: FlagEncoding) -> u32 {
    from_canonical(to_canonical(native, from), to)
}
