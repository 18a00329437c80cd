//! src/core/types.rs
//!
//! Core type definitions for shortcut capture
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Modifier`: the four modifier keys (command, control, option, shift)
//! - `ModifierFlags`: a canonical, encoding-agnostic bitmask of modifiers
//! - `KeyCombo`: a recorded (key code, modifier flags) pair
//! - `FlagPolicy`: which modifiers a recording may / must use
//!
//! All value types implement serialization for autosave persistence and
//! are plain `Copy` data with field-wise equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::core::keys;

/// Keyboard modifier keys
///
/// The canonical representation is deliberately ignorant of how either
/// platform API packs these into a mask; see `core::flags` for the two
/// native encodings.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Modifier {
    /// Command key
    Command,
    /// Control key
    Control,
    /// Option/Alt key
    Option,
    /// Shift key
    Shift,
}

impl Modifier {
    /// All modifiers in canonical display order (⌃⌥⇧⌘).
    pub const ALL: [Modifier; 4] = [
        Modifier::Control,
        Modifier::Option,
        Modifier::Shift,
        Modifier::Command,
    ];

    /// Platform glyph used when rendering a combination.
    pub fn glyph(self) -> char {
        match self {
            Modifier::Command => '\u{2318}', // ⌘
            Modifier::Control => '\u{2303}', // ⌃
            Modifier::Option => '\u{2325}',  // ⌥
            Modifier::Shift => '\u{21E7}',   // ⇧
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Command => write!(f, "CMD"),
            Modifier::Control => write!(f, "CTRL"),
            Modifier::Option => write!(f, "OPT"),
            Modifier::Shift => write!(f, "SHIFT"),
        }
    }
}

/// Canonical modifier bitmask
///
/// One independent bit per modifier. This is the only representation the
/// validator and state machine ever see; native event masks are translated
/// at the boundary by `core::flags`.
///
/// # Example
/// ```
/// use shortcut_capture::core::types::ModifierFlags;
///
/// let flags = ModifierFlags::COMMAND | ModifierFlags::SHIFT;
/// assert!(flags.contains(ModifierFlags::COMMAND));
/// assert!(!flags.contains(ModifierFlags::CONTROL));
/// ```
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct ModifierFlags(u8);

impl ModifierFlags {
    /// No modifiers held.
    pub const NONE: ModifierFlags = ModifierFlags(0);
    /// Command bit.
    pub const COMMAND: ModifierFlags = ModifierFlags(1 << 0);
    /// Control bit.
    pub const CONTROL: ModifierFlags = ModifierFlags(1 << 1);
    /// Option bit.
    pub const OPTION: ModifierFlags = ModifierFlags(1 << 2);
    /// Shift bit.
    pub const SHIFT: ModifierFlags = ModifierFlags(1 << 3);
    /// Every modifier bit set.
    pub const ALL: ModifierFlags = ModifierFlags(0b1111);

    /// The bit for a single modifier.
    pub fn from_modifier(modifier: Modifier) -> Self {
        match modifier {
            Modifier::Command => Self::COMMAND,
            Modifier::Control => Self::CONTROL,
            Modifier::Option => Self::OPTION,
            Modifier::Shift => Self::SHIFT,
        }
    }

    /// True when every bit of `other` is set in `self`.
    pub fn contains(self, other: ModifierFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when `self` and `other` share at least one bit.
    pub fn intersects(self, other: ModifierFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// True when no modifier is held.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Bits of `self` that are not in `other`.
    pub fn difference(self, other: ModifierFlags) -> ModifierFlags {
        ModifierFlags(self.0 & !other.0)
    }

    /// The modifiers present, in canonical display order.
    pub fn modifiers(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(move |m| self.contains(Self::from_modifier(*m)))
    }
}

impl BitOr for ModifierFlags {
    type Output = ModifierFlags;

    fn bitor(self, rhs: ModifierFlags) -> ModifierFlags {
        ModifierFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModifierFlags {
    fn bitor_assign(&mut self, rhs: ModifierFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModifierFlags {
    type Output = ModifierFlags;

    fn bitand(self, rhs: ModifierFlags) -> ModifierFlags {
        ModifierFlags(self.0 & rhs.0)
    }
}

impl From<Modifier> for ModifierFlags {
    fn from(modifier: Modifier) -> Self {
        Self::from_modifier(modifier)
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers() {
            write!(f, "{}", modifier.glyph())?;
        }
        Ok(())
    }
}

/// A recorded key combination
///
/// Value object produced by successful validation and held by the widget
/// until replaced or cleared. `key_code` is the platform virtual key code;
/// `-1` means no combination is set. Equality is by both fields.
///
/// # Example
/// ```
/// use shortcut_capture::core::types::{KeyCombo, ModifierFlags};
/// use shortcut_capture::core::keys;
///
/// let combo = KeyCombo::new(keys::keycode::K, ModifierFlags::COMMAND | ModifierFlags::SHIFT);
/// assert_eq!(combo.to_string(), "⇧⌘K");
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct KeyCombo {
    /// Platform virtual key code; -1 when unset
    pub key_code: i32,

    /// Canonical modifier flags
    pub flags: ModifierFlags,
}

impl KeyCombo {
    /// The empty combination (nothing recorded).
    pub const CLEAR: KeyCombo = KeyCombo {
        key_code: -1,
        flags: ModifierFlags::NONE,
    };

    /// Creates a combination from a key code and canonical flags.
    pub fn new(key_code: i32, flags: ModifierFlags) -> Self {
        Self { key_code, flags }
    }

    /// True when a key has actually been recorded.
    pub fn is_set(&self) -> bool {
        self.key_code >= 0
    }
}

impl Default for KeyCombo {
    fn default() -> Self {
        Self::CLEAR
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_set() {
            return Ok(());
        }
        write!(f, "{}", self.flags)?;
        match keys::display_name(self.key_code) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "#{}", self.key_code),
        }
    }
}

/// Recording policy for modifier flags
///
/// Configured on the widget before recording starts. The invariant
/// `required_flags ⊆ allowed_flags` is enforced at configuration time by
/// [`FlagPolicy::reconciled`]; required flags win when the caller supplies
/// an inconsistent pair.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FlagPolicy {
    /// Modifiers the combination may use
    pub allowed_flags: ModifierFlags,

    /// Modifiers the combination must include
    pub required_flags: ModifierFlags,

    /// Permit a combination with zero modifiers
    pub allows_key_only: bool,

    /// Whether Escape/Backspace are recordable keys instead of cancelling
    pub escape_keys_record: bool,
}

impl Default for FlagPolicy {
    fn default() -> Self {
        Self {
            allowed_flags: ModifierFlags::ALL,
            required_flags: ModifierFlags::NONE,
            allows_key_only: false,
            escape_keys_record: false,
        }
    }
}

impl FlagPolicy {
    /// True when the required mask is a subset of the allowed mask.
    pub fn is_reconciled(&self) -> bool {
        self.allowed_flags.contains(self.required_flags)
    }

    /// Returns the policy with the subset invariant restored.
    ///
    /// Required flags win: any required modifier missing from the allowed
    /// mask is added to it.
    pub fn reconciled(self) -> Self {
        Self {
            allowed_flags: self.allowed_flags | self.required_flags,
            ..self
        }
    }
}
