//! src/core/keys.rs
//!
//! Virtual key code table for the ANSI layout
//!
//! Key codes are the platform's hardware-independent virtual codes. This
//! module maps them to display strings (glyphs for named keys, the key cap
//! for everything else), to the lowercase character used when matching menu
//! key equivalents, and back from the names accepted on the command line.

/// ANSI virtual key codes.
pub mod keycode {
    pub const A: i32 = 0x00;
    pub const S: i32 = 0x01;
    pub const D: i32 = 0x02;
    pub const F: i32 = 0x03;
    pub const H: i32 = 0x04;
    pub const G: i32 = 0x05;
    pub const Z: i32 = 0x06;
    pub const X: i32 = 0x07;
    pub const C: i32 = 0x08;
    pub const V: i32 = 0x09;
    pub const B: i32 = 0x0B;
    pub const Q: i32 = 0x0C;
    pub const W: i32 = 0x0D;
    pub const E: i32 = 0x0E;
    pub const R: i32 = 0x0F;
    pub const Y: i32 = 0x10;
    pub const T: i32 = 0x11;
    pub const DIGIT_1: i32 = 0x12;
    pub const DIGIT_2: i32 = 0x13;
    pub const DIGIT_3: i32 = 0x14;
    pub const DIGIT_4: i32 = 0x15;
    pub const DIGIT_6: i32 = 0x16;
    pub const DIGIT_5: i32 = 0x17;
    pub const EQUAL: i32 = 0x18;
    pub const DIGIT_9: i32 = 0x19;
    pub const DIGIT_7: i32 = 0x1A;
    pub const MINUS: i32 = 0x1B;
    pub const DIGIT_8: i32 = 0x1C;
    pub const DIGIT_0: i32 = 0x1D;
    pub const BRACKET_RIGHT: i32 = 0x1E;
    pub const O: i32 = 0x1F;
    pub const U: i32 = 0x20;
    pub const BRACKET_LEFT: i32 = 0x21;
    pub const I: i32 = 0x22;
    pub const P: i32 = 0x23;
    pub const RETURN: i32 = 0x24;
    pub const L: i32 = 0x25;
    pub const J: i32 = 0x26;
    pub const QUOTE: i32 = 0x27;
    pub const K: i32 = 0x28;
    pub const SEMICOLON: i32 = 0x29;
    pub const BACKSLASH: i32 = 0x2A;
    pub const COMMA: i32 = 0x2B;
    pub const SLASH: i32 = 0x2C;
    pub const N: i32 = 0x2D;
    pub const M: i32 = 0x2E;
    pub const PERIOD: i32 = 0x2F;
    pub const TAB: i32 = 0x30;
    pub const SPACE: i32 = 0x31;
    pub const BACKQUOTE: i32 = 0x32;
    pub const BACKSPACE: i32 = 0x33;
    pub const ESCAPE: i32 = 0x35;
    pub const F1: i32 = 0x7A;
    pub const F2: i32 = 0x78;
    pub const F3: i32 = 0x63;
    pub const F4: i32 = 0x76;
    pub const F5: i32 = 0x60;
    pub const F6: i32 = 0x61;
    pub const F7: i32 = 0x62;
    pub const F8: i32 = 0x64;
    pub const F9: i32 = 0x65;
    pub const F10: i32 = 0x6D;
    pub const F11: i32 = 0x67;
    pub const F12: i32 = 0x6F;
    pub const HOME: i32 = 0x73;
    pub const PAGE_UP: i32 = 0x74;
    pub const FORWARD_DELETE: i32 = 0x75;
    pub const END: i32 = 0x77;
    pub const PAGE_DOWN: i32 = 0x79;
    pub const ARROW_LEFT: i32 = 0x7B;
    pub const ARROW_RIGHT: i32 = 0x7C;
    pub const ARROW_DOWN: i32 = 0x7D;
    pub const ARROW_UP: i32 = 0x7E;
}

struct KeyDef {
    code: i32,
    /// Name accepted on the command line (case-insensitive)
    name: &'static str,
    /// Rendering used in display strings
    display: &'static str,
    /// Character compared against menu key equivalents
    equivalent: Option<char>,
}

macro_rules! cap {
    ($code:expr, $name:literal, $ch:literal) => {
        KeyDef {
            code: $code,
            name: $name,
            display: $name,
            equivalent: Some($ch),
        }
    };
}

use keycode::*;

const KEYS: &[KeyDef] = &[
    cap!(A, "A", 'a'),
    cap!(B, "B", 'b'),
    cap!(C, "C", 'c'),
    cap!(D, "D", 'd'),
    cap!(E, "E", 'e'),
    cap!(F, "F", 'f'),
    cap!(G, "G", 'g'),
    cap!(H, "H", 'h'),
    cap!(I, "I", 'i'),
    cap!(J, "J", 'j'),
    cap!(K, "K", 'k'),
    cap!(L, "L", 'l'),
    cap!(M, "M", 'm'),
    cap!(N, "N", 'n'),
    cap!(O, "O", 'o'),
    cap!(P, "P", 'p'),
    cap!(Q, "Q", 'q'),
    cap!(R, "R", 'r'),
    cap!(S, "S", 's'),
    cap!(T, "T", 't'),
    cap!(U, "U", 'u'),
    cap!(V, "V", 'v'),
    cap!(W, "W", 'w'),
    cap!(X, "X", 'x'),
    cap!(Y, "Y", 'y'),
    cap!(Z, "Z", 'z'),
    cap!(DIGIT_0, "0", '0'),
    cap!(DIGIT_1, "1", '1'),
    cap!(DIGIT_2, "2", '2'),
    cap!(DIGIT_3, "3", '3'),
    cap!(DIGIT_4, "4", '4'),
    cap!(DIGIT_5, "5", '5'),
    cap!(DIGIT_6, "6", '6'),
    cap!(DIGIT_7, "7", '7'),
    cap!(DIGIT_8, "8", '8'),
    cap!(DIGIT_9, "9", '9'),
    cap!(EQUAL, "=", '='),
    cap!(MINUS, "-", '-'),
    cap!(BRACKET_LEFT, "[", '['),
    cap!(BRACKET_RIGHT, "]", ']'),
    cap!(QUOTE, "'", '\''),
    cap!(SEMICOLON, ";", ';'),
    cap!(BACKSLASH, "\\", '\\'),
    cap!(COMMA, ",", ','),
    cap!(SLASH, "/", '/'),
    cap!(PERIOD, ".", '.'),
    cap!(BACKQUOTE, "`", '`'),
    KeyDef {
        code: SPACE,
        name: "Space",
        display: "Space",
        equivalent: Some(' '),
    },
    KeyDef {
        code: RETURN,
        name: "Return",
        display: "\u{21A9}", // ↩
        equivalent: None,
    },
    KeyDef {
        code: TAB,
        name: "Tab",
        display: "\u{21E5}", // ⇥
        equivalent: None,
    },
    KeyDef {
        code: BACKSPACE,
        name: "Backspace",
        display: "\u{232B}", // ⌫
        equivalent: None,
    },
    KeyDef {
        code: ESCAPE,
        name: "Escape",
        display: "\u{238B}", // ⎋
        equivalent: None,
    },
    KeyDef {
        code: FORWARD_DELETE,
        name: "Delete",
        display: "\u{2326}", // ⌦
        equivalent: None,
    },
    KeyDef {
        code: HOME,
        name: "Home",
        display: "\u{2196}", // ↖
        equivalent: None,
    },
    KeyDef {
        code: END,
        name: "End",
        display: "\u{2198}", // ↘
        equivalent: None,
    },
    KeyDef {
        code: PAGE_UP,
        name: "PageUp",
        display: "\u{21DE}", // ⇞
        equivalent: None,
    },
    KeyDef {
        code: PAGE_DOWN,
        name: "PageDown",
        display: "\u{21DF}", // ⇟
        equivalent: None,
    },
    KeyDef {
        code: ARROW_LEFT,
        name: "Left",
        display: "\u{2190}", // ←
        equivalent: None,
    },
    KeyDef {
        code: ARROW_RIGHT,
        name: "Right",
        display: "\u{2192}", // →
        equivalent: None,
    },
    KeyDef {
        code: ARROW_UP,
        name: "Up",
        display: "\u{2191}", // ↑
        equivalent: None,
    },
    KeyDef {
        code: ARROW_DOWN,
        name: "Down",
        display: "\u{2193}", // ↓
        equivalent: None,
    },
    KeyDef {
        code: F1,
        name: "F1",
        display: "F1",
        equivalent: None,
    },
    KeyDef {
        code: F2,
        name: "F2",
        display: "F2",
        equivalent: None,
    },
    KeyDef {
        code: F3,
        name: "F3",
        display: "F3",
        equivalent: None,
    },
    KeyDef {
        code: F4,
        name: "F4",
        display: "F4",
        equivalent: None,
    },
    KeyDef {
        code: F5,
        name: "F5",
        display: "F5",
        equivalent: None,
    },
    KeyDef {
        code: F6,
        name: "F6",
        display: "F6",
        equivalent: None,
    },
    KeyDef {
        code: F7,
        name: "F7",
        display: "F7",
        equivalent: None,
    },
    KeyDef {
        code: F8,
        name: "F8",
        display: "F8",
        equivalent: None,
    },
    KeyDef {
        code: F9,
        name: "F9",
        display: "F9",
        equivalent: None,
    },
    KeyDef {
        code: F10,
        name: "F10",
        display: "F10",
        equivalent: None,
    },
    KeyDef {
        code: F11,
        name: "F11",
        display: "F11",
        equivalent: None,
    },
    KeyDef {
        code: F12,
        name: "F12",
        display: "F12",
        equivalent: None,
    },
];

fn lookup(key_code: i32) -> Option<&'static KeyDef> {
    KEYS.iter().find(|k| k.code == key_code)
}

/// Rendering of a key for display strings, e.g. `"K"`, `"Space"`, `"⎋"`.
pub fn display_name(key_code: i32) -> Option<&'static str> {
    lookup(key_code).map(|k| k.display)
}

/// The lowercase character a menu item would carry as its key equivalent
/// for this key, if it has one.
pub fn key_equivalent_char(key_code: i32) -> Option<char> {
    lookup(key_code).and_then(|k| k.equivalent)
}

/// Reverse lookup from a command-line key name (case-insensitive).
pub fn key_code_for_name(name: &str) -> Option<i32> {
    KEYS.iter()
        .find(|k| k.name.eq_ignore_ascii_case(name))
        .map(|k| k.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_round_trip() {
        assert_eq!(display_name(keycode::K), Some("K"));
        assert_eq!(key_equivalent_char(keycode::K), Some('k'));
        assert_eq!(key_code_for_name("k"), Some(keycode::K));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_code_for_name("space"), Some(keycode::SPACE));
        assert_eq!(key_code_for_name("Escape"), Some(keycode::ESCAPE));
        assert_eq!(display_name(keycode::ESCAPE), Some("\u{238B}"));
        assert_eq!(key_equivalent_char(keycode::ESCAPE), None);
    }

    #[test]
    fn test_unknown_key_code() {
        assert_eq!(display_name(0x0A), None);
        assert_eq!(key_code_for_name("hyper"), None);
    }
}
