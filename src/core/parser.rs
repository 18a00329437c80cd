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

//! src/core/parser.rs
//!
//! Menu-definition file parser
//!
//! The CLI consumes the application menu as a small line-oriented text
//! format. Submenus nest with `menu`/`end` blocks; items carry their key
//! equivalent and title:
//!
//! ```text
//! menu File
//!   item = CMD, N, New Window
//!   menu Export
//!     item = CMD SHIFT, E, Export as PNG
//!   end
//! end
//! ```
//!
//! # Architecture
//! Item lines are parsed with nom combinators; the `menu`/`end` block
//! structure is tracked with an explicit stack in the outer loop. Line
//! numbers are carried into every error for reporting.

use nom::{
    bytes::complete::{tag, take_until},
    character::complete::{char, space0},
    combinator::rest,
    IResult, Parser,
};
use thiserror::Error;

use crate::core::menu::{MenuItem, MenuSnapshot};
use crate::core::types::ModifierFlags;

/// Parse errors with line number context
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Unknown modifier '{token}' on line {line}")]
    UnknownModifier { token: String, line: usize },

    #[error("Key equivalent must be a single character, got '{token}' on line {line}")]
    InvalidKeyEquivalent { token: String, line: usize },

    #[error("'end' without an open menu on line {line}")]
    UnbalancedEnd { line: usize },

    #[error("Menu '{title}' is never closed")]
    UnclosedMenu { title: String },
}

/// Parse a complete menu-definition file into a snapshot.
///
/// # Arguments
/// * `content` - The full file content as a string
///
/// # Returns
/// The parsed menu hierarchy, or a ParseError with line context
pub fn parse_menu_file(content: &str) -> Result<MenuSnapshot, ParseError> {
    let mut root: Vec<MenuItem> = Vec::new();
    // Open submenus; the innermost is last
    let mut stack: Vec<MenuItem> = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        // Skip empty lines and comments
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        if line_trimmed == "end" {
            let Some(closed) = stack.pop() else {
                return Err(ParseError::UnbalancedEnd { line: line_num });
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push(closed),
                None => root.push(closed),
            }
            continue;
        }

        if let Some(title) = line_trimmed.strip_prefix("menu ") {
            let title = title.trim();
            if title.is_empty() {
                return Err(ParseError::InvalidSyntax {
                    line: line_num,
                    message: "menu requires a title".to_string(),
                });
            }
            stack.push(MenuItem::submenu(title, Vec::new()));
            continue;
        }

        if line_trimmed.starts_with("item") {
            let item = parse_item_line(line_trimmed, line_num)?;
            match stack.last_mut() {
                Some(parent) => parent.children.push(item),
                None => root.push(item),
            }
            continue;
        }

        return Err(ParseError::InvalidSyntax {
            line: line_num,
            message: format!("unrecognised directive: {}", line_trimmed),
        });
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedMenu { title: open.title });
    }

    Ok(MenuSnapshot::new(root))
}

/// Parse a single item line
///
/// Format: item = MODIFIERS, KEY, TITLE
/// Example: item = CMD SHIFT, N, New Window
fn parse_item_line(input: &str, line_num: usize) -> Result<MenuItem, ParseError> {
    match parse_item_fields(input) {
        Ok((_, (modifier_str, key_str, title))) => {
            let flags = parse_modifier_flags(modifier_str.trim(), line_num)?;
            let key = key_str.trim();

            let mut chars = key.chars();
            let (Some(character), None) = (chars.next(), chars.next()) else {
                return Err(ParseError::InvalidKeyEquivalent {
                    token: key.to_string(),
                    line: line_num,
                });
            };

            Ok(MenuItem::with_equivalent(
                title.trim(),
                character.to_ascii_lowercase(),
                flags,
            ))
        }
        Err(e) => Err(ParseError::InvalidSyntax {
            line: line_num,
            message: format!("{:?}", e),
        }),
    }
}

/// Parse the three comma-separated fields of an item line
fn parse_item_fields(input: &str) -> IResult<&str, (&str, &str, &str)> {
    let (input, _) = (tag("item"), space0, char('='), space0).parse(input)?;
    let (input, modifier_str) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, key_str) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, title) = rest(input)?;

    Ok((input, (modifier_str, key_str, title)))
}

/// Parse modifier tokens into canonical flags
///
/// Tokens may be separated by spaces, commas, or `+`. `NONE` (or an empty
/// field) yields the empty mask. Returns the offending token on failure.
///
/// Handles formats:
/// - "CMD" → command
/// - "CMD SHIFT" / "CMD+SHIFT" / "cmd,shift" → command + shift
pub fn parse_modifier_tokens(input: &str) -> Result<ModifierFlags, String> {
    let mut flags = ModifierFlags::NONE;

    for token in input.split(|c: char| c == '+' || c == ',' || c.is_whitespace()) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        flags |= match token.to_uppercase().as_str() {
            "CMD" | "COMMAND" => ModifierFlags::COMMAND,
            "CTRL" | "CONTROL" => ModifierFlags::CONTROL,
            "OPT" | "OPTION" | "ALT" => ModifierFlags::OPTION,
            "SHIFT" => ModifierFlags::SHIFT,
            "NONE" => ModifierFlags::NONE,
            _ => return Err(token.to_string()),
        };
    }

    Ok(flags)
}

fn parse_modifier_flags(input: &str, line_num: usize) -> Result<ModifierFlags, ParseError> {
    parse_modifier_tokens(input).map_err(|token| ParseError::UnknownModifier {
        token,
        line: line_num,
    })
}
