//! src/core/menu.rs
//!
//! Menu snapshot used for live conflict detection
//!
//! The host application supplies its menu hierarchy as a `MenuSnapshot`.
//! Items may nest arbitrarily; flattening walks every submenu and yields
//! the `(character, flags, title)` key equivalents the validator scans.
//!
//! The host's immutable items (about/quit/preferences and friends) are not
//! special-cased here: callers that want them ignored pass their titles as
//! an exclusion set.

use crate::core::types::ModifierFlags;

/// One menu entry, possibly with a submenu.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuItem {
    /// Item title shown to the user (also used by exclusion sets)
    pub title: String,

    /// Key-equivalent character, if the item has a shortcut
    pub key_equivalent: Option<char>,

    /// Modifier flags of the key equivalent
    pub flags: ModifierFlags,

    /// Submenu items
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Creates a leaf item with a key equivalent.
    pub fn with_equivalent(title: &str, key_equivalent: char, flags: ModifierFlags) -> Self {
        Self {
            title: title.to_string(),
            key_equivalent: Some(key_equivalent),
            flags,
            children: Vec::new(),
        }
    }

    /// Creates a submenu container.
    pub fn submenu(title: &str, children: Vec<MenuItem>) -> Self {
        Self {
            title: title.to_string(),
            key_equivalent: None,
            flags: ModifierFlags::NONE,
            children,
        }
    }
}

/// A flattened key equivalent: what the validator compares against.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEquivalent {
    /// Lowercase key-equivalent character
    pub character: char,

    /// Canonical modifier flags
    pub flags: ModifierFlags,

    /// Title of the owning menu item
    pub title: String,
}

/// The application menu hierarchy at one point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuSnapshot {
    /// Top-level menu items
    pub items: Vec<MenuItem>,
}

impl MenuSnapshot {
    /// Creates a snapshot from top-level items.
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Flattens the hierarchy into every key equivalent it contains,
    /// submenus included, in menu order.
    pub fn key_equivalents(&self) -> Vec<KeyEquivalent> {
        let mut out = Vec::new();
        collect(&self.items, &mut out);
        out
    }

    /// Finds the first item whose key equivalent matches `(character, flags)`.
    ///
    /// Matching is case-insensitive on the character and exact on the
    /// flags. Items whose title appears in `excluded_titles` are skipped;
    /// with an empty exclusion set the scan is exhaustive.
    pub fn find_equivalent(
        &self,
        character: char,
        flags: ModifierFlags,
        excluded_titles: &[String],
    ) -> Option<KeyEquivalent> {
        let wanted = character.to_ascii_lowercase();
        self.key_equivalents().into_iter().find(|eq| {
            eq.character.to_ascii_lowercase() == wanted
                && eq.flags == flags
                && !excluded_titles.iter().any(|t| t == &eq.title)
        })
    }
}

fn collect(items: &[MenuItem], out: &mut Vec<KeyEquivalent>) {
    for item in items {
        if let Some(character) = item.key_equivalent {
            out.push(KeyEquivalent {
                character,
                flags: item.flags,
                title: item.title.clone(),
            });
        }
        collect(&item.children, out);
    }
}
