//! Duplicate key-equivalent detection across a menu snapshot
//!
//! This module implements O(1) duplicate detection using HashMap-based
//! indexing. When multiple menu items claim the same key equivalent, they
//! are flagged as conflicts so the host can fix its menus (and so the CLI
//! can report them).
//!
//! # Performance
//! - Add equivalent: O(1) average case
//! - Check conflict: O(1) average case
//! - List all conflicts: O(n) where n = number of unique equivalents

use std::collections::HashMap;

use crate::core::menu::{KeyEquivalent, MenuSnapshot};
use crate::core::types::ModifierFlags;

/// Detects duplicate key equivalents using HashMap-based indexing.
///
/// Keys are `(lowercase character, flags)` pairs and values are every item
/// claiming that pair. A conflict exists when any vector has length > 1.
pub struct ConflictDetector {
    /// Maps an equivalent pair to all items using it.
    equivalents: HashMap<(char, ModifierFlags), Vec<KeyEquivalent>>,
}

/// A detected duplicate between menu items.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// The duplicated (character, flags) pair
    pub character: char,
    /// Modifier flags of the duplicated equivalent
    pub flags: ModifierFlags,
    /// All items claiming the pair (always 2 or more)
    pub claimants: Vec<KeyEquivalent>,
}

impl ConflictDetector {
    /// Creates an empty detector.
    pub fn new() -> Self {
        Self {
            equivalents: HashMap::new(),
        }
    }

    /// Builds a detector from every equivalent in a snapshot.
    pub fn from_snapshot(snapshot: &MenuSnapshot) -> Self {
        let mut detector = Self::new();
        for equivalent in snapshot.key_equivalents() {
            detector.add_equivalent(equivalent);
        }
        detector
    }

    /// Adds one key equivalent to the index.
    pub fn add_equivalent(&mut self, equivalent: KeyEquivalent) {
        self.equivalents
            .entry((
                equivalent.character.to_ascii_lowercase(),
                equivalent.flags,
            ))
            .or_default()
            .push(equivalent);
    }

    /// Finds all pairs claimed by 2 or more items.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts: Vec<Conflict> = self
            .equivalents
            .iter()
            .filter(|(_, claimants)| claimants.len() > 1)
            .map(|((character, flags), claimants)| Conflict {
                character: *character,
                flags: *flags,
                claimants: claimants.clone(),
            })
            .collect();

        // HashMap iteration order is unstable; report deterministically
        conflicts.sort_by(|a, b| (a.character, a.flags).cmp(&(b.character, b.flags)));
        conflicts
    }

    /// Checks if a specific pair is claimed more than once.
    pub fn has_conflict(&self, character: char, flags: ModifierFlags) -> bool {
        self.equivalents
            .get(&(character.to_ascii_lowercase(), flags))
            .map(|claimants| claimants.len() > 1)
            .unwrap_or(false)
    }

    /// Total number of equivalents tracked.
    pub fn total_equivalents(&self) -> usize {
        self.equivalents.values().map(|v| v.len()).sum()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
