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

use crate::core::conflict::ConflictDetector;
use crate::core::menu::{KeyEquivalent, MenuItem, MenuSnapshot};
use crate::core::types::ModifierFlags;

fn equivalent(character: char, flags: ModifierFlags, title: &str) -> KeyEquivalent {
    KeyEquivalent {
        character,
        flags,
        title: title.to_string(),
    }
}

#[test]
fn test_no_conflicts_when_empty() {
    let detector = ConflictDetector::new();
    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_equivalents(), 0);
}

#[test]
fn test_no_conflicts_with_unique_equivalents() {
    let mut detector = ConflictDetector::new();

    detector.add_equivalent(equivalent('n', ModifierFlags::COMMAND, "New"));
    detector.add_equivalent(equivalent('o', ModifierFlags::COMMAND, "Open"));
    detector.add_equivalent(equivalent(
        'n',
        ModifierFlags::COMMAND | ModifierFlags::SHIFT,
        "New Folder",
    ));

    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_equivalents(), 3);
}

#[test]
fn test_detects_simple_conflict() {
    let mut detector = ConflictDetector::new();

    detector.add_equivalent(equivalent('n', ModifierFlags::COMMAND, "New"));
    detector.add_equivalent(equivalent('n', ModifierFlags::COMMAND, "New Window"));

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].character, 'n');
    assert_eq!(conflicts[0].flags, ModifierFlags::COMMAND);
    assert_eq!(conflicts[0].claimants.len(), 2);
}

#[test]
fn test_case_insensitive_claims_collide() {
    let mut detector = ConflictDetector::new();

    detector.add_equivalent(equivalent('n', ModifierFlags::COMMAND, "New"));
    detector.add_equivalent(equivalent('N', ModifierFlags::COMMAND, "New Window"));

    assert_eq!(detector.find_conflicts().len(), 1);
    assert!(detector.has_conflict('N', ModifierFlags::COMMAND));
}

#[test]
fn test_has_conflict_method() {
    let mut detector = ConflictDetector::new();

    detector.add_equivalent(equivalent('n', ModifierFlags::COMMAND, "New"));
    assert!(!detector.has_conflict('n', ModifierFlags::COMMAND));

    detector.add_equivalent(equivalent('n', ModifierFlags::COMMAND, "New Window"));
    assert!(detector.has_conflict('n', ModifierFlags::COMMAND));
}

#[test]
fn test_multiple_independent_conflicts_sorted() {
    let mut detector = ConflictDetector::new();

    detector.add_equivalent(equivalent('z', ModifierFlags::COMMAND, "Undo"));
    detector.add_equivalent(equivalent('z', ModifierFlags::COMMAND, "Zoom"));
    detector.add_equivalent(equivalent('a', ModifierFlags::COMMAND, "Select All"));
    detector.add_equivalent(equivalent('a', ModifierFlags::COMMAND, "Archive"));
    detector.add_equivalent(equivalent('c', ModifierFlags::COMMAND, "Copy"));

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].character, 'a');
    assert_eq!(conflicts[1].character, 'z');
    assert_eq!(detector.total_equivalents(), 5);
}

#[test]
fn test_from_snapshot_includes_submenus() {
    let snapshot = MenuSnapshot::new(vec![
        MenuItem::submenu(
            "File",
            vec![MenuItem::with_equivalent("New", 'n', ModifierFlags::COMMAND)],
        ),
        MenuItem::submenu(
            "Window",
            vec![MenuItem::with_equivalent(
                "New Viewer",
                'n',
                ModifierFlags::COMMAND,
            )],
        ),
    ]);

    let detector = ConflictDetector::from_snapshot(&snapshot);
    assert!(detector.has_conflict('n', ModifierFlags::COMMAND));
}
