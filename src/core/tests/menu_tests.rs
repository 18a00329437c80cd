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

use crate::core::menu::{MenuItem, MenuSnapshot};
use crate::core::types::ModifierFlags;

fn nested_menu() -> MenuSnapshot {
    MenuSnapshot::new(vec![
        MenuItem::submenu(
            "File",
            vec![
                MenuItem::with_equivalent("New", 'n', ModifierFlags::COMMAND),
                MenuItem::submenu(
                    "Export",
                    vec![MenuItem::with_equivalent(
                        "Export as PNG",
                        'e',
                        ModifierFlags::COMMAND | ModifierFlags::SHIFT,
                    )],
                ),
            ],
        ),
        MenuItem::submenu(
            "Edit",
            vec![MenuItem::with_equivalent("Undo", 'z', ModifierFlags::COMMAND)],
        ),
    ])
}

#[test]
fn test_flatten_walks_submenus_in_order() {
    let equivalents = nested_menu().key_equivalents();
    let titles: Vec<&str> = equivalents.iter().map(|e| e.title.as_str()).collect();

    assert_eq!(titles, vec!["New", "Export as PNG", "Undo"]);
}

#[test]
fn test_items_without_equivalents_are_skipped() {
    let snapshot = MenuSnapshot::new(vec![MenuItem::submenu(
        "View",
        vec![MenuItem {
            title: "Enter Full Screen".to_string(),
            key_equivalent: None,
            flags: ModifierFlags::NONE,
            children: Vec::new(),
        }],
    )]);

    assert!(snapshot.key_equivalents().is_empty());
}

#[test]
fn test_find_equivalent_is_case_insensitive() {
    let menu = nested_menu();
    let hit = menu.find_equivalent('N', ModifierFlags::COMMAND, &[]);

    assert_eq!(hit.map(|e| e.title), Some("New".to_string()));
}

#[test]
fn test_find_equivalent_exact_flags_only() {
    let menu = nested_menu();
    assert!(menu
        .find_equivalent('n', ModifierFlags::COMMAND | ModifierFlags::OPTION, &[])
        .is_none());
}

#[test]
fn test_excluded_titles_are_invisible() {
    let menu = nested_menu();
    let excluded = vec!["Undo".to_string()];

    assert!(menu
        .find_equivalent('z', ModifierFlags::COMMAND, &excluded)
        .is_none());

    // Exclusion is per-title, not global
    assert!(menu
        .find_equivalent('n', ModifierFlags::COMMAND, &excluded)
        .is_some());
}

#[test]
fn test_empty_snapshot_never_matches() {
    let menu = MenuSnapshot::default();
    assert!(menu.find_equivalent('n', ModifierFlags::COMMAND, &[]).is_none());
}
