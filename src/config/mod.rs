//! Persistence for recorded combinations.
//!
//! The widget itself never writes to disk; this module is the seam the
//! host uses to autosave a combination under a caller-supplied name and
//! restore it on launch. Writes are atomic so a crash mid-save cannot
//! corrupt previously stored shortcuts.
//!
//! # Example
//!
//! ```no_run
//! use shortcut_capture::config::ComboStore;
//! use shortcut_capture::core::keys::keycode;
//! use shortcut_capture::core::types::{KeyCombo, ModifierFlags};
//! use std::path::PathBuf;
//!
//! let store = ComboStore::new(PathBuf::from("shortcuts.json"));
//! store.save("toggle-capture", KeyCombo::new(keycode::K, ModifierFlags::COMMAND))?;
//!
//! let restored = store.load("toggle-capture")?;
//! assert!(restored.is_some());
//! # Ok::<(), shortcut_capture::config::StoreError>(())
//! ```

pub mod autosave;
pub mod error;

pub use autosave::ComboStore;
pub use error::StoreError;

#[cfg(test)]
mod tests;
