//! Hotkey lifecycle tests
//!
//! Balance of suspend/resume across guards, disabled-capture no-ops,
//! and misuse handling.
