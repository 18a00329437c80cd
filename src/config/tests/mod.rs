//! Config module tests
//!
//! Autosave store round-trips on temporary files.
