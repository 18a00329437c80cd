//! Recorder module tests
//!
//! Contains test suites for the recording state machine:
//! - Transition tests (click, key-down, flags-changed, focus loss)
//! - Randomised event sequences checking the suspend/resume balance

#[cfg(test)]
mod recorder_tests;
