//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Conflict detection tests
//! - Descriptor parsing tests
//! - Display formatting tests
//! - Event matching and handler tests
//! - Validation tests
//! - Type tests (ParsedHotkey, Hotkey, ModifierState)

#[cfg(test)]
mod conflict_tests;
#[cfg(test)]
mod format_tests;
#[cfg(test)]
mod validator_tests;
