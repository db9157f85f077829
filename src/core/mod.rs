// Copyright 2025 bakri (tidynest@proton.me)
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

//! src/core/mod.rs
//!
//! Core hotkey logic
//!
//! This module contains the stateless building blocks:
//! - Type definitions for modifiers, parsed hotkeys and events
//! - The key taxonomy and platform detection
//! - Descriptor parsing and formatting
//! - Event matching and handler construction
//! - Validation and conflict detection
//!
//! Everything here is free of I/O and global state, so it can be tested
//! without a real keyboard or window system.

pub mod conflict;
pub mod event;
pub mod format;
pub mod keys;
pub mod matcher;
pub mod parser;
pub mod platform;
pub mod types;
pub mod validator;

pub use conflict::{Conflict, ConflictDetector, HotkeyEntry};
pub use event::{KeyEvent, KeyEventView};
pub use format::{format_for_display, format_hotkey, format_with_labels, FormatDisplayOptions};
pub use matcher::{
    create_hotkey_handler, create_multi_hotkey_handler, matches_descriptor, matches_keyboard_event,
    HandlerOptions,
};
pub use parser::{is_modifier, normalize_hotkey, parse_hotkey, ParseError};
pub use platform::{detect_platform, Platform};
pub use types::*;
pub use validator::{assert_valid_hotkey, check_hotkey, validate_hotkey, ValidationError, ValidationResult};

#[cfg(test)]
mod tests;
