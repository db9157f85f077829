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

//! Hotkey Manager
//!
//! Parses textual hotkey descriptors such as `"Mod+Shift+K"`, matches them
//! against keyboard events, and tracks a keyboard session so that hotkeys
//! and multi-key sequences (`G` then `G`) fire exactly when they should.
//!
//! # Features
//!
//! - **Descriptor Parsing:** Case-insensitive, order-independent, with a
//!   platform-dependent `Mod` (Meta on macOS, Control elsewhere)
//! - **Exact Matching:** An extra held modifier never matches
//! - **Session Tracking:** Held keys, fire-once-per-press latches, keyup hotkeys
//! - **Key Sequences:** Ordered steps with a per-step timeout
//! - **Display Formatting:** `⌘⇧K` on macOS, `Ctrl+Shift+K` elsewhere
//! - **Validation:** Errors and warnings without registering anything
//! - **Conflict Detection:** Duplicate hotkeys across spellings
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (types, taxonomy, parser, formatter, matcher,
//!   validator, conflict detection)
//! - **`manager`:** The session tracker and owned bindings
//! - **`config`:** Manager settings, loadable from JSON
//!
//! # Examples
//!
//! ## Parsing and formatting
//!
//! ```
//! use hotkey_manager::core::{format_for_display, parse_hotkey, FormatDisplayOptions, Platform};
//!
//! let parsed = parse_hotkey("shift+mod+k", Some(Platform::Mac))?;
//! assert_eq!(parsed.to_string(), "Shift+Meta+K");
//!
//! let label = format_for_display(&parsed, &FormatDisplayOptions::for_platform(Platform::Mac))?;
//! assert_eq!(label, "⇧⌘K");
//! # Ok::<(), hotkey_manager::core::ParseError>(())
//! ```
//!
//! ## Tracking a session
//!
//! ```
//! use hotkey_manager::{HotkeyManager, HotkeyOptions, KeyEvent, ManagerConfig, Platform};
//!
//! let manager = HotkeyManager::new(ManagerConfig::for_platform(Platform::Linux));
//! manager.register("Mod+S", |_, _| Ok(()), HotkeyOptions { require_reset: true, ..Default::default() })?;
//! manager.register_sequence(["G", "G"], |_, _| Ok(()), Default::default())?;
//!
//! manager.handle_event(&mut KeyEvent::down("Control").ctrl());
//! manager.handle_event(&mut KeyEvent::down("s").ctrl());
//! assert_eq!(manager.held_keys(), vec!["Control", "S"]);
//! # Ok::<(), hotkey_manager::manager::RegistrationError>(())
//! ```

pub mod config;
pub mod core;
pub mod manager;

// Re-export commonly used types for convenience
pub use config::ManagerConfig;
pub use core::{KeyEvent, KeyEventView, ParsedHotkey, Platform};
pub use manager::{HotkeyManager, HotkeyOptions, RegistrationHandle, SequenceOptions};
