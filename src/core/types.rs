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

//! src/core/types.rs
//!
//! Core type definitions for hotkey handling
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Modifier`: Canonical modifier keys (Control, Alt, Shift, Meta)
//! - `ModifierState`: The four modifier flags of a hotkey or an event
//! - `ParsedHotkey`: A platform-resolved, order-independent hotkey
//! - `Hotkey`: Either a descriptor string or an already parsed hotkey
//! - `EventType` / `KeyPhase`: Which keyboard phase a registration listens to
//!
//! Parsed hotkeys are normalised on construction, so two descriptors that only
//! differ in modifier order compare (and hash) equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical modifier keys
///
/// Declaration order is the fixed display order: Control, Alt, Shift, Meta.
/// The virtual `Mod` modifier never appears here; it is resolved to
/// `Control` or `Meta` at parse time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Modifier {
    /// Control key
    Control,
    /// Alt / Option key
    Alt,
    /// Shift key
    Shift,
    /// Meta / Command / Windows key
    Meta,
}

impl Modifier {
    /// Canonical spelling, also used as the key identifier of the modifier key itself
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Control => "Control",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::Meta => "Meta",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Boolean modifier flags
///
/// Used both for the modifiers a hotkey requires and for the modifiers
/// held while a keyboard event was produced.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct ModifierState {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierState {
    /// Returns true when the given modifier flag is set
    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Control => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Shift => self.shift,
            Modifier::Meta => self.meta,
        }
    }

    /// Sets the given modifier flag
    pub fn insert(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Control => self.ctrl = true,
            Modifier::Alt => self.alt = true,
            Modifier::Shift => self.shift = true,
            Modifier::Meta => self.meta = true,
        }
    }

    /// Active modifiers in display order (Control, Alt, Shift, Meta)
    pub fn active(&self) -> Vec<Modifier> {
        crate::core::keys::MODIFIER_ORDER
            .iter()
            .copied()
            .filter(|m| self.contains(*m))
            .collect()
    }
}

/// A parsed, platform-resolved hotkey
///
/// The `modifiers` list is always derived from the four flags, so it cannot
/// drift out of sync with them. Construct through [`ParsedHotkey::new`] or the
/// parser.
///
/// # Example
/// ```
/// use hotkey_manager::core::{Modifier, ModifierState, ParsedHotkey};
///
/// let parsed = ParsedHotkey::new("k", ModifierState { shift: true, ctrl: true, ..Default::default() });
/// assert_eq!(parsed.key(), "K");
/// assert_eq!(parsed.modifiers(), &[Modifier::Control, Modifier::Shift]);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ParsedHotkey {
    key: String,
    ctrl: bool,
    shift: bool,
    alt: bool,
    meta: bool,
    modifiers: Vec<Modifier>,
}

impl ParsedHotkey {
    /// Create a parsed hotkey from a key token and modifier flags
    ///
    /// The key goes through [`normalize_key_name`](crate::core::keys::normalize_key_name),
    /// so `"k"` becomes `"K"` and `"esc"` becomes `"Escape"`.
    pub fn new(key: &str, modifiers: ModifierState) -> Self {
        Self {
            key: crate::core::keys::normalize_key_name(key),
            ctrl: modifiers.ctrl,
            shift: modifiers.shift,
            alt: modifiers.alt,
            meta: modifiers.meta,
            modifiers: modifiers.active(),
        }
    }

    /// Normalised key identifier
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ctrl(&self) -> bool {
        self.ctrl
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn alt(&self) -> bool {
        self.alt
    }

    pub fn meta(&self) -> bool {
        self.meta
    }

    /// Active modifiers in display order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// The four flags as a [`ModifierState`]
    pub fn modifier_state(&self) -> ModifierState {
        ModifierState {
            ctrl: self.ctrl,
            shift: self.shift,
            alt: self.alt,
            meta: self.meta,
        }
    }
}

impl fmt::Display for ParsedHotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

/// A hotkey as supplied by a caller
///
/// Descriptor strings are parsed once at registration; pre-parsed hotkeys are
/// used as they are. Whatever the caller supplied is handed back to callbacks
/// through [`HotkeyContext`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Hotkey {
    /// Textual descriptor such as `"Mod+Shift+K"`
    Descriptor(String),
    /// Already parsed hotkey
    Parsed(ParsedHotkey),
}

impl Hotkey {
    /// Canonical form of this hotkey
    ///
    /// Descriptors are parsed with the given platform (auto-detected when
    /// `None`); parsed hotkeys are returned as-is.
    pub fn resolve(
        &self,
        platform: Option<crate::core::Platform>,
    ) -> Result<ParsedHotkey, crate::core::parser::ParseError> {
        match self {
            Hotkey::Descriptor(descriptor) => crate::core::parser::parse_hotkey(descriptor, platform),
            Hotkey::Parsed(parsed) => Ok(parsed.clone()),
        }
    }
}

impl From<&str> for Hotkey {
    fn from(value: &str) -> Self {
        Hotkey::Descriptor(value.to_string())
    }
}

impl From<String> for Hotkey {
    fn from(value: String) -> Self {
        Hotkey::Descriptor(value)
    }
}

impl From<ParsedHotkey> for Hotkey {
    fn from(value: ParsedHotkey) -> Self {
        Hotkey::Parsed(value)
    }
}

impl From<&ParsedHotkey> for Hotkey {
    fn from(value: &ParsedHotkey) -> Self {
        Hotkey::Parsed(value.clone())
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hotkey::Descriptor(descriptor) => write!(f, "{}", descriptor),
            Hotkey::Parsed(parsed) => write!(f, "{}", parsed),
        }
    }
}

/// Information passed to a hotkey callback alongside the event
#[derive(Clone, Debug, PartialEq)]
pub struct HotkeyContext {
    /// The hotkey exactly as it was registered
    pub hotkey: Hotkey,
    /// Its canonical parsed form
    pub parsed_hotkey: ParsedHotkey,
}

/// Keyboard phase a registration listens to
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Keydown,
    Keyup,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Keydown => write!(f, "keydown"),
            EventType::Keyup => write!(f, "keyup"),
        }
    }
}

/// Phase of an observed key event
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPhase {
    Down,
    Up,
}

impl KeyPhase {
    /// Registration event type served by this phase
    pub fn event_type(&self) -> EventType {
        match self {
            KeyPhase::Down => EventType::Keydown,
            KeyPhase::Up => EventType::Keyup,
        }
    }
}
