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

//! Key and modifier taxonomy
//!
//! Static tables of recognised keys, display symbols and labels, plus the
//! normalisation that maps raw event key names onto canonical spellings.
//! Nothing here holds state.

use crate::core::platform::Platform;
use crate::core::types::Modifier;

pub const LETTER_KEYS: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M",
    "N", "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
];

pub const NUMBER_KEYS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

pub const FUNCTION_KEYS: &[&str] = &[
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

pub const NAVIGATION_KEYS: &[&str] = &[
    "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "Home", "End", "PageUp", "PageDown",
];

pub const EDITING_KEYS: &[&str] = &[
    "Enter", "Escape", "Space", "Tab", "Backspace", "Delete", "Insert",
];

/// Fixed modifier display order
pub const MODIFIER_ORDER: &[Modifier] = &[
    Modifier::Control,
    Modifier::Alt,
    Modifier::Shift,
    Modifier::Meta,
];

/// macOS modifier glyphs
pub const MAC_MODIFIER_SYMBOLS: &[(Modifier, &str)] = &[
    (Modifier::Control, "\u{2303}"),
    (Modifier::Alt, "\u{2325}"),
    (Modifier::Shift, "\u{21e7}"),
    (Modifier::Meta, "\u{2318}"),
];

/// Text labels used on Windows and Linux
pub const STANDARD_MODIFIER_LABELS: &[(Modifier, &str)] = &[
    (Modifier::Control, "Ctrl"),
    (Modifier::Alt, "Alt"),
    (Modifier::Shift, "Shift"),
    (Modifier::Meta, "Win"),
];

/// Display glyphs for named keys; keys not listed display as themselves
pub const KEY_DISPLAY_SYMBOLS: &[(&str, &str)] = &[
    ("ArrowUp", "\u{2191}"),
    ("ArrowDown", "\u{2193}"),
    ("ArrowLeft", "\u{2190}"),
    ("ArrowRight", "\u{2192}"),
    ("Enter", "\u{21b5}"),
    ("Escape", "Esc"),
    ("Backspace", "\u{232b}"),
    ("Delete", "\u{2326}"),
    ("Tab", "\u{21e5}"),
    ("Space", "Space"),
];

/// Raw spellings that differ from the canonical name (lowercase → canonical)
const KEY_ALIASES: &[(&str, &str)] = &[
    ("spacebar", "Space"),
    ("esc", "Escape"),
    ("return", "Enter"),
    ("up", "ArrowUp"),
    ("down", "ArrowDown"),
    ("left", "ArrowLeft"),
    ("right", "ArrowRight"),
    ("del", "Delete"),
    ("ins", "Insert"),
    ("pgup", "PageUp"),
    ("pgdn", "PageDown"),
    ("ctrl", "Control"),
    ("control", "Control"),
    ("shift", "Shift"),
    ("alt", "Alt"),
    ("option", "Alt"),
    ("meta", "Meta"),
    ("cmd", "Meta"),
    ("command", "Meta"),
    ("os", "Meta"),
    ("win", "Meta"),
    ("super", "Meta"),
];

/// Every key in the static taxonomy
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    LETTER_KEYS
        .iter()
        .chain(NUMBER_KEYS)
        .chain(FUNCTION_KEYS)
        .chain(NAVIGATION_KEYS)
        .chain(EDITING_KEYS)
        .copied()
}

/// Returns true if the normalised key is part of the static taxonomy
pub fn is_known_key(key: &str) -> bool {
    all_keys().any(|known| known == key)
}

/// Maps a raw key name onto its canonical spelling
///
/// - `" "` and `"Spacebar"` become `"Space"`
/// - aliases such as `"Esc"`, `"Up"`, `"Cmd"` collapse to their canonical name
/// - taxonomy keys are matched case-insensitively (`"f5"` → `"F5"`)
/// - any other single character is uppercased
/// - everything else is kept verbatim
pub fn normalize_key_name(raw: &str) -> String {
    if raw == " " {
        return "Space".to_string();
    }

    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();

    if let Some((_, canonical)) = KEY_ALIASES.iter().find(|(alias, _)| *alias == lower) {
        return canonical.to_string();
    }

    if let Some(known) = all_keys().find(|known| known.eq_ignore_ascii_case(trimmed)) {
        return known.to_string();
    }

    if trimmed.chars().count() == 1 {
        return trimmed.to_uppercase();
    }

    trimmed.to_string()
}

/// Returns the modifier a normalised key identifier names, if any
pub fn modifier_for_key(key: &str) -> Option<Modifier> {
    MODIFIER_ORDER.iter().copied().find(|m| m.as_str() == key)
}

/// Returns true if the raw key name is a modifier key
pub fn is_modifier_key(key: &str) -> bool {
    modifier_for_key(&normalize_key_name(key)).is_some()
}

/// Display glyph for a named key, if one is registered
pub fn key_display_symbol(key: &str) -> Option<&'static str> {
    KEY_DISPLAY_SYMBOLS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, symbol)| *symbol)
}

/// macOS glyph for a modifier
pub fn mac_modifier_symbol(modifier: Modifier) -> &'static str {
    MAC_MODIFIER_SYMBOLS
        .iter()
        .find(|(m, _)| *m == modifier)
        .map(|(_, symbol)| *symbol)
        .unwrap_or_else(|| modifier.as_str())
}

/// Text label for a modifier on the given platform
///
/// Meta is `Cmd` on mac, `Win` on Windows and `Super` on Linux; Alt is
/// `Option` on mac.
pub fn modifier_label(modifier: Modifier, platform: Platform) -> &'static str {
    match (platform, modifier) {
        (Platform::Mac, Modifier::Meta) => "Cmd",
        (Platform::Mac, Modifier::Alt) => "Option",
        (Platform::Linux, Modifier::Meta) => "Super",
        _ => STANDARD_MODIFIER_LABELS
            .iter()
            .find(|(m, _)| *m == modifier)
            .map(|(_, label)| *label)
            .unwrap_or_else(|| modifier.as_str()),
    }
}
