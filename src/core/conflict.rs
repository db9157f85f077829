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

//! Hotkey conflict detection
//!
//! Two registrations conflict when they resolve to the same canonical hotkey
//! and listen to the same event type. `"Mod+S"` and `"Meta+S"` therefore
//! conflict on mac but not on Windows.
//!
//! # Performance
//! - Add entry: O(1) average case
//! - Check conflict: O(1) average case
//! - List all conflicts: O(n log n) where n = number of unique hotkeys (sorted output)

use std::collections::HashMap;

use crate::core::parser::{parse_hotkey, ParseError};
use crate::core::platform::Platform;
use crate::core::types::{EventType, ParsedHotkey};

/// One hotkey as seen by the detector
#[derive(Clone, Debug, PartialEq)]
pub struct HotkeyEntry {
    /// The descriptor as the caller wrote it
    pub descriptor: String,
    pub parsed: ParsedHotkey,
    pub event_type: EventType,
}

/// Detects hotkey conflicts using HashMap-based indexing.
///
/// Keys are the canonical hotkey plus event type; values are every entry
/// resolving to it. A conflict exists when any vector has length > 1.
pub struct ConflictDetector {
    platform: Platform,
    entries: HashMap<(ParsedHotkey, EventType), Vec<HotkeyEntry>>,
}

/// Represents a detected conflict between hotkeys.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// The canonical hotkey that has conflicts
    pub hotkey: ParsedHotkey,
    pub event_type: EventType,

    /// All entries resolving to this hotkey (always 2 or more)
    pub conflicting_entries: Vec<HotkeyEntry>,
}

impl ConflictDetector {
    /// Creates an empty detector resolving `Mod` for `platform`.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            entries: HashMap::new(),
        }
    }

    /// Parses and adds a descriptor.
    pub fn add_descriptor(&mut self, descriptor: &str, event_type: EventType) -> Result<(), ParseError> {
        let parsed = parse_hotkey(descriptor, Some(self.platform))?;
        self.add_entry(HotkeyEntry {
            descriptor: descriptor.to_string(),
            parsed,
            event_type,
        });
        Ok(())
    }

    /// Adds an already parsed entry.
    pub fn add_entry(&mut self, entry: HotkeyEntry) {
        self.entries
            .entry((entry.parsed.clone(), entry.event_type))
            .or_default()
            .push(entry);
    }

    /// Finds all conflicts, ordered by canonical hotkey.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts: Vec<Conflict> = self
            .entries
            .iter()
            .filter(|(_, entries)| entries.len() > 1)
            .map(|((hotkey, event_type), entries)| Conflict {
                hotkey: hotkey.clone(),
                event_type: *event_type,
                conflicting_entries: entries.clone(),
            })
            .collect();

        conflicts.sort_by_key(|c| (c.hotkey.to_string(), c.event_type == EventType::Keyup));
        conflicts
    }

    /// Returns true if this hotkey has 2 or more entries for the event type.
    pub fn has_conflict(&self, hotkey: &ParsedHotkey, event_type: EventType) -> bool {
        self.entries
            .get(&(hotkey.clone(), event_type))
            .map(|entries| entries.len() > 1)
            .unwrap_or(false)
    }

    /// Returns the total number of entries tracked.
    pub fn total_entries(&self) -> usize {
        self.entries.values().map(|v| v.len()).sum()
    }
}
