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

//! Single-hotkey registrations
//!
//! A registration stores the canonical parsed hotkey (parsed once, never per
//! event), the caller's callback, its options and the `require_reset` latch.

use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use thiserror::Error;

use crate::core::event::KeyEventView;
use crate::core::matcher::matches_keyboard_event;
use crate::core::parser::ParseError;
use crate::core::platform::Platform;
use crate::core::types::{EventType, Hotkey, HotkeyContext, ParsedHotkey};

/// Callback invoked when a registered hotkey matches
///
/// Errors are contained by the manager and never stop other registrations
/// from being evaluated.
pub type HotkeyCallback =
    Arc<dyn Fn(&dyn KeyEventView, &HotkeyContext) -> anyhow::Result<()> + Send + Sync>;

/// Errors raised while registering with the manager
#[derive(Debug, Error, PartialEq)]
pub enum RegistrationError {
    #[error("A key sequence needs at least one step")]
    EmptySequence,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Identifier handed out for every registration
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RegistrationId(pub(crate) u64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Options for [`HotkeyManager::register`](crate::manager::HotkeyManager::register)
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct HotkeyOptions {
    /// Disabled registrations stay registered but never fire
    pub enabled: bool,
    pub prevent_default: bool,
    pub stop_propagation: bool,
    /// Phase to listen to (keydown by default)
    pub event_type: EventType,
    /// Fire once, then stay silent until every key has been released
    pub require_reset: bool,
    /// Overrides the manager's platform when resolving `Mod`
    pub platform: Option<Platform>,
}

impl Default for HotkeyOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            prevent_default: false,
            stop_propagation: false,
            event_type: EventType::Keydown,
            require_reset: false,
            platform: None,
        }
    }
}

pub(crate) struct Registration {
    pub id: RegistrationId,
    pub context: HotkeyContext,
    pub callback: HotkeyCallback,
    pub options: HotkeyOptions,
    /// Set when a `require_reset` registration fires; cleared when no key is held
    pub has_fired: bool,
}

impl Registration {
    pub fn new(
        id: RegistrationId,
        hotkey: Hotkey,
        parsed_hotkey: ParsedHotkey,
        callback: HotkeyCallback,
        options: HotkeyOptions,
    ) -> Self {
        Self {
            id,
            context: HotkeyContext {
                hotkey,
                parsed_hotkey,
            },
            callback,
            options,
            has_fired: false,
        }
    }

    /// Decide whether this registration fires for the event
    ///
    /// Latches `has_fired` for `require_reset` registrations.
    pub fn should_fire(&mut self, event: &dyn KeyEventView, event_type: EventType) -> bool {
        if !self.options.enabled || self.options.event_type != event_type {
            return false;
        }

        if !matches_keyboard_event(event, &self.context.parsed_hotkey) {
            return false;
        }

        if self.options.require_reset {
            if self.has_fired {
                return false;
            }
            self.has_fired = true;
        }

        true
    }
}
