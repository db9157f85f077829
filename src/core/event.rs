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

//! src/core/event.rs
//!
//! Abstract keyboard event boundary
//!
//! The crate never subscribes to a real input source. Whatever delivers
//! keyboard input (a GUI toolkit, a terminal backend, a test) adapts it into
//! a [`KeyEventView`] and routes it into the matcher or the manager.

use serde::{Deserialize, Serialize};

use crate::core::types::{KeyPhase, ModifierState};

/// Read access to one physical key event plus its two side effects
pub trait KeyEventView {
    /// Raw key name as reported by the source (e.g. `"a"`, `"Escape"`, `" "`)
    fn key(&self) -> &str;

    /// Modifier flags held when the event was produced
    fn modifiers(&self) -> ModifierState;

    /// Whether this is a key press or a key release
    fn phase(&self) -> KeyPhase;

    /// True for OS auto-repeat presses
    fn is_repeat(&self) -> bool {
        false
    }

    /// Suppress the host's default action for this event
    fn prevent_default(&mut self);

    /// Stop the event from reaching ancestor handlers
    fn stop_propagation(&mut self);
}

/// Plain owned key event
///
/// Records whether `prevent_default` / `stop_propagation` were requested so
/// callers (and tests) can forward the decision to the real event source.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub modifiers: ModifierState,
    pub phase: KeyPhase,
    #[serde(default)]
    pub repeat: bool,
    #[serde(skip)]
    pub default_prevented: bool,
    #[serde(skip)]
    pub propagation_stopped: bool,
}

impl KeyEvent {
    /// Create a key event with no modifiers held
    pub fn new(key: &str, phase: KeyPhase) -> Self {
        Self {
            key: key.to_string(),
            modifiers: ModifierState::default(),
            phase,
            repeat: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Key press
    pub fn down(key: &str) -> Self {
        Self::new(key, KeyPhase::Down)
    }

    /// Key release
    pub fn up(key: &str) -> Self {
        Self::new(key, KeyPhase::Up)
    }

    pub fn with_modifiers(mut self, modifiers: ModifierState) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// Mark as an OS auto-repeat press
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

impl KeyEventView for KeyEvent {
    fn key(&self) -> &str {
        &self.key
    }

    fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    fn phase(&self) -> KeyPhase {
        self.phase
    }

    fn is_repeat(&self) -> bool {
        self.repeat
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_flags() {
        let event = KeyEvent::down("s").meta().shift();
        assert!(event.modifiers.meta);
        assert!(event.modifiers.shift);
        assert!(!event.modifiers.ctrl);
        assert_eq!(event.phase, KeyPhase::Down);
    }

    #[test]
    fn test_side_effects_recorded() {
        let mut event = KeyEvent::up("Escape");
        event.prevent_default();
        assert!(event.default_prevented);
        assert!(!event.propagation_stopped);
    }
}
