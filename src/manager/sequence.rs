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

//! Key sequence state machine
//!
//! A sequence such as `["G", "G"]` is recognised when its steps are pressed
//! in order, each within `timeout` of the previous one.
//!
//! # Transitions (per non-repeat keydown)
//! - progress > 0 and the last step is older than `timeout`: progress resets
//! - key matches the expected step: progress advances; completing the last
//!   step fires and resets
//! - key does not match while progress > 0: progress resets and the same key
//!   is retried as the first step, so the keystroke is not lost

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::event::KeyEventView;
use crate::core::matcher::matches_keyboard_event;
use crate::core::platform::Platform;
use crate::core::types::{Hotkey, ParsedHotkey};
use crate::manager::registration::RegistrationId;

/// Default time allowed between two steps
pub const DEFAULT_SEQUENCE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Callback invoked when a sequence completes
pub type SequenceCallback =
    Arc<dyn Fn(&dyn KeyEventView, &SequenceContext) -> anyhow::Result<()> + Send + Sync>;

/// Information passed to a sequence callback
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceContext {
    /// Steps exactly as registered
    pub steps: Vec<Hotkey>,
    pub parsed_steps: Vec<ParsedHotkey>,
}

/// Options for [`HotkeyManager::register_sequence`](crate::manager::HotkeyManager::register_sequence)
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SequenceOptions {
    pub enabled: bool,
    /// Maximum gap between steps; the manager default when `None`
    pub timeout: Option<Duration>,
    /// Overrides the manager's platform when resolving `Mod`
    pub platform: Option<Platform>,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: None,
            platform: None,
        }
    }
}

pub(crate) struct SequenceRegistration {
    pub id: RegistrationId,
    pub context: SequenceContext,
    pub callback: SequenceCallback,
    pub enabled: bool,
    pub timeout: Duration,
    pub progress: usize,
    pub last_step_at: Option<Instant>,
}

impl SequenceRegistration {
    pub fn new(
        id: RegistrationId,
        context: SequenceContext,
        callback: SequenceCallback,
        enabled: bool,
        timeout: Duration,
    ) -> Self {
        Self {
            id,
            context,
            callback,
            enabled,
            timeout,
            progress: 0,
            last_step_at: None,
        }
    }

    /// Feed one keydown into the state machine
    ///
    /// Returns true when this keystroke completed the sequence.
    pub fn advance(&mut self, event: &dyn KeyEventView, now: Instant) -> bool {
        if self.progress > 0 && self.is_expired(now) {
            debug!(id = %self.id, progress = self.progress, "key sequence timed out");
            self.reset();
        }

        if self.step_matches(event, self.progress) {
            self.progress += 1;
            self.last_step_at = Some(now);
        } else if self.progress > 0 {
            self.reset();
            if !self.step_matches(event, 0) {
                return false;
            }
            self.progress = 1;
            self.last_step_at = Some(now);
        } else {
            return false;
        }

        if self.progress == self.context.parsed_steps.len() {
            self.reset();
            return true;
        }

        false
    }

    pub fn reset(&mut self) {
        self.progress = 0;
        self.last_step_at = None;
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.last_step_at
            .map(|last| now.saturating_duration_since(last) > self.timeout)
            .unwrap_or(false)
    }

    fn step_matches(&self, event: &dyn KeyEventView, index: usize) -> bool {
        self.context
            .parsed_steps
            .get(index)
            .map(|step| matches_keyboard_event(event, step))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::KeyEvent;
    use crate::core::types::ModifierState;

    fn sequence(keys: &[&str], timeout_ms: u64) -> SequenceRegistration {
        let parsed_steps: Vec<ParsedHotkey> = keys
            .iter()
            .map(|k| ParsedHotkey::new(k, ModifierState::default()))
            .collect();
        let context = SequenceContext {
            steps: keys.iter().map(|k| Hotkey::from(*k)).collect(),
            parsed_steps,
        };
        let callback: SequenceCallback =
            Arc::new(|_: &dyn KeyEventView, _: &SequenceContext| Ok(()));
        SequenceRegistration::new(
            RegistrationId(1),
            context,
            callback,
            true,
            Duration::from_millis(timeout_ms),
        )
    }

    #[test]
    fn test_advances_and_completes() {
        let mut seq = sequence(&["G", "G"], 1000);
        let start = Instant::now();

        assert!(!seq.advance(&KeyEvent::down("g"), start));
        assert_eq!(seq.progress, 1);
        assert!(seq.advance(&KeyEvent::down("g"), start + Duration::from_millis(200)));
        assert_eq!(seq.progress, 0);
    }

    #[test]
    fn test_timeout_restarts_from_current_key() {
        let mut seq = sequence(&["G", "G"], 1000);
        let start = Instant::now();

        seq.advance(&KeyEvent::down("g"), start);
        // Too late for step two, but counts as a fresh step one
        assert!(!seq.advance(&KeyEvent::down("g"), start + Duration::from_millis(1500)));
        assert_eq!(seq.progress, 1);
    }

    #[test]
    fn test_gap_equal_to_timeout_is_accepted() {
        let mut seq = sequence(&["D", "W"], 500);
        let start = Instant::now();

        seq.advance(&KeyEvent::down("d"), start);
        assert!(seq.advance(&KeyEvent::down("w"), start + Duration::from_millis(500)));
    }

    #[test]
    fn test_wrong_key_retried_as_first_step() {
        let mut seq = sequence(&["G", "T"], 1000);
        let start = Instant::now();

        seq.advance(&KeyEvent::down("g"), start);
        seq.advance(&KeyEvent::down("g"), start);
        assert_eq!(seq.progress, 1);
        assert!(seq.advance(&KeyEvent::down("t"), start));
    }

    #[test]
    fn test_modifiers_must_match_exactly() {
        let mut seq = sequence(&["G"], 1000);
        assert!(!seq.advance(&KeyEvent::down("G").shift(), Instant::now()));
        assert_eq!(seq.progress, 0);
    }
}
