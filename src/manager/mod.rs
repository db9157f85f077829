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

//! Session tracker
//!
//! A [`HotkeyManager`] is the single authority for one input session. It
//! knows which keys are currently held, owns every hotkey and key-sequence
//! registration, and decides which callbacks fire for each observed event.
//!
//! # Event processing
//! - **keydown** (first press): the key is marked held, sequences advance,
//!   keydown registrations are evaluated
//! - **keydown** (repeat, key already held): sequences do not advance;
//!   registrations are re-evaluated, but `require_reset` ones that already
//!   fired stay silent
//! - **keyup**: the key is released, keyup registrations are evaluated, and
//!   once no key is held every `require_reset` latch re-arms
//!
//! # Dispatch semantics
//! Matching runs against a snapshot taken under the session lock; callbacks
//! then run with the lock released, so they may register or unregister
//! freely. A registration disposed or disabled by an earlier callback of the
//! same event is skipped. Callback errors and panics are contained and logged.
//!
//! # Threading
//! The manager is a cheap, cloneable handle. Event processing is serialised
//! by a re-entrant gate, so a callback may feed a synthetic event back into
//! the same manager from the dispatching thread.
//!
//! # Example
//! ```
//! use hotkey_manager::config::ManagerConfig;
//! use hotkey_manager::core::{KeyEvent, Platform};
//! use hotkey_manager::manager::{HotkeyManager, HotkeyOptions};
//!
//! let manager = HotkeyManager::new(ManagerConfig::for_platform(Platform::Mac));
//! let handle = manager.register("Mod+S", |_, ctx| {
//!     println!("saving ({})", ctx.hotkey);
//!     Ok(())
//! }, HotkeyOptions::default())?;
//!
//! manager.handle_event(&mut KeyEvent::down("s").meta());
//! handle.unregister();
//! # Ok::<(), hotkey_manager::manager::RegistrationError>(())
//! ```

pub mod binding;
pub mod registration;
pub mod sequence;

pub use binding::{HotkeyBinding, SequenceBinding};
pub use registration::{HotkeyCallback, HotkeyOptions, RegistrationError, RegistrationId};
pub use sequence::{SequenceCallback, SequenceContext, SequenceOptions, DEFAULT_SEQUENCE_TIMEOUT};

use parking_lot::{Mutex, ReentrantMutex};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tracing::{debug, error, trace, warn};

use crate::config::ManagerConfig;
use crate::core::conflict::{Conflict, ConflictDetector, HotkeyEntry};
use crate::core::event::KeyEventView;
use crate::core::keys::{is_modifier_key, normalize_key_name};
use crate::core::parser::parse_hotkey;
use crate::core::platform::{detect_platform, Platform};
use crate::core::types::{EventType, Hotkey, HotkeyContext, KeyPhase};
use registration::Registration;
use sequence::SequenceRegistration;

/// Process-wide input session
#[derive(Clone)]
pub struct HotkeyManager {
    inner: Arc<Inner>,
}

struct Inner {
    platform: Platform,
    sequence_timeout: Duration,
    state: Mutex<SessionState>,
    dispatch: ReentrantMutex<()>,
    callback_failures: AtomicUsize,
}

#[derive(Default)]
struct SessionState {
    next_id: u64,
    registrations: Vec<Registration>,
    sequences: Vec<SequenceRegistration>,
    /// Held keys in press order
    held_keys: Vec<String>,
}

/// A callback selected for invocation while the session lock was held
enum PendingCall {
    Hotkey {
        id: RegistrationId,
        callback: HotkeyCallback,
        context: HotkeyContext,
        prevent_default: bool,
        stop_propagation: bool,
    },
    Sequence {
        id: RegistrationId,
        callback: SequenceCallback,
        context: SequenceContext,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RegistrationKind {
    Hotkey,
    Sequence,
}

impl HotkeyManager {
    /// Creates a session; the platform is detected unless configured.
    pub fn new(config: ManagerConfig) -> Self {
        Self::with_detector(config, detect_platform)
    }

    /// Creates a session using `detector` when the config has no platform.
    pub fn with_detector(config: ManagerConfig, detector: fn() -> Platform) -> Self {
        let platform = config.platform.unwrap_or_else(detector);
        debug!(%platform, timeout_ms = config.sequence_timeout_ms, "hotkey session created");

        Self {
            inner: Arc::new(Inner {
                platform,
                sequence_timeout: config.sequence_timeout(),
                state: Mutex::new(SessionState::default()),
                dispatch: ReentrantMutex::new(()),
                callback_failures: AtomicUsize::new(0),
            }),
        }
    }

    /// Platform used to resolve `Mod`.
    pub fn platform(&self) -> Platform {
        self.inner.platform
    }

    /// Registers a hotkey callback.
    ///
    /// The descriptor is parsed immediately; malformed descriptors fail here
    /// rather than silently never firing. Registering the same hotkey twice
    /// yields two independent registrations that both fire.
    pub fn register<H, F>(
        &self,
        hotkey: H,
        callback: F,
        options: HotkeyOptions,
    ) -> Result<RegistrationHandle, RegistrationError>
    where
        H: Into<Hotkey>,
        F: Fn(&dyn KeyEventView, &HotkeyContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register_shared(hotkey.into(), Arc::new(callback), options)
    }

    pub(crate) fn register_shared(
        &self,
        hotkey: Hotkey,
        callback: HotkeyCallback,
        options: HotkeyOptions,
    ) -> Result<RegistrationHandle, RegistrationError> {
        let platform = options.platform.unwrap_or(self.inner.platform);
        let parsed = hotkey.resolve(Some(platform))?;

        let mut state = self.inner.state.lock();
        let id = state.allocate_id();
        debug!(%id, %hotkey, canonical = %parsed, event_type = %options.event_type, "hotkey registered");
        state
            .registrations
            .push(Registration::new(id, hotkey, parsed, callback, options));

        Ok(self.handle(id, RegistrationKind::Hotkey))
    }

    /// Registers a key sequence such as `["G", "G"]`.
    ///
    /// Every step is a single-key descriptor, modifiers allowed
    /// (`"Shift+G"`). All steps are parsed up front.
    pub fn register_sequence<I, H, F>(
        &self,
        steps: I,
        callback: F,
        options: SequenceOptions,
    ) -> Result<RegistrationHandle, RegistrationError>
    where
        I: IntoIterator<Item = H>,
        H: Into<Hotkey>,
        F: Fn(&dyn KeyEventView, &SequenceContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let steps: Vec<Hotkey> = steps.into_iter().map(Into::into).collect();
        self.register_sequence_shared(steps, Arc::new(callback), options)
    }

    pub(crate) fn register_sequence_shared(
        &self,
        steps: Vec<Hotkey>,
        callback: SequenceCallback,
        options: SequenceOptions,
    ) -> Result<RegistrationHandle, RegistrationError> {
        if steps.is_empty() {
            return Err(RegistrationError::EmptySequence);
        }

        let platform = options.platform.unwrap_or(self.inner.platform);
        let parsed_steps = steps
            .iter()
            .map(|step| step.resolve(Some(platform)))
            .collect::<Result<Vec<_>, _>>()?;

        let timeout = options.timeout.unwrap_or(self.inner.sequence_timeout);
        let context = SequenceContext {
            steps,
            parsed_steps,
        };

        let mut state = self.inner.state.lock();
        let id = state.allocate_id();
        debug!(%id, steps = context.steps.len(), timeout_ms = timeout.as_millis() as u64, "key sequence registered");
        state.sequences.push(SequenceRegistration::new(
            id,
            context,
            callback,
            options.enabled,
            timeout,
        ));

        Ok(self.handle(id, RegistrationKind::Sequence))
    }

    /// Processes one key event at the current time.
    pub fn handle_event(&self, event: &mut dyn KeyEventView) {
        self.handle_event_at(event, Instant::now());
    }

    /// Processes one key event observed at `now`.
    pub fn handle_event_at(&self, event: &mut dyn KeyEventView, now: Instant) {
        let _gate = self.inner.dispatch.lock();

        let key = normalize_key_name(event.key());
        let pending = {
            let mut state = self.inner.state.lock();
            match event.phase() {
                KeyPhase::Down => state.on_keydown(&*event, key, now),
                KeyPhase::Up => state.on_keyup(&*event, &key),
            }
        };

        for call in pending {
            self.dispatch(event, call);
        }
    }

    /// Focus or visibility was lost: forget held keys.
    ///
    /// Re-arms every `require_reset` latch and resets sequence progress,
    /// so keys released while unfocused cannot stay stuck.
    pub fn handle_blur(&self) {
        let _gate = self.inner.dispatch.lock();
        let mut state = self.inner.state.lock();

        debug!(held = state.held_keys.len(), "focus lost, releasing held keys");
        state.held_keys.clear();
        state.rearm_all();
        for sequence in state.sequences.iter_mut() {
            sequence.reset();
        }
    }

    /// Clears every registration, held key and sequence progress at once.
    ///
    /// Handles from before the reset become no-ops.
    pub fn reset(&self) {
        let _gate = self.inner.dispatch.lock();
        let mut state = self.inner.state.lock();

        debug!(
            registrations = state.registrations.len(),
            sequences = state.sequences.len(),
            "hotkey session reset"
        );
        state.registrations.clear();
        state.sequences.clear();
        state.held_keys.clear();
        self.inner.callback_failures.store(0, Ordering::SeqCst);
    }

    /// Currently held keys, in press order.
    pub fn held_keys(&self) -> Vec<String> {
        self.inner.state.lock().held_keys.clone()
    }

    /// Returns true if the key is currently held (any spelling).
    pub fn is_key_held(&self, key: &str) -> bool {
        let key = normalize_key_name(key);
        self.inner.state.lock().held_keys.iter().any(|held| *held == key)
    }

    /// Number of single-hotkey registrations.
    pub fn registration_count(&self) -> usize {
        self.inner.state.lock().registrations.len()
    }

    /// Number of sequence registrations.
    pub fn sequence_count(&self) -> usize {
        self.inner.state.lock().sequences.len()
    }

    /// Returns true if any registration resolves to the same hotkey.
    pub fn is_registered(&self, descriptor: &str) -> bool {
        let Ok(parsed) = parse_hotkey(descriptor, Some(self.inner.platform)) else {
            return false;
        };

        self.inner
            .state
            .lock()
            .registrations
            .iter()
            .any(|r| r.context.parsed_hotkey == parsed)
    }

    /// Conflicting registrations (same hotkey and event type).
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut detector = ConflictDetector::new(self.inner.platform);
        for registration in self.inner.state.lock().registrations.iter() {
            detector.add_entry(HotkeyEntry {
                descriptor: registration.context.hotkey.to_string(),
                parsed: registration.context.parsed_hotkey.clone(),
                event_type: registration.options.event_type,
            });
        }
        detector.find_conflicts()
    }

    /// Callbacks that returned an error or panicked since the last reset.
    pub fn callback_failures(&self) -> usize {
        self.inner.callback_failures.load(Ordering::SeqCst)
    }

    fn handle(&self, id: RegistrationId, kind: RegistrationKind) -> RegistrationHandle {
        RegistrationHandle {
            inner: Arc::downgrade(&self.inner),
            id,
            kind,
        }
    }

    fn dispatch(&self, event: &mut dyn KeyEventView, call: PendingCall) {
        match call {
            PendingCall::Hotkey {
                id,
                callback,
                context,
                prevent_default,
                stop_propagation,
            } => {
                if !self.inner.should_dispatch(id, RegistrationKind::Hotkey) {
                    trace!(%id, "registration disposed or disabled during dispatch, skipping");
                    return;
                }

                trace!(%id, hotkey = %context.hotkey, "hotkey matched");
                if prevent_default {
                    event.prevent_default();
                }
                if stop_propagation {
                    event.stop_propagation();
                }

                let event: &dyn KeyEventView = &*event;
                self.invoke(id, || callback(event, &context));
            }
            PendingCall::Sequence {
                id,
                callback,
                context,
            } => {
                if !self.inner.should_dispatch(id, RegistrationKind::Sequence) {
                    trace!(%id, "sequence disposed or disabled during dispatch, skipping");
                    return;
                }

                debug!(%id, steps = context.steps.len(), "key sequence completed");
                let event: &dyn KeyEventView = &*event;
                self.invoke(id, || callback(event, &context));
            }
        }
    }

    /// Runs a callback inside the isolation boundary.
    fn invoke<F>(&self, id: RegistrationId, callback: F)
    where
        F: FnOnce() -> anyhow::Result<()>,
    {
        match panic::catch_unwind(AssertUnwindSafe(callback)) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.inner.callback_failures.fetch_add(1, Ordering::SeqCst);
                warn!(%id, error = %e, "hotkey callback failed");
            }
            Err(_) => {
                self.inner.callback_failures.fetch_add(1, Ordering::SeqCst);
                error!(%id, "hotkey callback panicked");
            }
        }
    }
}

impl Default for HotkeyManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

impl Inner {
    fn is_live(&self, id: RegistrationId, kind: RegistrationKind) -> bool {
        let state = self.state.lock();
        match kind {
            RegistrationKind::Hotkey => state.registrations.iter().any(|r| r.id == id),
            RegistrationKind::Sequence => state.sequences.iter().any(|s| s.id == id),
        }
    }

    /// Existence plus the current enabled flag.
    fn should_dispatch(&self, id: RegistrationId, kind: RegistrationKind) -> bool {
        let state = self.state.lock();
        match kind {
            RegistrationKind::Hotkey => state
                .registrations
                .iter()
                .any(|r| r.id == id && r.options.enabled),
            RegistrationKind::Sequence => state.sequences.iter().any(|s| s.id == id && s.enabled),
        }
    }
}

impl SessionState {
    fn allocate_id(&mut self) -> RegistrationId {
        self.next_id += 1;
        RegistrationId(self.next_id)
    }

    fn on_keydown(&mut self, event: &dyn KeyEventView, key: String, now: Instant) -> Vec<PendingCall> {
        let already_held = self.held_keys.contains(&key);
        let repeat = already_held || event.is_repeat();
        trace!(%key, repeat, "keydown");

        let mut pending = Vec::new();

        // Modifier presses neither advance nor abort sequences
        if !repeat && !is_modifier_key(&key) {
            for sequence in self.sequences.iter_mut().filter(|s| s.enabled) {
                if sequence.advance(event, now) {
                    pending.push(PendingCall::Sequence {
                        id: sequence.id,
                        callback: Arc::clone(&sequence.callback),
                        context: sequence.context.clone(),
                    });
                }
            }
        }

        if !already_held {
            self.held_keys.push(key);
        }

        self.collect_matches(event, EventType::Keydown, &mut pending);
        pending
    }

    fn on_keyup(&mut self, event: &dyn KeyEventView, key: &str) -> Vec<PendingCall> {
        self.held_keys.retain(|held| held != key);
        trace!(%key, remaining = self.held_keys.len(), "keyup");

        let mut pending = Vec::new();
        self.collect_matches(event, EventType::Keyup, &mut pending);

        if self.held_keys.is_empty() {
            self.rearm_all();
        }
        pending
    }

    fn collect_matches(&mut self, event: &dyn KeyEventView, event_type: EventType, pending: &mut Vec<PendingCall>) {
        for registration in self.registrations.iter_mut() {
            if registration.should_fire(event, event_type) {
                pending.push(PendingCall::Hotkey {
                    id: registration.id,
                    callback: Arc::clone(&registration.callback),
                    context: registration.context.clone(),
                    prevent_default: registration.options.prevent_default,
                    stop_propagation: registration.options.stop_propagation,
                });
            }
        }
    }

    fn rearm_all(&mut self) {
        for registration in self.registrations.iter_mut() {
            registration.has_fired = false;
        }
    }
}

/// Disposer returned by every registration
///
/// Calling [`unregister`](Self::unregister) more than once, after the
/// manager was reset, or after the manager was dropped is harmless.
#[derive(Clone, Debug)]
pub struct RegistrationHandle {
    inner: Weak<Inner>,
    id: RegistrationId,
    kind: RegistrationKind,
}

impl RegistrationHandle {
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    /// Removes the registration; idempotent.
    pub fn unregister(&self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };

        let mut state = inner.state.lock();
        let removed = match self.kind {
            RegistrationKind::Hotkey => {
                let before = state.registrations.len();
                state.registrations.retain(|r| r.id != self.id);
                before != state.registrations.len()
            }
            RegistrationKind::Sequence => {
                let before = state.sequences.len();
                state.sequences.retain(|s| s.id != self.id);
                before != state.sequences.len()
            }
        };

        if removed {
            debug!(id = %self.id, "registration removed");
        }
    }

    /// Enables or disables the registration in place.
    pub fn set_enabled(&self, enabled: bool) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };

        let mut state = inner.state.lock();
        match self.kind {
            RegistrationKind::Hotkey => {
                if let Some(r) = state.registrations.iter_mut().find(|r| r.id == self.id) {
                    r.options.enabled = enabled;
                }
            }
            RegistrationKind::Sequence => {
                if let Some(s) = state.sequences.iter_mut().find(|s| s.id == self.id) {
                    s.enabled = enabled;
                    s.reset();
                }
            }
        }
    }

    /// Returns true while the registration exists.
    pub fn is_active(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.is_live(self.id, self.kind))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests;
