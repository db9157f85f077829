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

//! Owned bindings
//!
//! A binding owns one registration for as long as it lives. Changing the
//! hotkey, callback or options disposes the previous registration before the
//! new one is created, so a binding never has two live registrations.
//! Dropping the binding disposes its registration.

use std::sync::Arc;

use super::{
    HotkeyCallback, HotkeyManager, HotkeyOptions, RegistrationError, RegistrationHandle,
    SequenceCallback, SequenceContext, SequenceOptions,
};
use crate::core::event::KeyEventView;
use crate::core::types::{Hotkey, HotkeyContext};

/// Single hotkey bound to a manager for the lifetime of this value
pub struct HotkeyBinding {
    manager: HotkeyManager,
    handle: Option<RegistrationHandle>,
}

impl HotkeyBinding {
    pub fn new<H, F>(
        manager: &HotkeyManager,
        hotkey: H,
        callback: F,
        options: HotkeyOptions,
    ) -> Result<Self, RegistrationError>
    where
        H: Into<Hotkey>,
        F: Fn(&dyn KeyEventView, &HotkeyContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut binding = Self {
            manager: manager.clone(),
            handle: None,
        };
        binding.update(hotkey, callback, options)?;
        Ok(binding)
    }

    /// Replaces the registration.
    ///
    /// The old registration is gone even when the new hotkey fails to parse.
    pub fn update<H, F>(
        &mut self,
        hotkey: H,
        callback: F,
        options: HotkeyOptions,
    ) -> Result<(), RegistrationError>
    where
        H: Into<Hotkey>,
        F: Fn(&dyn KeyEventView, &HotkeyContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.dispose();
        let callback: HotkeyCallback = Arc::new(callback);
        let handle = self
            .manager
            .register_shared(hotkey.into(), callback, options)?;
        self.handle = Some(handle);
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) {
        if let Some(handle) = &self.handle {
            handle.set_enabled(enabled);
        }
    }

    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.unregister();
        }
    }

    pub fn is_registered(&self) -> bool {
        self.handle.as_ref().is_some_and(RegistrationHandle::is_active)
    }
}

impl Drop for HotkeyBinding {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Key sequence bound to a manager for the lifetime of this value
pub struct SequenceBinding {
    manager: HotkeyManager,
    handle: Option<RegistrationHandle>,
}

impl SequenceBinding {
    pub fn new<I, H, F>(
        manager: &HotkeyManager,
        steps: I,
        callback: F,
        options: SequenceOptions,
    ) -> Result<Self, RegistrationError>
    where
        I: IntoIterator<Item = H>,
        H: Into<Hotkey>,
        F: Fn(&dyn KeyEventView, &SequenceContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut binding = Self {
            manager: manager.clone(),
            handle: None,
        };
        binding.update(steps, callback, options)?;
        Ok(binding)
    }

    /// Replaces the registration; progress of the old sequence is lost.
    pub fn update<I, H, F>(
        &mut self,
        steps: I,
        callback: F,
        options: SequenceOptions,
    ) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = H>,
        H: Into<Hotkey>,
        F: Fn(&dyn KeyEventView, &SequenceContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.dispose();
        let steps: Vec<Hotkey> = steps.into_iter().map(Into::into).collect();
        let callback: SequenceCallback = Arc::new(callback);
        let handle = self
            .manager
            .register_sequence_shared(steps, callback, options)?;
        self.handle = Some(handle);
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) {
        if let Some(handle) = &self.handle {
            handle.set_enabled(enabled);
        }
    }

    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.unregister();
        }
    }

    pub fn is_registered(&self) -> bool {
        self.handle.as_ref().is_some_and(RegistrationHandle::is_active)
    }
}

impl Drop for SequenceBinding {
    fn drop(&mut self) {
        self.dispose();
    }
}
