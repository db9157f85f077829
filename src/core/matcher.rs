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

//! Matching keyboard events against parsed hotkeys
//!
//! Matching is exact on the modifier set: an event with an extra modifier
//! held never matches. Keys are compared after normalising the raw event key
//! name, case-insensitively for single characters and exactly otherwise.
//!
//! The handler constructors pre-parse their hotkeys once, so descriptor
//! errors surface when the handler is built rather than per event.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::event::KeyEventView;
use crate::core::keys::normalize_key_name;
use crate::core::parser::{parse_hotkey, ParseError};
use crate::core::platform::{detect_platform, Platform};
use crate::core::types::{Hotkey, HotkeyContext, ParsedHotkey};

/// Callback type stored by [`create_multi_hotkey_handler`]
pub type HandlerCallback = Box<dyn FnMut(&dyn KeyEventView, &HotkeyContext)>;

/// Options for the handler constructors
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandlerOptions {
    /// Suppress the host's default action when the hotkey matches
    pub prevent_default: bool,
    /// Stop propagation when the hotkey matches
    pub stop_propagation: bool,
    /// Platform used to resolve `Mod`; auto-detected when `None`
    pub platform: Option<Platform>,
}

/// Returns true if the event satisfies the hotkey exactly
pub fn matches_keyboard_event(event: &dyn KeyEventView, hotkey: &ParsedHotkey) -> bool {
    if event.modifiers() != hotkey.modifier_state() {
        return false;
    }

    keys_equal(&normalize_key_name(event.key()), hotkey.key())
}

/// Parse `descriptor` and match it against the event
pub fn matches_descriptor(
    event: &dyn KeyEventView,
    descriptor: &str,
    platform: Option<Platform>,
) -> Result<bool, ParseError> {
    let parsed = parse_hotkey(descriptor, platform)?;
    Ok(matches_keyboard_event(event, &parsed))
}

/// Compare two normalised key identifiers
///
/// Single characters compare case-insensitively, everything else exactly.
pub fn keys_equal(event_key: &str, hotkey_key: &str) -> bool {
    if event_key.chars().count() == 1 && hotkey_key.chars().count() == 1 {
        event_key.to_uppercase() == hotkey_key.to_uppercase()
    } else {
        event_key == hotkey_key
    }
}

/// Build a reusable handler for one hotkey
///
/// The returned closure reports whether the event matched. On a match it
/// applies `prevent_default` / `stop_propagation` before invoking the callback.
///
/// # Example
/// ```
/// use hotkey_manager::core::{
///     matcher::{create_hotkey_handler, HandlerOptions},
///     KeyEvent, Platform,
/// };
///
/// let options = HandlerOptions { platform: Some(Platform::Mac), prevent_default: true, ..Default::default() };
/// let mut handler = create_hotkey_handler("Mod+S", |_, ctx| println!("save via {}", ctx.hotkey), options)?;
///
/// let mut event = KeyEvent::down("s").meta();
/// assert!(handler(&mut event));
/// assert!(event.default_prevented);
/// # Ok::<(), hotkey_manager::core::parser::ParseError>(())
/// ```
pub fn create_hotkey_handler<H, F>(
    hotkey: H,
    mut callback: F,
    options: HandlerOptions,
) -> Result<impl FnMut(&mut dyn KeyEventView) -> bool, ParseError>
where
    H: Into<Hotkey>,
    F: FnMut(&dyn KeyEventView, &HotkeyContext),
{
    let platform = options.platform.unwrap_or_else(detect_platform);
    let hotkey = hotkey.into();
    let context = HotkeyContext {
        parsed_hotkey: hotkey.resolve(Some(platform))?,
        hotkey,
    };

    Ok(move |event: &mut dyn KeyEventView| {
        if !matches_keyboard_event(&*event, &context.parsed_hotkey) {
            return false;
        }

        trace!(hotkey = %context.hotkey, "hotkey handler matched");
        apply_side_effects(event, &options);
        callback(&*event, &context);
        true
    })
}

/// Build a handler for several hotkeys
///
/// Entries are evaluated in the given order and only the FIRST match is
/// invoked; later entries matching the same event are skipped.
pub fn create_multi_hotkey_handler<I, H>(
    handlers: I,
    options: HandlerOptions,
) -> Result<impl FnMut(&mut dyn KeyEventView) -> bool, ParseError>
where
    I: IntoIterator<Item = (H, HandlerCallback)>,
    H: Into<Hotkey>,
{
    let platform = options.platform.unwrap_or_else(detect_platform);

    let mut entries = Vec::new();
    for (hotkey, callback) in handlers {
        let hotkey = hotkey.into();
        let context = HotkeyContext {
            parsed_hotkey: hotkey.resolve(Some(platform))?,
            hotkey,
        };
        entries.push((context, callback));
    }

    Ok(move |event: &mut dyn KeyEventView| {
        for (context, callback) in entries.iter_mut() {
            if matches_keyboard_event(&*event, &context.parsed_hotkey) {
                trace!(hotkey = %context.hotkey, "multi-hotkey handler matched");
                apply_side_effects(event, &options);
                callback(&*event, context);
                return true;
            }
        }
        false
    })
}

fn apply_side_effects(event: &mut dyn KeyEventView, options: &HandlerOptions) {
    if options.prevent_default {
        event.prevent_default();
    }
    if options.stop_propagation {
        event.stop_propagation();
    }
}
