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

//! Hotkey formatting
//!
//! Turns a [`ParsedHotkey`] back into text:
//! - [`format_hotkey`]: canonical descriptor that parses back to the same hotkey
//! - [`format_for_display`]: platform-styled label (`⌘⇧S` on mac, `Ctrl+Shift+S` elsewhere)
//! - [`format_with_labels`]: text labels on every platform (`Cmd+Shift+S`)
//!
//! All functions are pure. The display functions also take descriptor
//! strings and fail only when one does not parse.

use serde::{Deserialize, Serialize};

use crate::core::keys::{key_display_symbol, mac_modifier_symbol, modifier_label};
use crate::core::platform::{detect_platform, Platform};
use crate::core::parser::ParseError;
use crate::core::types::{Hotkey, ParsedHotkey};

/// Options for [`format_for_display`]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FormatDisplayOptions {
    /// Target platform; auto-detected when `None`
    pub platform: Option<Platform>,
    /// Separator between parts on non-mac platforms (defaults to `+`)
    pub separator: Option<String>,
}

impl FormatDisplayOptions {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            separator: None,
        }
    }
}

/// Canonical descriptor, modifiers in Control, Alt, Shift, Meta order
pub fn format_hotkey(hotkey: &ParsedHotkey) -> String {
    hotkey.to_string()
}

/// Platform-styled display label
///
/// On mac modifiers are glyphs and are concatenated without a separator;
/// elsewhere text labels are joined with the separator. Named keys with a
/// registered glyph (arrows, Enter, ...) use it; any other key is shown as
/// its identifier.
///
/// Accepts a descriptor string or an already parsed hotkey. A descriptor is
/// resolved against the formatting platform, so `Mod` follows it.
pub fn format_for_display<H: Into<Hotkey>>(
    hotkey: H,
    options: &FormatDisplayOptions,
) -> Result<String, ParseError> {
    let platform = options.platform.unwrap_or_else(detect_platform);
    let hotkey = hotkey.into().resolve(Some(platform))?;
    let key = key_display_symbol(hotkey.key()).unwrap_or(hotkey.key());

    let label = match platform {
        Platform::Mac => {
            let mut label: String = hotkey
                .modifiers()
                .iter()
                .map(|m| mac_modifier_symbol(*m))
                .collect();
            label.push_str(key);
            label
        }
        Platform::Windows | Platform::Linux => {
            let separator = options.separator.as_deref().unwrap_or("+");
            hotkey
                .modifiers()
                .iter()
                .map(|m| modifier_label(*m, platform))
                .chain(std::iter::once(key))
                .collect::<Vec<_>>()
                .join(separator)
        }
    };

    Ok(label)
}

/// Text labels joined with `+` on every platform
pub fn format_with_labels<H: Into<Hotkey>>(
    hotkey: H,
    platform: Option<Platform>,
) -> Result<String, ParseError> {
    let platform = platform.unwrap_or_else(detect_platform);
    let hotkey = hotkey.into().resolve(Some(platform))?;

    Ok(hotkey
        .modifiers()
        .iter()
        .map(|m| modifier_label(*m, platform))
        .chain(std::iter::once(hotkey.key()))
        .collect::<Vec<_>>()
        .join("+"))
}
