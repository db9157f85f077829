// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! src/core/parser.rs
//!
//! Hotkey descriptor parser
//!
//! This module turns descriptor strings such as `"Mod+Shift+K"` into a
//! canonical [`ParsedHotkey`]. It handles:
//! - Modifier aliases (`Ctrl`/`Control`, `Alt`/`Option`, `Meta`/`Cmd`/`Command`/`Win`)
//! - The virtual `Mod` modifier, resolved per platform
//! - Case-insensitive letter keys and canonical spelling of named keys
//!
//! # Grammar
//! ```text
//! Descriptor := Token ('+' Token)*
//! ```
//! Every token but the last must be a modifier alias; the last token is the key.
//!
//! # Architecture
//! Tokenising is done with nom combinators; token classification and
//! platform resolution happen afterwards on the token list.

use nom::{
    bytes::complete::take_while,
    character::complete::char,
    combinator::all_consuming,
    multi::separated_list1,
    IResult, Parser,
};
use thiserror::Error;

use crate::core::keys::modifier_for_key;
use crate::core::platform::{detect_platform, Platform};
use crate::core::types::{Modifier, ModifierState, ParsedHotkey};

/// Parse errors, surfaced synchronously to the caller
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Malformed hotkey '{descriptor}': {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },

    #[error("Invalid platform tag '{0}' (expected mac, windows or linux)")]
    InvalidPlatformTag(String),
}

/// A modifier token as written in a descriptor
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModifierToken {
    /// A concrete modifier
    Canonical(Modifier),
    /// The platform-dependent `Mod`
    Mod,
}

impl ModifierToken {
    /// Resolve to a canonical modifier for the given platform
    pub fn resolve(&self, platform: Platform) -> Modifier {
        match self {
            ModifierToken::Canonical(modifier) => *modifier,
            ModifierToken::Mod => platform.primary_modifier(),
        }
    }
}

/// Classify a descriptor token as a modifier alias (case-insensitive)
pub fn parse_modifier_token(token: &str) -> Option<ModifierToken> {
    let modifier = match token.trim().to_lowercase().as_str() {
        "control" | "ctrl" => Modifier::Control,
        "shift" => Modifier::Shift,
        "alt" | "option" => Modifier::Alt,
        "meta" | "cmd" | "command" | "win" => Modifier::Meta,
        "mod" => return Some(ModifierToken::Mod),
        _ => return None,
    };
    Some(ModifierToken::Canonical(modifier))
}

/// Returns true if the token is a modifier alias, including `Mod`
pub fn is_modifier(token: &str) -> bool {
    parse_modifier_token(token).is_some()
}

/// Split a descriptor on `+`
///
/// Empty segments are kept so the caller can report them.
pub fn split_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char('+'), take_while(|c: char| c != '+'))).parse(input)
}

/// Tokenise a descriptor and reject empty segments
pub fn tokenize(descriptor: &str) -> Result<Vec<&str>, ParseError> {
    let (_, raw) = split_tokens(descriptor).map_err(|e| malformed(descriptor, &format!("{:?}", e)))?;

    let tokens: Vec<&str> = raw.iter().map(|t| t.trim()).collect();

    if let Some(pos) = tokens.iter().position(|t| t.is_empty()) {
        return Err(malformed(
            descriptor,
            &format!("empty segment at position {}", pos + 1),
        ));
    }

    Ok(tokens)
}

/// Parse a descriptor into its canonical form
///
/// `platform` resolves `Mod`; when `None` the platform is auto-detected.
///
/// # Example
/// ```
/// use hotkey_manager::core::{parser::parse_hotkey, Platform};
///
/// let parsed = parse_hotkey("Mod+Shift+k", Some(Platform::Mac))?;
/// assert!(parsed.meta() && parsed.shift() && !parsed.ctrl());
/// assert_eq!(parsed.key(), "K");
/// # Ok::<(), hotkey_manager::core::parser::ParseError>(())
/// ```
pub fn parse_hotkey(descriptor: &str, platform: Option<Platform>) -> Result<ParsedHotkey, ParseError> {
    let platform = platform.unwrap_or_else(detect_platform);
    let tokens = tokenize(descriptor)?;

    let Some((key, modifier_tokens)) = tokens.split_last() else {
        return Err(malformed(descriptor, "no key token"));
    };

    if is_modifier(key) {
        return Err(malformed(
            descriptor,
            &format!("'{}' is a modifier; a hotkey needs exactly one key", key),
        ));
    }

    let mut modifiers = ModifierState::default();
    for token in modifier_tokens {
        match parse_modifier_token(token) {
            Some(modifier) => modifiers.insert(modifier.resolve(platform)),
            None => {
                return Err(malformed(
                    descriptor,
                    &format!("'{}' is not a modifier; only the last token may be a key", token),
                ));
            }
        }
    }

    // Key aliases such as `Super` or `OS` normalise onto a modifier name
    let parsed = ParsedHotkey::new(key, modifiers);
    if modifier_for_key(parsed.key()).is_some() {
        return Err(malformed(
            descriptor,
            &format!("'{}' is a modifier; a hotkey needs exactly one key", key),
        ));
    }

    Ok(parsed)
}

/// Parse then re-emit a descriptor in canonical order
///
/// `"shift+ctrl+a"` becomes `"Control+Shift+A"`.
pub fn normalize_hotkey(descriptor: &str, platform: Option<Platform>) -> Result<String, ParseError> {
    parse_hotkey(descriptor, platform).map(|parsed| crate::core::format::format_hotkey(&parsed))
}

fn malformed(descriptor: &str, reason: &str) -> ParseError {
    ParseError::MalformedDescriptor {
        descriptor: descriptor.to_string(),
        reason: reason.to_string(),
    }
}
