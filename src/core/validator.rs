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

//! Hotkey descriptor validation
//!
//! The parser is deliberately lenient: unknown key tokens are accepted
//! verbatim and repeated modifiers collapse silently. Callers who want
//! strict checking run descriptors through this module first.
//!
//! # Rules
//! - Errors: empty descriptor, empty segment, no key token, more than one
//!   key token (a non-modifier before the last position), duplicate modifier
//! - Warnings: unknown key token, `Mod` combined with `Control` or `Meta`

use serde::Serialize;
use thiserror::Error;

use crate::core::keys::{is_known_key, modifier_for_key, normalize_key_name};
use crate::core::parser::{parse_modifier_token, tokenize, ModifierToken, ParseError};
use crate::core::types::Modifier;

/// Validation failure raised by [`assert_valid_hotkey`]
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid hotkey '{descriptor}': {}", .errors.join("; "))]
    Invalid {
        descriptor: String,
        errors: Vec<String>,
    },
}

/// Outcome of [`validate_hotkey`]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Non-fatal findings; a descriptor with warnings is still valid
    pub warnings: Vec<String>,
}

/// Validate a descriptor without parsing it for a platform
pub fn validate_hotkey(descriptor: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if descriptor.trim().is_empty() {
        errors.push("Hotkey cannot be empty".to_string());
        return finish(errors, warnings);
    }

    let tokens = match tokenize(descriptor) {
        Ok(tokens) => tokens,
        Err(ParseError::MalformedDescriptor { reason, .. }) => {
            errors.push(capitalise(&reason));
            return finish(errors, warnings);
        }
        Err(e) => {
            errors.push(e.to_string());
            return finish(errors, warnings);
        }
    };

    let Some((key, modifier_tokens)) = tokens.split_last() else {
        errors.push("Hotkey must include a key".to_string());
        return finish(errors, warnings);
    };

    let mut seen: Vec<ModifierToken> = Vec::new();
    for token in modifier_tokens {
        match parse_modifier_token(token) {
            Some(modifier) if seen.contains(&modifier) => {
                errors.push(format!("Duplicate modifier '{}'", token));
            }
            Some(modifier) => seen.push(modifier),
            None => errors.push(format!(
                "Unknown modifier '{}' (only the last token may be a key)",
                token
            )),
        }
    }

    let has_mod = seen.contains(&ModifierToken::Mod);
    for fixed in [Modifier::Control, Modifier::Meta] {
        if has_mod && seen.contains(&ModifierToken::Canonical(fixed)) {
            warnings.push(format!(
                "'Mod' may resolve to '{}' on some platforms, duplicating it",
                fixed
            ));
        }
    }

    if parse_modifier_token(key).is_some() || modifier_for_key(&normalize_key_name(key)).is_some() {
        errors.push(format!("Hotkey must include a key after modifier '{}'", key));
    } else if !is_known_key(&normalize_key_name(key)) {
        warnings.push(format!("Unknown key '{}'", key));
    }

    finish(errors, warnings)
}

/// Fail with [`ValidationError`] when the descriptor has errors
pub fn assert_valid_hotkey(descriptor: &str) -> Result<(), ValidationError> {
    let result = validate_hotkey(descriptor);
    if result.valid {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            descriptor: descriptor.to_string(),
            errors: result.errors,
        })
    }
}

/// Non-failing convenience check
pub fn check_hotkey(descriptor: &str) -> bool {
    validate_hotkey(descriptor).valid
}

fn finish(errors: Vec<String>, warnings: Vec<String>) -> ValidationResult {
    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
