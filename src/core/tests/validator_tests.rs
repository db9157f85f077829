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

use crate::core::validator::{assert_valid_hotkey, check_hotkey, validate_hotkey, ValidationError};

// ============================================================================
// Valid descriptors
// ============================================================================

#[test]
fn test_valid_descriptors() {
    for descriptor in ["K", "Control+S", "Mod+Shift+K", "alt+f4", "Shift+ArrowUp", "Escape"] {
        let result = validate_hotkey(descriptor);
        assert!(result.valid, "{} should be valid: {:?}", descriptor, result.errors);
        assert!(result.errors.is_empty());
    }
}

#[test]
fn test_check_hotkey() {
    assert!(check_hotkey("Mod+P"));
    assert!(!check_hotkey("Mod+"));
    assert!(!check_hotkey(""));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_descriptor() {
    let result = validate_hotkey("   ");
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["Hotkey cannot be empty"]);
}

#[test]
fn test_empty_segment() {
    let result = validate_hotkey("Control++K");
    assert!(!result.valid);
    assert!(result.errors[0].starts_with("Empty segment"));
}

#[test]
fn test_duplicate_modifier() {
    let result = validate_hotkey("Control+ctrl+K");
    assert!(!result.valid);
    assert!(result.errors[0].contains("Duplicate modifier"));
}

#[test]
fn test_key_before_last_position() {
    let result = validate_hotkey("A+Control+K");
    assert!(!result.valid);
    assert!(result.errors[0].contains("Unknown modifier 'A'"));
}

#[test]
fn test_modifier_only() {
    let result = validate_hotkey("Control+Shift");
    assert!(!result.valid);
    assert!(result.errors[0].contains("must include a key"));
}

#[test]
fn test_modifier_key_alias_as_key() {
    let result = validate_hotkey("Control+Super");
    assert!(!result.valid);
    assert!(result.errors[0].contains("must include a key"));
}

#[test]
fn test_errors_accumulate() {
    let result = validate_hotkey("Foo+Shift+shift+Alt");
    assert_eq!(result.errors.len(), 3);
}

// ============================================================================
// Warnings
// ============================================================================

#[test]
fn test_unknown_key_is_warning_only() {
    let result = validate_hotkey("Control+MediaPlayPause");
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("MediaPlayPause"));
}

#[test]
fn test_mod_with_control_warns() {
    let result = validate_hotkey("Mod+Control+S");
    assert!(result.valid);
    assert!(result.warnings.iter().any(|w| w.contains("Control")));
}

// ============================================================================
// assert_valid_hotkey
// ============================================================================

#[test]
fn test_assert_valid_hotkey() {
    assert!(assert_valid_hotkey("Mod+S").is_ok());

    let err = assert_valid_hotkey("Shift+").unwrap_err();
    let ValidationError::Invalid { descriptor, errors } = &err;
    assert_eq!(descriptor, "Shift+");
    assert!(!errors.is_empty());
    assert!(err.to_string().starts_with("Invalid hotkey 'Shift+'"));
}
