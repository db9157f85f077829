//! Display formatting tests
//!
//! Canonical strings, platform glyphs and text labels.

use crate::core::format::{format_for_display, format_hotkey, format_with_labels, FormatDisplayOptions};
use crate::core::parser::{parse_hotkey, ParseError};
use crate::core::types::ParsedHotkey;
use crate::core::Platform;

fn parsed(descriptor: &str, platform: Platform) -> ParsedHotkey {
    parse_hotkey(descriptor, Some(platform)).unwrap()
}

fn display(descriptor: &str, options: &FormatDisplayOptions) -> String {
    format_for_display(descriptor, options).unwrap()
}

#[test]
fn test_format_hotkey_canonical_order() {
    let hotkey = parsed("meta+shift+alt+ctrl+x", Platform::Linux);
    assert_eq!(format_hotkey(&hotkey), "Control+Alt+Shift+Meta+X");
}

#[test]
fn test_mac_glyphs_concatenated() {
    let options = FormatDisplayOptions::for_platform(Platform::Mac);

    assert_eq!(display("Mod+S", &options), "\u{2318}S");
    assert_eq!(display("Control+Alt+Shift+Meta+K", &options), "\u{2303}\u{2325}\u{21e7}\u{2318}K");
}

#[test]
fn test_windows_labels() {
    let options = FormatDisplayOptions::for_platform(Platform::Windows);

    assert_eq!(display("Mod+S", &options), "Ctrl+S");
    assert_eq!(display("Meta+Shift+E", &options), "Shift+Win+E");
}

#[test]
fn test_linux_meta_is_super() {
    let options = FormatDisplayOptions::for_platform(Platform::Linux);
    assert_eq!(display("Meta+L", &options), "Super+L");
}

#[test]
fn test_custom_separator() {
    let options = FormatDisplayOptions {
        platform: Some(Platform::Windows),
        separator: Some(" + ".to_string()),
    };
    assert_eq!(display("Control+Shift+P", &options), "Ctrl + Shift + P");
}

#[test]
fn test_key_symbols() {
    let mac = FormatDisplayOptions::for_platform(Platform::Mac);
    assert_eq!(display("Shift+Up", &mac), "\u{21e7}\u{2191}");
    assert_eq!(display("Escape", &mac), "Esc");

    let windows = FormatDisplayOptions::for_platform(Platform::Windows);
    assert_eq!(display("Alt+Enter", &windows), "Alt+\u{21b5}");

    // Keys without a glyph show as themselves
    assert_eq!(display("F5", &windows), "F5");
}

#[test]
fn test_parsed_hotkey_keeps_its_resolution() {
    // Resolved for Windows, so Mod is already Control
    let hotkey = parsed("Mod+S", Platform::Windows);
    let mac = FormatDisplayOptions::for_platform(Platform::Mac);

    assert_eq!(format_for_display(&hotkey, &mac).unwrap(), "\u{2303}S");
    assert_eq!(format_for_display(hotkey, &mac).unwrap(), "\u{2303}S");
}

#[test]
fn test_malformed_descriptor_not_formatted() {
    let options = FormatDisplayOptions::for_platform(Platform::Linux);

    assert!(matches!(
        format_for_display("Control+", &options),
        Err(ParseError::MalformedDescriptor { .. })
    ));
    assert!(format_with_labels("Shift", Some(Platform::Mac)).is_err());
}

#[test]
fn test_format_with_labels() {
    assert_eq!(
        format_with_labels("Mod+Alt+ArrowLeft", Some(Platform::Mac)).unwrap(),
        "Option+Cmd+ArrowLeft"
    );

    let hotkey = parsed("Mod+Alt+ArrowLeft", Platform::Windows);
    assert_eq!(
        format_with_labels(&hotkey, Some(Platform::Windows)).unwrap(),
        "Ctrl+Alt+ArrowLeft"
    );
}
