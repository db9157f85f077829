use crate::core::{ConflictDetector, EventType, Platform};
use crate::core::parser::parse_hotkey;

#[test]
fn test_no_conflicts_when_empty() {
    let detector = ConflictDetector::new(Platform::Linux);
    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_entries(), 0);
}

#[test]
fn test_no_conflicts_with_unique_hotkeys() {
    let mut detector = ConflictDetector::new(Platform::Linux);

    detector.add_descriptor("Control+K", EventType::Keydown).unwrap();
    detector.add_descriptor("Control+J", EventType::Keydown).unwrap();
    detector.add_descriptor("Control+Shift+K", EventType::Keydown).unwrap();

    assert_eq!(detector.find_conflicts().len(), 0);
    assert_eq!(detector.total_entries(), 3);
}

#[test]
fn test_detects_spelling_variants() {
    let mut detector = ConflictDetector::new(Platform::Linux);

    // Different spellings, same canonical hotkey
    detector.add_descriptor("ctrl+shift+k", EventType::Keydown).unwrap();
    detector.add_descriptor("Shift+Control+K", EventType::Keydown).unwrap();

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].conflicting_entries.len(), 2);
    assert_eq!(conflicts[0].hotkey.to_string(), "Control+Shift+K");
}

#[test]
fn test_mod_depends_on_platform() {
    let mut mac = ConflictDetector::new(Platform::Mac);
    mac.add_descriptor("Mod+S", EventType::Keydown).unwrap();
    mac.add_descriptor("Control+S", EventType::Keydown).unwrap();
    assert!(mac.find_conflicts().is_empty());

    let mut windows = ConflictDetector::new(Platform::Windows);
    windows.add_descriptor("Mod+S", EventType::Keydown).unwrap();
    windows.add_descriptor("Control+S", EventType::Keydown).unwrap();
    assert_eq!(windows.find_conflicts().len(), 1);
}

#[test]
fn test_event_types_do_not_conflict() {
    let mut detector = ConflictDetector::new(Platform::Linux);

    detector.add_descriptor("Escape", EventType::Keydown).unwrap();
    detector.add_descriptor("Escape", EventType::Keyup).unwrap();

    assert!(detector.find_conflicts().is_empty());
    let escape = parse_hotkey("Escape", Some(Platform::Linux)).unwrap();
    assert!(!detector.has_conflict(&escape, EventType::Keydown));
}

#[test]
fn test_detects_multiple_conflicts_sorted() {
    let mut detector = ConflictDetector::new(Platform::Linux);

    detector.add_descriptor("Control+Z", EventType::Keydown).unwrap();
    detector.add_descriptor("ctrl+z", EventType::Keydown).unwrap();
    detector.add_descriptor("Alt+A", EventType::Keydown).unwrap();
    detector.add_descriptor("alt+a", EventType::Keydown).unwrap();
    detector.add_descriptor("alt+a", EventType::Keydown).unwrap();

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].hotkey.to_string(), "Alt+A");
    assert_eq!(conflicts[0].conflicting_entries.len(), 3);
    assert_eq!(conflicts[1].hotkey.to_string(), "Control+Z");
}

#[test]
fn test_has_conflict() {
    let mut detector = ConflictDetector::new(Platform::Linux);
    detector.add_descriptor("F5", EventType::Keydown).unwrap();

    let f5 = parse_hotkey("F5", Some(Platform::Linux)).unwrap();
    assert!(!detector.has_conflict(&f5, EventType::Keydown));

    detector.add_descriptor("f5", EventType::Keydown).unwrap();
    assert!(detector.has_conflict(&f5, EventType::Keydown));
}

#[test]
fn test_malformed_descriptor_not_added() {
    let mut detector = ConflictDetector::new(Platform::Linux);
    assert!(detector.add_descriptor("Control++", EventType::Keydown).is_err());
    assert_eq!(detector.total_entries(), 0);
}
