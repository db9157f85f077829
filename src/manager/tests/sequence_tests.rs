use std::time::Instant;

use super::{linux_manager, ms, tap, Counter};
use crate::core::{KeyEvent, KeyEventView};
use crate::manager::{HotkeyManager, RegistrationError, SequenceContext, SequenceOptions};

fn register_counting(manager: &HotkeyManager, steps: &[&str], options: SequenceOptions) -> Counter {
    let counter = Counter::default();
    let sink = counter.clone();
    manager
        .register_sequence(
            steps.iter().copied(),
            move |_: &dyn KeyEventView, _: &SequenceContext| {
                sink.bump();
                Ok(())
            },
            options,
        )
        .unwrap();
    counter
}

#[test]
fn test_double_tap_fires() {
    let manager = linux_manager();
    let counter = register_counting(&manager, &["G", "G"], SequenceOptions::default());
    let start = Instant::now();

    tap(&manager, "g", start);
    assert_eq!(counter.get(), 0);
    tap(&manager, "g", start + ms(300));
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_pause_past_timeout_does_not_fire() {
    let manager = linux_manager();
    let counter = register_counting(&manager, &["G", "G"], SequenceOptions::default());
    let start = Instant::now();

    tap(&manager, "g", start);
    tap(&manager, "g", start + ms(1500));
    assert_eq!(counter.get(), 0);

    // The late press started a fresh attempt
    tap(&manager, "g", start + ms(1800));
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_interrupted_sequence_restarts() {
    let manager = linux_manager();
    let counter = register_counting(&manager, &["G", "G"], SequenceOptions::default());
    let start = Instant::now();

    for (i, key) in ["g", "x", "g", "g"].iter().enumerate() {
        tap(&manager, key, start + ms(100 * i as u64));
    }

    assert_eq!(counter.get(), 1);
}

#[test]
fn test_held_key_does_not_advance() {
    let manager = linux_manager();
    let counter = register_counting(&manager, &["G", "G"], SequenceOptions::default());
    let start = Instant::now();

    manager.handle_event_at(&mut KeyEvent::down("g"), start);
    manager.handle_event_at(&mut KeyEvent::down("g"), start + ms(50));
    manager.handle_event_at(&mut KeyEvent::down("g").repeated(), start + ms(100));

    assert_eq!(counter.get(), 0);
}

#[test]
fn test_modifier_press_does_not_abort() {
    let manager = linux_manager();
    let counter = register_counting(&manager, &["G", "Shift+G"], SequenceOptions::default());
    let start = Instant::now();

    tap(&manager, "g", start);
    manager.handle_event_at(&mut KeyEvent::down("Shift").shift(), start + ms(100));
    manager.handle_event_at(&mut KeyEvent::down("G").shift(), start + ms(150));

    assert_eq!(counter.get(), 1);
}

#[test]
fn test_per_sequence_timeout() {
    let manager = linux_manager();
    let options = SequenceOptions {
        timeout: Some(ms(200)),
        ..Default::default()
    };
    let counter = register_counting(&manager, &["D", "D"], options);
    let start = Instant::now();

    tap(&manager, "d", start);
    tap(&manager, "d", start + ms(300));
    assert_eq!(counter.get(), 0);

    tap(&manager, "d", start + ms(450));
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_single_step_sequence() {
    let manager = linux_manager();
    let counter = register_counting(&manager, &["Escape"], SequenceOptions::default());

    tap(&manager, "Esc", Instant::now());
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_disabled_sequence() {
    let manager = linux_manager();
    let options = SequenceOptions {
        enabled: false,
        ..Default::default()
    };
    let counter = register_counting(&manager, &["G", "G"], options);
    let start = Instant::now();

    tap(&manager, "g", start);
    tap(&manager, "g", start + ms(100));
    assert_eq!(counter.get(), 0);
}

#[test]
fn test_blur_resets_progress() {
    let manager = linux_manager();
    let counter = register_counting(&manager, &["G", "G"], SequenceOptions::default());
    let start = Instant::now();

    tap(&manager, "g", start);
    manager.handle_blur();
    tap(&manager, "g", start + ms(100));
    assert_eq!(counter.get(), 0);
}

#[test]
fn test_empty_sequence_rejected() {
    let manager = linux_manager();
    let result = manager.register_sequence(
        Vec::<&str>::new(),
        |_, _| Ok(()),
        SequenceOptions::default(),
    );

    assert!(matches!(result, Err(RegistrationError::EmptySequence)));
    assert_eq!(manager.sequence_count(), 0);
}

#[test]
fn test_malformed_step_rejected() {
    let manager = linux_manager();
    let result = manager.register_sequence(["G", "Control++"], |_, _| Ok(()), SequenceOptions::default());

    assert!(matches!(result, Err(RegistrationError::Parse(_))));
}

#[test]
fn test_sequence_context_lists_steps() {
    let manager = linux_manager();
    let seen = Counter::default();
    let sink = seen.clone();
    manager
        .register_sequence(
            ["Mod+K", "Mod+S"],
            move |_, ctx| {
                assert_eq!(ctx.parsed_steps[0].to_string(), "Control+K");
                assert_eq!(ctx.steps.len(), 2);
                sink.bump();
                Ok(())
            },
            SequenceOptions::default(),
        )
        .unwrap();
    let start = Instant::now();

    manager.handle_event_at(&mut KeyEvent::down("Control").ctrl(), start);
    manager.handle_event_at(&mut KeyEvent::down("k").ctrl(), start);
    manager.handle_event_at(&mut KeyEvent::up("k").ctrl(), start + ms(50));
    manager.handle_event_at(&mut KeyEvent::down("s").ctrl(), start + ms(100));

    assert_eq!(seen.get(), 1);
    assert_eq!(manager.callback_failures(), 0);
}

#[test]
fn test_overlapping_sequences_each_fire() {
    let manager = linux_manager();
    let g_t = register_counting(&manager, &["G", "T"], SequenceOptions::default());
    let t_x = register_counting(&manager, &["T", "X"], SequenceOptions::default());
    let start = Instant::now();

    tap(&manager, "g", start);
    tap(&manager, "t", start + ms(100));
    tap(&manager, "x", start + ms(200));

    assert_eq!(g_t.get(), 1);
    assert_eq!(t_x.get(), 1);
}

#[test]
fn test_aborting_key_starts_other_sequence() {
    let manager = linux_manager();
    let g_g = register_counting(&manager, &["G", "G"], SequenceOptions::default());
    let d_w = register_counting(&manager, &["D", "W"], SequenceOptions::default());
    let start = Instant::now();

    // D breaks G-G mid-progress and is the first step of D-W
    tap(&manager, "g", start);
    tap(&manager, "d", start + ms(100));
    tap(&manager, "w", start + ms(200));

    assert_eq!(g_g.get(), 0);
    assert_eq!(d_w.get(), 1);

    // G-G starts over cleanly afterwards
    tap(&manager, "g", start + ms(300));
    tap(&manager, "g", start + ms(400));
    assert_eq!(g_g.get(), 1);
}
