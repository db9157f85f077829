//! Manager test suites
//!
//! - Dispatch: matching, latches, isolation, re-entrancy
//! - Sequences: ordering, timeouts, restarts
//! - Bindings: dispose-then-register lifecycle

#[cfg(test)]
mod sequence_tests;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ManagerConfig;
use crate::core::{KeyEvent, Platform};
use crate::manager::HotkeyManager;

/// Manager pinned to Linux so `Mod` is Control
fn linux_manager() -> HotkeyManager {
    HotkeyManager::new(ManagerConfig::for_platform(Platform::Linux))
}

/// Shared invocation counter
#[derive(Clone, Default)]
struct Counter(Arc<AtomicUsize>);

impl Counter {
    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Press and release a key at `at`
fn tap(manager: &HotkeyManager, key: &str, at: Instant) {
    manager.handle_event_at(&mut KeyEvent::down(key), at);
    manager.handle_event_at(&mut KeyEvent::up(key), at);
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
