//! Time-deferred actions.
//!
//! There are no timers or threads. Each entry records its duration and a
//! progress accumulator; `advance` adds `delta / duration` to every entry
//! and hands back the ones that reached 1.0, in the order they were
//! scheduled. A fired entry is removed, so it fires exactly once.
//!
//! Actions refer to cards by `CardIndex`, never by reference.

use serde::{Deserialize, Serialize};

use crate::core::CardIndex;

/// Something the session does later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Turn a mismatched pair back face-down.
    Unflip(CardIndex, CardIndex),
    /// End the preview power-up.
    ClosePreview,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Deferred {
    action: DeferredAction,
    duration: f64,
    /// 0.0 when scheduled, fires at 1.0.
    progress: f64,
}

/// Queue of pending deferred actions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeferredQueue {
    entries: Vec<Deferred>,
}

impl DeferredQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once `duration` seconds have been advanced.
    ///
    /// A non-positive duration fires on the next `advance`.
    pub fn schedule(&mut self, action: DeferredAction, duration: f64) {
        self.entries.push(Deferred {
            action,
            duration,
            progress: 0.0,
        });
    }

    /// Advance every entry by `delta` seconds and remove the ones now due.
    ///
    /// Due actions come back in scheduling order.
    pub fn advance(&mut self, delta: f64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.progress += if entry.duration > 0.0 {
                delta / entry.duration
            } else {
                1.0
            };
            if entry.progress >= 1.0 {
                due.push(entry.action);
                false
            } else {
                true
            }
        });
        due
    }

    /// Whether an unflip touching `index` is still waiting.
    #[must_use]
    pub fn has_pending_unflip(&self, index: CardIndex) -> bool {
        self.entries.iter().any(|e| match e.action {
            DeferredAction::Unflip(a, b) => a == index || b == index,
            DeferredAction::ClosePreview => false,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
