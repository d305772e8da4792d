//! Session-scoped scrub position shared by every widget.
//!
//! [`ContextualTimeState`] owns the one writable handle. Widgets get a
//! [`ContextualTimeReader`] from [`ContextualTimeState::subscribe`] and can
//! only read. Setting the value it already holds (including clearing an
//! already clear state) does not notify anyone.

use tokio::sync::watch;
use tracing::trace;

use crate::series::TimeLabel;

/// The single writer of the scrub position.
///
/// `None` means "not scrubbing": widgets show only the live now/horizon
/// pair. Not `Clone`, and [`set`](Self::set) takes `&mut self`, so there is
/// exactly one place that can move the scrub position.
#[derive(Debug)]
pub struct ContextualTimeState {
    tx: watch::Sender<Option<TimeLabel>>,
}

impl Default for ContextualTimeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextualTimeState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn get(&self) -> Option<TimeLabel> {
        *self.tx.borrow()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.get().is_some()
    }

    /// Move the scrub position. Returns whether the value changed; readers
    /// are notified only when it did.
    pub fn set(&mut self, time: Option<TimeLabel>) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == time {
                false
            } else {
                *current = time;
                true
            }
        });
        if changed {
            match time {
                Some(t) => trace!(
                    scrub = %t,
                    readers = self.tx.receiver_count(),
                    "contextual time set"
                ),
                None => trace!(readers = self.tx.receiver_count(), "contextual time cleared"),
            }
        }
        changed
    }

    /// Return to live mode. Idempotent.
    pub fn clear(&mut self) -> bool {
        self.set(None)
    }

    /// A read-only handle for one widget. It starts with the current value
    /// already seen.
    pub fn subscribe(&self) -> ContextualTimeReader {
        ContextualTimeReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read-only view of the scrub position held by a widget.
#[derive(Debug, Clone)]
pub struct ContextualTimeReader {
    rx: watch::Receiver<Option<TimeLabel>>,
}

impl ContextualTimeReader {
    /// Current value, without marking it seen.
    pub fn get(&self) -> Option<TimeLabel> {
        *self.rx.borrow()
    }

    /// Whether the value changed since this reader last observed it.
    /// False once the writer is gone.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Current value, marking it seen.
    pub fn observe(&mut self) -> Option<TimeLabel> {
        *self.rx.borrow_and_update()
    }

    /// The new value if it changed since the last observation.
    ///
    /// The outer `Option` says whether a redraw is needed; the inner one is
    /// the scrub position itself.
    pub fn poll_change(&mut self) -> Option<Option<TimeLabel>> {
        if self.has_changed() {
            Some(self.observe())
        } else {
            None
        }
    }
}
