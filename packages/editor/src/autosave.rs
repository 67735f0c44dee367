//! # Auto-Save
//!
//! Debounced persistence of the current form.
//!
//! Every edit re-arms a single deadline one quiet period in the future. When
//! the deadline passes, the store saves whatever the current form is *at
//! that moment*; nothing is captured when the timer is armed. Bursts of edits
//! therefore coalesce into one save.
//!
//! The scheduler itself is a plain deadline so it can be driven by any event
//! loop. `spawn_auto_save` drives it on tokio for embedders that share the
//! store between tasks. Saves write the state blob synchronously, so the
//! driver runs them on the blocking pool.

use crate::store::FormStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Store handle shared with the auto-save driver
pub type SharedStore = Arc<Mutex<FormStore>>;

/// Single re-armable deadline
#[derive(Debug, Clone)]
pub struct AutoSaveScheduler {
    enabled: bool,
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutoSaveScheduler {
    pub fn new(delay: Duration, enabled: bool) -> Self {
        Self {
            enabled,
            delay,
            deadline: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning auto-save off also drops any pending save
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cancel();
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the deadline. Returns whether a save is now pending.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        self.deadline = Some(now + self.delay);
        true
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the deadline has passed, without disarming it
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Disarm and report `true` if the deadline has passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm and report whether anything was pending
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

/// Poll the store's auto-save deadline every `poll_interval`.
///
/// The task ends once every other handle to the store has been dropped.
pub fn spawn_auto_save(store: &SharedStore, poll_interval: Duration) -> JoinHandle<()> {
    let weak = Arc::downgrade(store);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let Some(store) = weak.upgrade() else {
                debug!("Store dropped, stopping auto-save driver");
                break;
            };

            let now = Instant::now();
            let store = store.lock_owned().await;
            if !store.auto_save().is_due(now) {
                continue;
            }

            let saved = tokio::task::spawn_blocking(move || {
                let mut store = store;
                store.run_pending_auto_save(now)
            })
            .await;
            if let Err(e) = saved {
                warn!(error = %e, "Auto-save task failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_coalesces() {
        let start = Instant::now();
        let mut scheduler = AutoSaveScheduler::new(Duration::from_secs(1), true);

        assert!(scheduler.trigger(start));
        assert!(scheduler.trigger(start + Duration::from_millis(600)));

        // First deadline would have been start + 1s; re-armed to start + 1.6s
        assert!(!scheduler.take_due(start + Duration::from_millis(1200)));
        assert!(scheduler.take_due(start + Duration::from_millis(1600)));
        assert!(!scheduler.is_pending());
        assert!(!scheduler.take_due(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_is_due_does_not_disarm() {
        let start = Instant::now();
        let mut scheduler = AutoSaveScheduler::new(Duration::from_secs(1), true);
        scheduler.trigger(start);

        assert!(!scheduler.is_due(start));
        assert!(scheduler.is_due(start + Duration::from_secs(1)));
        assert!(scheduler.is_pending());
        assert!(scheduler.take_due(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_disabled_never_arms() {
        let now = Instant::now();
        let mut scheduler = AutoSaveScheduler::new(Duration::from_secs(1), false);
        assert!(!scheduler.trigger(now));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_disabling_cancels_pending() {
        let now = Instant::now();
        let mut scheduler = AutoSaveScheduler::new(Duration::from_secs(1), true);
        scheduler.trigger(now);
        scheduler.set_enabled(false);
        assert!(!scheduler.take_due(now + Duration::from_secs(2)));
    }
}
