//! Resettable single-shot deadline
//!
//! Re-arming overwrites the pending deadline instead of queueing another
//! firing, so any number of resets before expiry yields one activation.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant};

/// Pending-deadline timer shared between the UART interrupt and a task
pub struct CoalescingTimer {
    deadline: Mutex<CriticalSectionRawMutex, Cell<Option<Instant>>>,
}

impl CoalescingTimer {
    /// Create a disarmed timer
    pub const fn new() -> Self {
        Self {
            deadline: Mutex::new(Cell::new(None)),
        }
    }

    /// Arm for `now + delay`, replacing any pending deadline
    pub fn reset(&self, now: Instant, delay: Duration) {
        self.deadline.lock(|deadline| deadline.set(Some(now + delay)));
    }

    /// Drop the pending deadline, if any
    pub fn cancel(&self) {
        self.deadline.lock(|deadline| deadline.set(None));
    }

    /// Pending deadline
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline.lock(Cell::get)
    }

    /// Returns `true` once when the deadline has passed, disarming the timer
    pub fn fire_if_due(&self, now: Instant) -> bool {
        self.deadline.lock(|deadline| match deadline.get() {
            Some(at) if at <= now => {
                deadline.set(None);
                true
            }
            _ => false,
        })
    }
}

impl Default for CoalescingTimer {
    fn default() -> Self {
        Self::new()
    }
}
