//! Scheduler backed by an embassy signal and a coalescing deadline
//!
//! Serves one consumer task and its coalescing timer. Activations raised
//! several times before the task runs collapse into a single wake.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant};

use super::coalesce::CoalescingTimer;
use super::traits::{Scheduler, TaskHandle, TimerHandle};

/// Why the consumer task woke up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    /// Explicit activation (threshold reached)
    Activated,
    /// Coalescing deadline expired
    TimerExpired,
}

/// Wake source for a single consumer task
pub struct SignalScheduler {
    task: TaskHandle,
    timer_handle: TimerHandle,
    wake: Signal<CriticalSectionRawMutex, ()>,
    rearm: Signal<CriticalSectionRawMutex, ()>,
    timer: CoalescingTimer,
    clock: fn() -> Instant,
}

impl SignalScheduler {
    /// Create a scheduler for `task` and `timer`, reading time from `clock`
    /// (`embassy_time::Instant::now` on target).
    pub const fn new(task: TaskHandle, timer: TimerHandle, clock: fn() -> Instant) -> Self {
        Self {
            task,
            timer_handle: timer,
            wake: Signal::new(),
            rearm: Signal::new(),
            timer: CoalescingTimer::new(),
            clock,
        }
    }

    /// Task handle this scheduler serves
    pub fn task(&self) -> TaskHandle {
        self.task
    }

    /// Timer handle this scheduler serves
    pub fn timer(&self) -> TimerHandle {
        self.timer_handle
    }

    /// Pending coalescing deadline
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Non-blocking check for a pending wake.
    ///
    /// An activation wins over the timer and disarms it.
    pub fn poll(&self) -> Option<WakeReason> {
        if self.wake.try_take().is_some() {
            self.timer.cancel();
            return Some(WakeReason::Activated);
        }
        if self.timer.fire_if_due((self.clock)()) {
            return Some(WakeReason::TimerExpired);
        }
        None
    }

    /// Wait for the next activation or timer expiry
    #[cfg(feature = "embedded")]
    pub async fn wait(&self) -> WakeReason {
        use embassy_futures::select::{select3, Either3};
        use embassy_time::Timer;

        loop {
            // Reset before reading the deadline so a re-arm in between is not lost
            self.rearm.reset();
            if let Some(reason) = self.poll() {
                return reason;
            }

            let deadline = self.timer.deadline().unwrap_or(Instant::MAX);
            match select3(self.wake.wait(), self.rearm.wait(), Timer::at(deadline)).await {
                Either3::First(()) => {
                    self.timer.cancel();
                    return WakeReason::Activated;
                }
                Either3::Second(()) | Either3::Third(()) => {}
            }
        }
    }
}

impl Scheduler for SignalScheduler {
    fn activate_task(&self, task: TaskHandle) {
        if task != self.task {
            log::warn!("activate for unknown task {:?}", task);
            return;
        }
        self.wake.signal(());
    }

    fn arm_timer(&self, timer: TimerHandle, delay: Duration) {
        if timer != self.timer_handle {
            log::warn!("arm for unknown timer {:?}", timer);
            return;
        }
        self.timer.reset((self.clock)(), delay);
        self.rearm.signal(());
    }
}
