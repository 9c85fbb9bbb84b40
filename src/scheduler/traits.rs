//! Scheduler trait for abstraction and testability
//!
//! The routers only ever wake a task or (re)arm a timer; both calls must be
//! safe from interrupt context and return immediately.

use embassy_time::Duration;

/// Opaque reference to a consumer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(pub u8);

/// Opaque reference to a single-shot, resettable timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(pub u8);

/// Task/timer services consumed by the routers
pub trait Scheduler {
    /// Make `task` runnable at its next scheduling opportunity
    fn activate_task(&self, task: TaskHandle);

    /// Fire `timer` after `delay`, superseding any pending firing
    fn arm_timer(&self, timer: TimerHandle, delay: Duration);
}
