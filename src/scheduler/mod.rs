pub mod coalesce;
pub mod signal;
pub mod traits;

pub use coalesce::CoalescingTimer;
pub use signal::{SignalScheduler, WakeReason};
pub use traits::{Scheduler, TaskHandle, TimerHandle};
