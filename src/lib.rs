#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod cmi;
pub mod config;
pub mod logging;
pub mod mode;
pub mod scheduler;
pub mod uart;

// Async tasks depend on embassy features only available with the embedded feature
#[cfg(feature = "embedded")]
pub mod tasks;

pub use channel::{ByteChannel, ChannelFull, GuardedChannel};
pub use cmi::{Admission, ChannelId, Cmi, CommandSink, Outbound, Wake};
pub use config::CmiConfig;
pub use mode::{Mode, ModeCell, Personality, Role};
pub use scheduler::{Scheduler, SignalScheduler, TaskHandle, TimerHandle, WakeReason};
pub use uart::{on_uart_interrupt, InterruptCause, IsrOutcome, UartPort};
