//! Command consumer task
//!
//! Sleeps until the UART interrupt activates it or the coalescing timer
//! expires, then hands everything queued on the command channel to the sink.

use crate::cmi::{Cmi, CommandSink};
use crate::scheduler::{SignalScheduler, WakeReason};

/// Task that drains the command channel into `sink`.
///
/// `scheduler` must be the one passed to the UART interrupt for this context.
pub async fn command_rx_task<K, const INTER: usize, const CMD: usize, const AIR: usize>(
    cmi: &'static Cmi<INTER, CMD, AIR>,
    scheduler: &'static SignalScheduler,
    mut sink: K,
) -> !
where
    K: CommandSink,
{
    loop {
        command_rx_once(cmi, scheduler, &mut sink).await;
    }
}

/// Wait for one wake and drain the command channel into `sink`
pub async fn command_rx_once<K, const INTER: usize, const CMD: usize, const AIR: usize>(
    cmi: &Cmi<INTER, CMD, AIR>,
    scheduler: &SignalScheduler,
    sink: &mut K,
) -> (WakeReason, usize)
where
    K: CommandSink + ?Sized,
{
    let reason = scheduler.wait().await;
    let count = cmi.pump_command(sink);
    log::trace!("command rx {:?}: {} bytes", reason, count);
    (reason, count)
}
