//! UART interrupt dispatcher
//!
//! Received data is always read until the FIFO is empty, otherwise the RX
//! interrupt keeps re-triggering. Whatever does not fit the target channel
//! is dropped by the ingress router.

use crate::cmi::Cmi;
use crate::config::uart::RX_FIFO_LEN;
use crate::scheduler::Scheduler;
use crate::uart::traits::{InterruptCause, UartPort};

/// Summary of one interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsrOutcome {
    pub cause: InterruptCause,
    /// Bytes read out of the receive FIFO
    pub read: usize,
    /// Bytes admitted into a channel
    pub admitted: usize,
}

/// Handle a UART interrupt.
///
/// Bind this to the board's UART interrupt vector. Runs in interrupt context:
/// bounded by the FIFO depth, no waiting.
pub fn on_uart_interrupt<U, S, const INTER: usize, const CMD: usize, const AIR: usize>(
    cmi: &Cmi<INTER, CMD, AIR>,
    uart: &mut U,
    scheduler: &S,
) -> IsrOutcome
where
    U: UartPort + ?Sized,
    S: Scheduler + ?Sized,
{
    let cause = uart.interrupt_cause();
    log::trace!("uart interrupt: {:?}", cause);

    let mut outcome = IsrOutcome {
        cause,
        read: 0,
        admitted: 0,
    };

    match cause {
        InterruptCause::RxData => {
            let mut buf = [0u8; RX_FIFO_LEN];
            loop {
                let available = uart.rx_fifo_level().min(RX_FIFO_LEN);
                if available == 0 {
                    break;
                }
                let count = uart.block_read(&mut buf[..available]);
                if count == 0 {
                    break;
                }
                outcome.read += count;
                outcome.admitted += cmi.route_inbound(&buf[..count], scheduler).admitted;
            }
        }
        InterruptCause::TxEmpty => uart.trigger_tx(),
        InterruptCause::Other => {}
    }

    outcome
}
