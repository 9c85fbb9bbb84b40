//! UART driver trait for abstraction and testability
//!
//! The interface layer never touches registers. The board driver implements
//! this trait; tests use the mock below.

/// Interrupt cause reported by the UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptCause {
    /// Receive FIFO holds data
    RxData,
    /// Transmit FIFO drained
    TxEmpty,
    /// Line status, timeout or anything else
    Other,
}

/// Hardware UART as seen by the interface layer
pub trait UartPort {
    /// Cause of the pending interrupt
    fn interrupt_cause(&mut self) -> InterruptCause;

    /// Bytes waiting in the receive FIFO
    fn rx_fifo_level(&mut self) -> usize;

    /// Read up to `buf.len()` bytes from the receive FIFO
    ///
    /// Returns the number of bytes actually read.
    fn block_read(&mut self, buf: &mut [u8]) -> usize;

    /// Transmit `data`, applying the driver's own flow control
    fn transmit(&mut self, data: &[u8]);

    /// Refill the transmit FIFO from the driver's queue (TX-empty interrupt)
    fn trigger_tx(&mut self);
}
