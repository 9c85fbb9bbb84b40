//! Build-time configuration constants for the communication interface layer

use embassy_time::Duration;

/// Channel capacities in bytes
pub mod channels {
    /// Receive buffer feeding the inter-device protocol stack (MCU mode)
    pub const INTER_DEVICE_CAPACITY: usize = 256;
    /// Receive buffer feeding the command consumer (AT/Data modes, slave-only)
    pub const COMMAND_CAPACITY: usize = 256;
    /// Transmit buffer drained toward the inter-device link
    pub const AIR_OUT_CAPACITY: usize = 256;
}

/// Receive coalescing
pub mod coalesce {
    /// Command channel fill level at which the consumer is woken immediately
    /// (a quarter of the channel)
    pub const THRESHOLD_READ: usize = super::channels::COMMAND_CAPACITY / 4;

    /// Worst-case latency for partial data below the threshold
    pub const DELAY_MS: u64 = 5;
}

/// UART hardware parameters
pub mod uart {
    /// Depth of the hardware receive FIFO, and size of the per-read stack buffer
    pub const RX_FIFO_LEN: usize = 16;
}

/// Command consumer
pub mod consumer {
    /// Bytes drained from the command channel per sink call
    pub const CHUNK_SIZE: usize = 64;
}

/// Log sink
pub mod logging {
    /// Maximum length of a single formatted log record
    pub const MAX_MESSAGE_LEN: usize = 128;
}

/// Runtime tunables of the routers.
///
/// Defaults come from the constants above; tests and board setups can
/// override them when building the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmiConfig {
    /// Command channel size that triggers an immediate consumer wake
    pub threshold_read: usize,
    /// Delay before a coalesced wake for partial data
    pub coalesce_delay: Duration,
}

impl CmiConfig {
    /// Configuration built from the compile-time constants
    pub const fn new() -> Self {
        Self {
            threshold_read: coalesce::THRESHOLD_READ,
            coalesce_delay: Duration::from_millis(coalesce::DELAY_MS),
        }
    }

    /// Override the wake threshold
    pub const fn with_threshold_read(mut self, threshold_read: usize) -> Self {
        self.threshold_read = threshold_read;
        self
    }
}

impl Default for CmiConfig {
    fn default() -> Self {
        Self::new()
    }
}
