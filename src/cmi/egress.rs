//! Transmit path (task context)
//!
//! Data mode and the slave-only build write straight to the UART. Otherwise
//! the payload is queued whole on the air-out channel or refused at once.

use super::Cmi;
use crate::channel::{ByteChannel, ChannelFull};
use crate::mode::{Mode, Personality};
use crate::uart::UartPort;

/// Where an outbound payload goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound {
    /// Synchronous UART transmit
    Direct,
    /// All-or-nothing push onto the air-out channel
    Buffered,
}

/// Transmit path for a personality
pub fn outbound_path(personality: Personality) -> Outbound {
    match personality {
        Personality::Master(Mode::Data) | Personality::SlaveOnly => Outbound::Direct,
        Personality::Master(Mode::Mcu | Mode::Command) => Outbound::Buffered,
    }
}

impl<const INTER: usize, const CMD: usize, const AIR: usize> Cmi<INTER, CMD, AIR> {
    /// Send a payload.
    ///
    /// Never called from interrupt context. When buffered, returns
    /// [`ChannelFull`] without waiting if the air-out channel cannot take the
    /// whole payload; the channel is left untouched in that case.
    pub fn send_outbound<U: UartPort + ?Sized>(
        &self,
        bytes: &[u8],
        uart: &mut U,
    ) -> Result<(), ChannelFull> {
        if bytes.is_empty() {
            return Ok(());
        }

        match outbound_path(self.personality()) {
            Outbound::Direct => {
                uart.transmit(bytes);
                Ok(())
            }
            Outbound::Buffered => match self.air_out.push_all(bytes) {
                Ok(()) => Ok(()),
                Err(ChannelFull) => {
                    log::debug!(
                        "tx {} bytes refused, air_out free {}",
                        bytes.len(),
                        self.air_out.free_space()
                    );
                    Err(ChannelFull)
                }
            },
        }
    }
}
