//! Communication interface layer context
//!
//! One [`Cmi`] owns the three channels, the mode cell and the handles of the
//! command consumer. It is built once at startup and shared by reference
//! between the UART interrupt (ingress) and the protocol tasks (egress).
//!
//! ```text
//! UART rx ─▶ route_inbound ─┬─▶ inter_device ─▶ inter-device stack   (master, MCU)
//!                           └─▶ command ──────▶ command consumer     (other modes, slave-only)
//!
//! tasks ──▶ send_outbound ──┬─▶ UART transmit                        (master Data, slave-only)
//!                           └─▶ air_out ──────▶ inter-device link    (master MCU/Command)
//! ```

pub mod consumer;
pub mod egress;
pub mod ingress;

use crate::channel::{ByteChannel, GuardedChannel};
use crate::config::{channels, CmiConfig};
use crate::mode::{Mode, ModeCell, Personality, Role};
use crate::scheduler::{TaskHandle, TimerHandle};

pub use consumer::CommandSink;
pub use egress::Outbound;
pub use ingress::{Admission, Wake};

/// Identifies one of the three channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelId {
    /// Receive path toward the inter-device protocol stack
    InterDevice,
    /// Receive path toward the command consumer
    Command,
    /// Transmit path toward the inter-device link
    AirOut,
}

/// Process-wide interface context
pub struct Cmi<
    const INTER: usize = { channels::INTER_DEVICE_CAPACITY },
    const CMD: usize = { channels::COMMAND_CAPACITY },
    const AIR: usize = { channels::AIR_OUT_CAPACITY },
> {
    role: Role,
    mode: ModeCell,
    config: CmiConfig,
    consumer: TaskHandle,
    coalesce_timer: TimerHandle,
    inter_device: GuardedChannel<INTER>,
    command: GuardedChannel<CMD>,
    air_out: GuardedChannel<AIR>,
}

impl<const INTER: usize, const CMD: usize, const AIR: usize> Cmi<INTER, CMD, AIR> {
    /// Create a context with empty channels
    pub const fn new(
        role: Role,
        mode: Mode,
        config: CmiConfig,
        consumer: TaskHandle,
        coalesce_timer: TimerHandle,
    ) -> Self {
        Self {
            role,
            mode: ModeCell::new(mode),
            config,
            consumer,
            coalesce_timer,
            inter_device: GuardedChannel::new(),
            command: GuardedChannel::new(),
            air_out: GuardedChannel::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Mode cell, written by the configuration code
    pub fn mode(&self) -> &ModeCell {
        &self.mode
    }

    pub fn config(&self) -> &CmiConfig {
        &self.config
    }

    /// Role and mode as seen by this call
    pub fn personality(&self) -> Personality {
        self.mode.personality(self.role)
    }

    pub fn inter_device(&self) -> &GuardedChannel<INTER> {
        &self.inter_device
    }

    pub fn command(&self) -> &GuardedChannel<CMD> {
        &self.command
    }

    pub fn air_out(&self) -> &GuardedChannel<AIR> {
        &self.air_out
    }

    /// Channel size by id
    pub fn size_of(&self, id: ChannelId) -> usize {
        match id {
            ChannelId::InterDevice => self.inter_device.size(),
            ChannelId::Command => self.command.size(),
            ChannelId::AirOut => self.air_out.size(),
        }
    }

    /// Pop received bytes destined for the inter-device stack
    pub fn drain_inter_device(&self, buf: &mut [u8]) -> usize {
        self.inter_device.pop(buf)
    }

    /// Pop received bytes destined for the command consumer
    pub fn drain_command(&self, buf: &mut [u8]) -> usize {
        self.command.pop(buf)
    }

    /// Pop buffered outbound bytes toward the link
    pub fn drain_air_out(&self, buf: &mut [u8]) -> usize {
        self.air_out.pop(buf)
    }
}
