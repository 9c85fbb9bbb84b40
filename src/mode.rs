//! Device role and runtime mode
//!
//! The role is fixed for the life of the firmware. The mode only matters for
//! the master role and is owned by the configuration code; the routers take a
//! [`Personality`] snapshot once per call.

use core::sync::atomic::{AtomicU8, Ordering};

/// Device personality selected at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Bridges the UART to the inter-device protocol, AT commands or raw data
    Master,
    /// Every received byte is handled by the command consumer
    SlaveOnly,
}

impl Role {
    /// Role selected by the `slave-only` cargo feature
    pub const fn from_build() -> Self {
        if cfg!(feature = "slave-only") {
            Role::SlaveOnly
        } else {
            Role::Master
        }
    }
}

/// Runtime mode of a master device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    /// Passthrough to the inter-processor framing protocol
    Mcu = 0,
    /// Raw data
    Data = 1,
    /// AT command line
    Command = 2,
}

impl Mode {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Mode::Mcu,
            1 => Mode::Data,
            _ => Mode::Command,
        }
    }
}

/// Role plus the mode it was observed in.
///
/// The mode only exists for the master variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    /// Master build, routing by the current mode
    Master(Mode),
    /// Slave-only build, every byte goes to the command channel
    SlaveOnly,
}

/// Mode storage shared between the configuration code, tasks and the UART
/// interrupt.
pub struct ModeCell {
    raw: AtomicU8,
}

impl ModeCell {
    /// Create a cell holding `mode`
    pub const fn new(mode: Mode) -> Self {
        Self {
            raw: AtomicU8::new(mode as u8),
        }
    }

    /// Current mode
    pub fn get(&self) -> Mode {
        Mode::from_u8(self.raw.load(Ordering::Acquire))
    }

    /// Switch mode. Only the configuration code calls this.
    pub fn set(&self, mode: Mode) {
        let previous = Mode::from_u8(self.raw.swap(mode as u8, Ordering::AcqRel));
        if previous != mode {
            log::info!("CMI mode {:?} -> {:?}", previous, mode);
        }
    }

    /// Snapshot the personality for one router call
    pub fn personality(&self, role: Role) -> Personality {
        match role {
            Role::Master => Personality::Master(self.get()),
            Role::SlaveOnly => Personality::SlaveOnly,
        }
    }
}

impl Default for ModeCell {
    fn default() -> Self {
        Self::new(Mode::Command)
    }
}
