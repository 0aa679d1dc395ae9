//! Host side view of the mailbox shared between the MMC/FPGA and the host.
//!
//! The mailbox carries two single-byte registers that matter to host daemons:
//! - `FPGA_CTRL`: commands from the FPGA to the host, such as a shutdown request.
//! - `FPGA_STATUS`: host readiness reported back to the FPGA.
//!
//! Consumers program against [`Mailbox`]; [`EepromMailbox`] is the accessor
//! used on real boards.

pub mod eeprom;
mod error;

use std::path::PathBuf;

pub use eeprom::{EepromMailbox, MailboxLayout};
pub use error::TransportError;

const REQ_SHUTDOWN_BIT: u8 = 1 << 0;
const APP_STARTUP_FINISHED_BIT: u8 = 1 << 0;

/// A point-in-time read of the `FPGA_CTRL` register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub request_shutdown: bool,
    /// Remaining bits of the register, passed through untouched.
    pub reserved: u8,
}

impl ControlSnapshot {
    pub fn from_bits(bits: u8) -> Self {
        ControlSnapshot {
            request_shutdown: bits & REQ_SHUTDOWN_BIT != 0,
            reserved: bits & !REQ_SHUTDOWN_BIT,
        }
    }
}

/// Value written to the `FPGA_STATUS` register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusAnnouncement {
    pub app_startup_finished: bool,
}

impl StatusAnnouncement {
    /// The announcement a host daemon sends once it is up.
    pub fn startup_finished() -> Self {
        StatusAnnouncement {
            app_startup_finished: true,
        }
    }

    pub fn to_bits(&self) -> u8 {
        if self.app_startup_finished {
            APP_STARTUP_FINISHED_BIT
        } else {
            0
        }
    }
}

/// Capabilities a mailbox transport offers to host daemons.
///
/// All operations are synchronous and blocking.
pub trait Mailbox {
    /// Find the transport, returning where it lives.
    fn locate(&mut self) -> Option<PathBuf>;

    /// Check the identifying marker of the located transport.
    fn verify(&mut self) -> bool;

    fn read_control(&mut self) -> Result<ControlSnapshot, TransportError>;

    fn write_status(&mut self, status: &StatusAnnouncement) -> Result<(), TransportError>;
}
