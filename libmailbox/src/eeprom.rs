//! EEPROM backed mailbox.
//!
//! The MMC exposes the mailbox as a small EEPROM on the payload I2C bus, which
//! the kernel publishes as a sysfs file. Registers are single bytes at fixed
//! offsets, accessed with positional reads and writes.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ControlSnapshot, Mailbox, StatusAnnouncement, TransportError};

/// Locations the mailbox EEPROM is published at, tried in order.
pub const DEFAULT_EEPROM_PATHS: &[&str] = &[
    "/sys/bus/nvmem/devices/mmcmb0/nvmem",
    "/sys/bus/i2c/devices/0-002a/eeprom",
];

/// Byte offsets of the mailbox fields inside the EEPROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxLayout {
    pub magic: &'static [u8],
    pub magic_offset: u64,
    pub fpga_status_offset: u64,
    pub fpga_ctrl_offset: u64,
}

impl MailboxLayout {
    pub const DEFAULT: MailboxLayout = MailboxLayout {
        magic: b"MMCM",
        magic_offset: 0,
        fpga_status_offset: 0x40,
        fpga_ctrl_offset: 0x41,
    };
}

impl Default for MailboxLayout {
    fn default() -> Self {
        MailboxLayout::DEFAULT
    }
}

struct Device {
    path: PathBuf,
    file: File,
}

pub struct EepromMailbox {
    candidates: Vec<PathBuf>,
    layout: MailboxLayout,
    device: Option<Device>,
}

impl Default for EepromMailbox {
    fn default() -> Self {
        EepromMailbox::with_candidates(DEFAULT_EEPROM_PATHS)
    }
}

impl EepromMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        EepromMailbox {
            candidates: candidates
                .into_iter()
                .map(|p| p.as_ref().to_path_buf())
                .collect(),
            layout: MailboxLayout::DEFAULT,
            device: None,
        }
    }

    pub fn with_layout(mut self, layout: MailboxLayout) -> Self {
        self.layout = layout;
        self
    }

    fn device(&self) -> Result<&Device, TransportError> {
        self.device.as_ref().ok_or(TransportError::NotLocated)
    }

    fn read_byte(&self, offset: u64) -> Result<u8, TransportError> {
        let device = self.device()?;
        let mut buf = [0u8; 1];
        device
            .file
            .read_exact_at(&mut buf, offset)
            .map_err(|e| TransportError::io(&device.path, e))?;
        Ok(buf[0])
    }
}

impl Mailbox for EepromMailbox {
    fn locate(&mut self) -> Option<PathBuf> {
        for candidate in &self.candidates {
            match OpenOptions::new().read(true).write(true).open(candidate) {
                Ok(file) => {
                    self.device = Some(Device {
                        path: candidate.clone(),
                        file,
                    });
                    return Some(candidate.clone());
                }
                Err(e) => debug!("skipping mailbox candidate {}: {e}", candidate.display()),
            }
        }
        None
    }

    fn verify(&mut self) -> bool {
        let Ok(device) = self.device() else {
            return false;
        };
        let mut magic = vec![0u8; self.layout.magic.len()];
        match device.file.read_exact_at(&mut magic, self.layout.magic_offset) {
            Ok(()) => magic == self.layout.magic,
            Err(e) => {
                debug!("failed to read mailbox magic from {}: {e}", device.path.display());
                false
            }
        }
    }

    fn read_control(&mut self) -> Result<ControlSnapshot, TransportError> {
        self.read_byte(self.layout.fpga_ctrl_offset)
            .map(ControlSnapshot::from_bits)
    }

    fn write_status(&mut self, status: &StatusAnnouncement) -> Result<(), TransportError> {
        let device = self.device()?;
        device
            .file
            .write_all_at(&[status.to_bits()], self.layout.fpga_status_offset)
            .map_err(|e| TransportError::io(&device.path, e))
    }
}
