//! The control loop.
//!
//! ```text
//! Starting --locate/verify/announce--> Running --poll/dispatch--> Terminating --> Finished
//!     \______________________ any failure _________________________/
//! ```
//!
//! Each cycle reads `FPGA_CTRL`, dispatches a shutdown request if present,
//! checks the termination flag and sleeps for [`POLL_CADENCE`]. Nothing is
//! retried: a failure ends the run and is only reported through the log.

use std::thread;
use std::time::Duration;

use libmailbox::{ControlSnapshot, Mailbox, StatusAnnouncement};
use tracing::{error, info};

use crate::config::POLL_CADENCE;
use crate::error::DaemonError;
use crate::power::PowerControl;
use crate::signal::TerminationFlag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DaemonState {
    Starting,
    Running,
    Terminating,
    Finished,
}

/// Why the control loop stopped.
#[derive(Debug)]
pub enum Exit {
    /// The termination flag was raised.
    Signalled,
    Failed(DaemonError),
}

pub struct Supervisor<M, P> {
    mailbox: M,
    power: P,
    terminate: TerminationFlag,
    cadence: Duration,
    state: DaemonState,
}

impl<M: Mailbox, P: PowerControl> Supervisor<M, P> {
    pub fn new(mailbox: M, power: P, terminate: TerminationFlag) -> Self {
        Supervisor {
            mailbox,
            power,
            terminate,
            cadence: POLL_CADENCE,
            state: DaemonState::Starting,
        }
    }

    pub fn state(&self) -> DaemonState {
        self.state
    }

    /// Drive the daemon from `Starting` to `Finished`.
    ///
    /// Does not return when a shutdown request was dispatched successfully.
    pub fn run(&mut self) -> Exit {
        let exit = match self.start().and_then(|()| self.poll()) {
            Ok(()) => Exit::Signalled,
            Err(e) => {
                error!("{e}");
                Exit::Failed(e)
            }
        };

        self.advance(DaemonState::Terminating);
        info!("Terminated");
        self.advance(DaemonState::Finished);
        exit
    }

    fn advance(&mut self, next: DaemonState) {
        debug_assert!(
            next > self.state,
            "daemon state moved from {:?} to {next:?}",
            self.state
        );
        self.state = next;
    }

    fn start(&mut self) -> Result<(), DaemonError> {
        let path = self
            .mailbox
            .locate()
            .ok_or(DaemonError::MailboxUnavailable)?;
        info!("Opened mailbox at {}", path.display());

        if !self.mailbox.verify() {
            return Err(DaemonError::MailboxInvalid);
        }

        self.mailbox
            .write_status(&StatusAnnouncement::startup_finished())
            .map_err(DaemonError::MailboxWrite)?;

        self.advance(DaemonState::Running);
        info!("Started");
        Ok(())
    }

    fn poll(&mut self) -> Result<(), DaemonError> {
        loop {
            let ctrl = self
                .mailbox
                .read_control()
                .map_err(DaemonError::Transport)?;
            self.dispatch(&ctrl)?;

            // Checked after dispatch so a request seen this cycle is acted on.
            if self.terminate.is_raised() {
                return Ok(());
            }
            thread::sleep(self.cadence);
        }
    }

    fn dispatch(&mut self, ctrl: &ControlSnapshot) -> Result<(), DaemonError> {
        if !ctrl.request_shutdown {
            return Ok(());
        }
        info!("Shutdown requested by MMC");

        let Err(e) = self.power.halt();
        Err(DaemonError::ShutdownDispatch(e))
    }
}
