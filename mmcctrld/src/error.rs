use std::io;

use libmailbox::TransportError;
use nix::errno::Errno;
use thiserror::Error;

/// Failures while turning the foreground process into a daemon.
///
/// Every variant names the startup stage it came from.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("detach: fork failed: {0}")]
    Detach(#[source] Errno),

    #[error("lead session: {op} failed: {source}")]
    LeadSession {
        op: &'static str,
        #[source]
        source: Errno,
    },

    #[error("finalize: {op} failed: {source}")]
    Finalize {
        op: &'static str,
        #[source]
        source: Errno,
    },
}

/// Everything that ends a daemon run.
///
/// The display strings double as the messages written to the system log.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("mmcctrld needs to be launched with root privileges")]
    Privilege,

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("Could not open mailbox")]
    MailboxUnavailable,

    #[error("Mailbox not available")]
    MailboxInvalid,

    #[error("Could not set FPGA status: {0}")]
    MailboxWrite(#[source] TransportError),

    #[error("Could not read FPGA_CTRL: {0}")]
    Transport(#[source] TransportError),

    #[error("Could not execute shutdown command: {0}")]
    ShutdownDispatch(#[source] io::Error),
}
