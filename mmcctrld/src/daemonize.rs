//! Classic double-fork daemonization, split into three stages.
//!
//! ```ignore
//! require_superuser()?;
//! detach()?;        // fork, parent exits
//! lead_session()?;  // setsid, signal dispositions
//! finalize()?;      // fork again, umask, chdir, descriptors
//! ```
//!
//! The launching process exits before `lead_session` returns; only the
//! grandchild comes back from `finalize`.

use std::os::fd::RawFd;
use std::process;

use nix::errno::Errno;
use nix::fcntl::{OFlag, open};
use nix::sys::stat::{Mode, umask};
use nix::unistd::{ForkResult, SysconfVar, chdir, close, dup2, fork, geteuid, setsid, sysconf};

use crate::config::{DEV_NULL, FALLBACK_OPEN_MAX};
use crate::error::{DaemonError, ProcessError};
use crate::signal;

pub fn require_superuser() -> Result<(), DaemonError> {
    if geteuid().is_root() {
        Ok(())
    } else {
        Err(DaemonError::Privilege)
    }
}

pub fn daemonize() -> Result<(), ProcessError> {
    detach()?;
    lead_session()?;
    finalize()
}

/// Fork and let the parent exit, detaching from the launching shell.
pub fn detach() -> Result<(), ProcessError> {
    fork_and_exit_parent().map_err(ProcessError::Detach)
}

/// Become session leader without a controlling terminal and set the signal
/// dispositions the daemon runs with.
pub fn lead_session() -> Result<(), ProcessError> {
    setsid().map_err(|source| ProcessError::LeadSession {
        op: "setsid",
        source,
    })?;
    signal::install_dispositions().map_err(|source| ProcessError::LeadSession {
        op: "sigaction",
        source,
    })
}

/// Give up session leadership so no terminal can be reacquired, then cut the
/// remaining ties to the launching environment.
pub fn finalize() -> Result<(), ProcessError> {
    let finalize_err =
        |op: &'static str| move |source: Errno| ProcessError::Finalize { op, source };

    fork_and_exit_parent().map_err(finalize_err("fork"))?;
    reset_file_mask();
    chdir("/").map_err(finalize_err("chdir"))?;
    close_inherited_descriptors();
    redirect_stdio().map_err(finalize_err("redirect stdio"))
}

fn fork_and_exit_parent() -> Result<(), Errno> {
    // SAFETY: called while the process is still single threaded.
    match unsafe { fork() }? {
        ForkResult::Parent { .. } => process::exit(0),
        ForkResult::Child => Ok(()),
    }
}

/// Clear the file mode creation mask, returning the previous one.
pub fn reset_file_mask() -> Mode {
    umask(Mode::empty())
}

/// Highest descriptor number the process may have open.
pub fn open_file_limit() -> RawFd {
    match sysconf(SysconfVar::OPEN_MAX) {
        Ok(Some(limit)) => RawFd::try_from(limit).unwrap_or(RawFd::MAX),
        _ => FALLBACK_OPEN_MAX,
    }
}

fn close_inherited_descriptors() {
    for fd in (0..=open_file_limit()).rev() {
        // Most slots are not open; EBADF is expected.
        let _ = close(fd);
    }
}

/// Point stdin, stdout and stderr at `/dev/null`.
fn redirect_stdio() -> nix::Result<()> {
    let null = open(DEV_NULL, OFlag::O_RDWR, Mode::empty())?;
    for target in 0..=2 {
        if null != target {
            dup2(null, target)?;
        }
    }
    if null > 2 {
        close(null)?;
    }
    Ok(())
}
