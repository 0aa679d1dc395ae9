//! Bridge between asynchronous signal delivery and the synchronous control loop.
//!
//! SIGTERM flips a single atomic flag which the loop polls once per cycle.
//! The handler does nothing else: no I/O, no locking, no logging.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::libc::c_int;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

static TERMINATE: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigterm(_signum: c_int) {
    TERMINATE.store(true, Ordering::SeqCst);
}

/// Ignore SIGCHLD and SIGHUP, route SIGTERM to the termination flag.
pub fn install_dispositions() -> nix::Result<()> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    let terminate = SigAction::new(
        SigHandler::Handler(handle_sigterm),
        SaFlags::empty(),
        SigSet::empty(),
    );

    // SAFETY: the installed handler only performs an atomic store.
    unsafe {
        sigaction(Signal::SIGCHLD, &ignore)?;
        sigaction(Signal::SIGHUP, &ignore)?;
        sigaction(Signal::SIGTERM, &terminate)?;
    }
    Ok(())
}

/// Read side of a termination flag.
#[derive(Debug, Clone, Copy)]
pub struct TerminationFlag(&'static AtomicBool);

impl TerminationFlag {
    /// The flag written by the SIGTERM handler.
    pub fn global() -> Self {
        TerminationFlag(&TERMINATE)
    }

    pub fn new(flag: &'static AtomicBool) -> Self {
        TerminationFlag(flag)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}
