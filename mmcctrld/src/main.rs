use libmailbox::EepromMailbox;
use mmcctrld::{DaemonError, ShutdownCommand, Supervisor, TerminationFlag, daemonize, logging};

fn main() -> Result<(), anyhow::Error> {
    daemonize::require_superuser()?;
    daemonize::daemonize().map_err(DaemonError::from)?;

    let log = logging::open();
    let mut supervisor = Supervisor::new(
        EepromMailbox::new(),
        ShutdownCommand::default(),
        TerminationFlag::global(),
    );
    // Failures have already been logged; a daemon that ran always exits cleanly.
    supervisor.run();
    log.close();
    Ok(())
}
