use std::io;

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::config::{SYSLOG_FACILITY, SYSLOG_IDENTIFIER};

/// The daemon's connection to the system journal.
///
/// Events are delivered while the channel is open; dropping it (or calling
/// [`LogChannel::close`]) releases it.
pub struct LogChannel {
    _guard: DefaultGuard,
}

/// Journal layer tagged with the daemon's identity and the `LOG_DAEMON`
/// facility.
pub fn journald_layer() -> io::Result<tracing_journald::Layer> {
    Ok(tracing_journald::layer()?
        .with_syslog_identifier(SYSLOG_IDENTIFIER.to_string())
        .with_custom_fields([("SYSLOG_FACILITY", SYSLOG_FACILITY)]))
}

/// Open the log channel for the current thread.
///
/// Must run after daemonization, which closes every inherited descriptor.
/// Without a reachable journal the daemon keeps running and its events go
/// nowhere.
pub fn open() -> LogChannel {
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(journald_layer().ok());

    LogChannel {
        _guard: tracing::subscriber::set_default(subscriber),
    }
}

impl LogChannel {
    pub fn close(self) {}
}
