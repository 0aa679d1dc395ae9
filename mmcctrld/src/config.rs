use std::ffi::CStr;
use std::time::Duration;

/// Identity attached to every entry sent to the system journal.
pub static SYSLOG_IDENTIFIER: &str = "mmcctrld";

/// syslog(3) facility code of `LOG_DAEMON`.
pub static SYSLOG_FACILITY: &str = "3";

// Poll the FPGA control register 4 times per second.
pub const POLL_CADENCE: Duration = Duration::from_millis(250);

pub static SHUTDOWN_COMMAND: &CStr = c"/sbin/shutdown";
pub static SHUTDOWN_ARGV: [&CStr; 3] = [c"shutdown", c"-h", c"now"];

pub static DEV_NULL: &str = "/dev/null";

/// Descriptor limit used when `_SC_OPEN_MAX` is indeterminate.
pub const FALLBACK_OPEN_MAX: i32 = 1024;
