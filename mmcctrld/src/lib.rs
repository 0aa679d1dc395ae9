pub mod config;
pub mod daemonize;
mod error;
pub mod logging;
pub mod power;
pub mod signal;
pub mod supervisor;

// re-export selected public API
pub use error::{DaemonError, ProcessError};
pub use power::{PowerControl, ShutdownCommand};
pub use signal::TerminationFlag;
pub use supervisor::{DaemonState, Exit, Supervisor};
