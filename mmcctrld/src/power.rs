use std::convert::Infallible;
use std::ffi::{CStr, CString};
use std::io;

use nix::unistd::execv;

use crate::config::{SHUTDOWN_ARGV, SHUTDOWN_COMMAND};

/// Something that can take the host down.
pub trait PowerControl {
    /// Hand the host over to the shutdown mechanism.
    ///
    /// On success the calling process image is gone, so this only ever returns
    /// the reason the mechanism could not be launched.
    fn halt(&mut self) -> io::Result<Infallible>;
}

/// Replaces the daemon with the system shutdown command.
#[derive(Debug, Clone)]
pub struct ShutdownCommand {
    path: CString,
    argv: Vec<CString>,
}

impl Default for ShutdownCommand {
    fn default() -> Self {
        ShutdownCommand::new(SHUTDOWN_COMMAND, &SHUTDOWN_ARGV)
    }
}

impl ShutdownCommand {
    pub fn new(path: &CStr, argv: &[&CStr]) -> Self {
        ShutdownCommand {
            path: path.to_owned(),
            argv: argv.iter().map(|arg| (*arg).to_owned()).collect(),
        }
    }
}

impl PowerControl for ShutdownCommand {
    fn halt(&mut self) -> io::Result<Infallible> {
        execv(&self.path, &self.argv).map_err(io::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let command = ShutdownCommand::default();
        assert_eq!(command.path.as_c_str(), c"/sbin/shutdown");
        assert_eq!(
            command.argv,
            vec![c"shutdown".to_owned(), c"-h".to_owned(), c"now".to_owned()]
        );
    }

    #[test]
    fn test_missing_executable_returns() {
        let mut command =
            ShutdownCommand::new(c"/nonexistent/mmcctrld/shutdown", &[c"shutdown"]);
        let Err(e) = command.halt();
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
    }
}
