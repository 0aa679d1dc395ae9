use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("mailbox has not been located")]
    NotLocated,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TransportError::Io {
            path: path.into(),
            source,
        }
    }
}
