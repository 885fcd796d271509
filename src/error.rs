use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid command line input.
    #[error("{0}")]
    Argument(String),

    #[error("{context}: {source}")]
    Filesystem {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Configured owner names could not be turned into numeric ids.
    #[error("Could not resolve ownership: {0}")]
    OwnershipResolution(String),

    #[error("Language model call failed: {0}")]
    ModelInvocation(String),

    /// The model answered with something that is not one of the candidates.
    #[error("Path returned by the model is not a candidate: {0}")]
    ModelOutputMismatch(String),

    #[error("Destination path {} does not exist. Please check your candidate directories.", .0.display())]
    DestinationMissing(PathBuf),
}

impl Error {
    pub fn fs(context: impl Into<String>, source: io::Error) -> Self {
        Error::Filesystem {
            context: context.into(),
            source,
        }
    }
}

/// Attach a human readable context to an `io::Result`, turning it into a
/// `Error::Filesystem`.
pub trait FsContext<T> {
    fn fs_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> FsContext<T> for io::Result<T> {
    fn fs_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| Error::fs(f(), e))
    }
}
