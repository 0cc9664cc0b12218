//! Unified error type.

use std::fmt;

/// The error type returned by plait's fallible operations.
///
/// Handlers never produce an `Error`: the composition core has no failure
/// modes of its own. This type surfaces wiring mistakes caught while the
/// handler graph is assembled, and infrastructure failures of the transport
/// adapter (binding to a port or accepting a connection).
#[derive(Debug)]
pub enum Error {
    /// The same path was registered twice on one router.
    DuplicateRoute(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoute(path) => write!(f, "route `{path}` is already registered"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DuplicateRoute(_) => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
