use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure reported by an OS capability.
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("{operation} is not supported on this platform {location}")]
    Unsupported {
        operation: &'static str,
        location: ErrorLocation,
    },

    #[error("{operation} failed with OS error {code} {location}")]
    Os {
        operation: String,
        code: u32,
        location: ErrorLocation,
    },

    #[error("{operation} failed: {message} {location}")]
    Command {
        operation: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error during {operation}: {source} {location}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Unexpected data from {operation}: {message} {location}")]
    InvalidData {
        operation: String,
        message: String,
        location: ErrorLocation,
    },
}

impl SystemError {
    #[track_caller]
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported {
            operation,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn os(operation: impl Into<String>, code: u32) -> Self {
        Self::Os {
            operation: operation.into(),
            code,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn command(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            operation: operation.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_data(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            operation: operation.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, SystemError>;
