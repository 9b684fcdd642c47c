use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid security identifier: {value} {location}")]
    InvalidSid {
        value: String,
        location: ErrorLocation,
    },

    #[error("No last logon recorded for {identity} {location}")]
    MissingTimestamp {
        identity: String,
        location: ErrorLocation,
    },

    #[error("Invalid last logon timestamp: {value} {location}")]
    InvalidTimestamp {
        value: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_sid(value: impl Into<String>) -> Self {
        Self::InvalidSid {
            value: value.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_timestamp(identity: impl Into<String>) -> Self {
        Self::MissingTimestamp {
            identity: identity.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
