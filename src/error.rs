use super::{exception::Exception, kind::ExceptionType};
use core::num::ParseIntError;
use core::panic::Location;
use thiserror::Error;

/// An invalid unhandled-exception configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown fatal action `{0}`, expected `exit` or `abort`")]
    UnknownAction(String),

    #[error("invalid exit code `{value}`")]
    InvalidExitCode {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("the exit code for unhandled exceptions must be non-zero")]
    ZeroExitCode,

    #[error("invalid value `{value}` for {variable}, expected 0, 1, true or false")]
    InvalidFlag {
        variable: &'static str,
        value: String,
    },

    #[error("the unhandled-exception configuration is already in use")]
    AlreadyInitialized,
}

impl From<ConfigError> for Exception {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::AlreadyInitialized => ExceptionType::InvalidOperation,
            ConfigError::UnknownAction(_)
            | ConfigError::InvalidExitCode { .. }
            | ConfigError::ZeroExitCode
            | ConfigError::InvalidFlag { .. } => ExceptionType::Argument,
        };
        let location = Location::caller();
        Exception::at(kind, err.to_string(), location.file(), location.line())
    }
}
