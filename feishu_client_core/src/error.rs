//! Error types for the Feishu client core library
//!
//! Errors are grouped by the boundary they come from so callers can map
//! them onto the taxonomy both tools report: configuration problems,
//! remote API failures and local file I/O.

use thiserror::Error;

pub mod io;
pub mod protocol;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::protocol::ProtocolError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Feishu client core library
///
/// - I/O errors: reading or writing the roster file
/// - Protocol errors: HTTP transport and platform API rejections
/// - Validation errors: missing inputs, credentials or bad configuration
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Remote API related errors
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Whether the error was raised before any network call was attempted
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(IoError::malformed(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Protocol(ProtocolError::malformed_response(err.to_string()))
        } else {
            Self::Protocol(ProtocolError::transport(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::path::Path;

    #[test]
    fn test_file_not_found_error_creation() {
        let path = Path::new("/var/lib/duty/schedule.json");
        let missing = std::io::Error::from(std::io::ErrorKind::NotFound);
        let error = Error::Io(IoError::from_std(missing).with_path(path));

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
                assert_eq!(io_err.path, Some(path.to_path_buf()));
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_api_error_display() {
        let error = Error::Protocol(ProtocolError::api(99991663, "app ticket invalid"));

        assert!(error.to_string().contains("99991663"));
        assert!(error.to_string().contains("app ticket invalid"));
        assert!(!error.is_validation());
    }

    #[test]
    fn test_missing_field_is_validation() {
        let error = Error::Validation(ValidationError::missing_field("app_id"));

        assert!(error.is_validation());
        assert!(error.to_string().contains("app_id"));
    }

    #[test]
    fn test_std_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: Error = io_error.into();

        match &error {
            Error::Io(io_err) => assert_eq!(io_err.kind, IoErrorKind::FileNotFound),
            _ => panic!("Expected Io error"),
        }
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: Error = parse_error.into();

        match error {
            Error::Io(io_err) => assert_eq!(io_err.kind, IoErrorKind::Malformed),
            _ => panic!("Expected Io error"),
        }
    }
}
