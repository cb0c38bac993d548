//! I/O related error types

use std::path::PathBuf;
use thiserror::Error;

/// I/O error with additional context
#[derive(Error, Debug)]
#[error("{}", format_io_error(self))]
pub struct IoError {
    /// The kind of I/O error
    pub kind: IoErrorKind,
    /// Path associated with the error (if any)
    pub path: Option<PathBuf>,
    /// Underlying error (if any)
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Kind of I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoErrorKind {
    /// File not found
    FileNotFound,
    /// Permission denied
    PermissionDenied,
    /// File exists but its content could not be decoded
    Malformed,
    /// Generic I/O error
    Other,
}

impl IoError {
    /// Create an error for content that failed to decode
    pub fn malformed(source: serde_json::Error) -> Self {
        Self {
            kind: IoErrorKind::Malformed,
            path: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error from a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            path: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the path the failing operation touched
    pub fn with_path(mut self, path: &std::path::Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn format_io_error(error: &IoError) -> String {
    match (&error.kind, &error.path) {
        (IoErrorKind::FileNotFound, Some(path)) => {
            format!("File not found: {}", path.display())
        }
        (IoErrorKind::FileNotFound, None) => "File not found".to_string(),
        (IoErrorKind::PermissionDenied, Some(path)) => {
            format!("Permission denied for file: {}", path.display())
        }
        (IoErrorKind::PermissionDenied, None) => "Permission denied".to_string(),
        (IoErrorKind::Malformed, path) => {
            let location = path
                .as_ref()
                .map(|p| format!(" in {}", p.display()))
                .unwrap_or_default();
            match &error.source {
                Some(source) => format!("Malformed content{location}: {source}"),
                None => format!("Malformed content{location}"),
            }
        }
        (IoErrorKind::Other, path) => {
            let location = path
                .as_ref()
                .map(|p| format!(" on {}", p.display()))
                .unwrap_or_default();
            match &error.source {
                Some(source) => format!("I/O error{location}: {source}"),
                None => format!("I/O error{location}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_not_found_error() {
        let path = std::path::Path::new("/test/schedule.json");
        let error = IoError::from_std(io::Error::from(io::ErrorKind::NotFound)).with_path(path);

        assert_eq!(error.kind, IoErrorKind::FileNotFound);
        assert_eq!(error.path, Some(path.to_path_buf()));
        assert!(error.to_string().contains("File not found"));
        assert!(error.to_string().contains("/test/schedule.json"));
    }

    #[test]
    fn test_permission_denied_error() {
        let path = std::path::Path::new("/root/schedule.json");
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = IoError::from_std(io_error).with_path(path);

        assert_eq!(error.kind, IoErrorKind::PermissionDenied);
        assert!(error.source.is_some());
        assert!(error.to_string().contains("Permission denied"));
        assert!(error.to_string().contains("/root/schedule.json"));
    }

    #[test]
    fn test_malformed_with_path() {
        let parse_error = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let path = std::path::Path::new("/data/schedule.json");
        let error = IoError::malformed(parse_error).with_path(path);

        assert_eq!(error.kind, IoErrorKind::Malformed);
        assert!(error.to_string().starts_with("Malformed content in /data/schedule.json"));
    }

    #[test]
    fn test_with_path() {
        let io_error = io::Error::other("disk full");
        let path = std::path::Path::new("/test.json");
        let error = IoError::from_std(io_error).with_path(path);

        assert_eq!(error.kind, IoErrorKind::Other);
        assert_eq!(error.path, Some(path.to_path_buf()));
        assert!(error.to_string().contains("disk full"));
    }
}
