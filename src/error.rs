use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-manager operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A file in a rewrite batch could not be written. The batch stopped at
    /// `failed`; `written` were flushed before it and `pending` were never attempted.
    #[error("Failed to write '{}' ({} written, {} not attempted): {source}", .failed.display(), .written.len(), .pending.len())]
    BatchWrite {
        failed: PathBuf,
        written: Vec<PathBuf>,
        pending: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results in release-manager
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseError::Tag(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("tool_name must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: tool_name must not be empty"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::version("x"), "Version parsing error"),
            (ReleaseError::tag("x"), "Tag error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_batch_write_reports_progress() {
        let err = ReleaseError::BatchWrite {
            failed: PathBuf::from("b.go"),
            written: vec![PathBuf::from("a.go")],
            pending: vec![PathBuf::from("c.go"), PathBuf::from("d.go")],
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };

        let msg = err.to_string();
        assert!(msg.contains("b.go"));
        assert!(msg.contains("1 written"));
        assert!(msg.contains("2 not attempted"));
        assert!(msg.contains("read-only"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: ReleaseError = toml_err.into();
        assert!(err.to_string().starts_with("Invalid configuration file"));
    }
}
