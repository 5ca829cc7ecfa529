use thiserror::Error;

/// Unified error type for semver-gen operations
#[derive(Error, Debug)]
pub enum SemverGenError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-gen
pub type Result<T> = std::result::Result<T, SemverGenError>;

impl SemverGenError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverGenError::Config(msg.into())
    }

    /// Create a lookup error with context
    pub fn lookup(msg: impl Into<String>) -> Self {
        SemverGenError::Lookup(msg.into())
    }

    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        SemverGenError::Parse(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        SemverGenError::Remote(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SemverGenError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SemverGenError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(SemverGenError::parse("test")
            .to_string()
            .contains("Version parsing"));
        assert!(SemverGenError::lookup("test").to_string().contains("Lookup"));
        assert!(SemverGenError::remote("test").to_string().contains("Remote"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (SemverGenError::config("x"), "Configuration error"),
            (SemverGenError::lookup("x"), "Lookup failed"),
            (SemverGenError::parse("x"), "Version parsing error"),
            (SemverGenError::remote("x"), "Remote operation failed"),
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
}
