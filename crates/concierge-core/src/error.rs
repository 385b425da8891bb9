use thiserror::Error;

/// Top-level error type for the Concierge system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// ConciergeError` so that the `?` operator works seamlessly across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConciergeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Form error: {0}")]
    Form(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ConciergeError>;

impl From<toml::de::Error> for ConciergeError {
    fn from(err: toml::de::Error) -> Self {
        ConciergeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ConciergeError {
    fn from(err: toml::ser::Error) -> Self {
        ConciergeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ConciergeError {
    fn from(err: serde_json::Error) -> Self {
        ConciergeError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConciergeError::Config("missing section".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing section");

        let err = ConciergeError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");

        let err = ConciergeError::Session("bad key".to_string());
        assert_eq!(err.to_string(), "Session error: bad key");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ConciergeError = io.into();
        assert!(matches!(err, ConciergeError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ConciergeError = parse.into();
        assert!(matches!(err, ConciergeError::Serialization(_)));
    }

    #[test]
    fn test_from_toml_error() {
        let parse = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: ConciergeError = parse.into();
        assert!(matches!(err, ConciergeError::Config(_)));
    }
}
