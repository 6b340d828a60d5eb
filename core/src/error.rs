use thiserror::Error;

/// Skillport error types
#[derive(Error, Debug)]
pub enum SkillportError {
    /// Malformed SKILL.md front-matter
    #[error("Invalid front-matter: {0}")]
    Parse(String),

    /// A metadata field violated a validation rule
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while writing or reading an archive stream
    #[error("Archive error: {0}")]
    Archive(String),

    /// An archive entry resolved outside the extraction root.
    /// Always fatal; extraction is aborted on the first occurrence.
    #[error("Entry path escapes extraction root: {path}")]
    Traversal { path: String },

    /// Image assembly failure
    #[error("Image build error: {0}")]
    Build(String),

    /// Malformed registry reference
    #[error("Invalid reference: {0}")]
    Reference(String),

    /// Container registry error, opaque to the core
    #[error("Registry error: {registry} - {message}")]
    Registry { registry: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for SkillportError {
    fn from(err: serde_json::Error) -> Self {
        SkillportError::Serialization(err.to_string())
    }
}

/// Result type alias for skillport operations
pub type Result<T> = std::result::Result<T, SkillportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = SkillportError::Validation {
            field: "name",
            message: "must not be empty".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid name: must not be empty");
    }

    #[test]
    fn test_traversal_error_display() {
        let error = SkillportError::Traversal {
            path: "../../etc/passwd".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Entry path escapes extraction root: ../../etc/passwd"
        );
    }

    #[test]
    fn test_registry_error_display() {
        let error = SkillportError::Registry {
            registry: "ghcr.io".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Registry error: ghcr.io - connection refused"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: SkillportError = io_err.into();
        assert!(matches!(error, SkillportError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let error: SkillportError = json_err.into();
        assert!(matches!(error, SkillportError::Serialization(_)));
    }
}
