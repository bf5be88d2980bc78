//! Error types for yaml2jmxtrans
//!
//! This module defines the error types used throughout the application.
//! Every error is fatal to a run; nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Alias/URL template rendering errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// A `$` that does not start `$$`, `$name` or `${name}`
    #[error("Invalid placeholder in template '{template}' at position {position}")]
    InvalidPlaceholder { template: String, position: usize },

    /// A well-formed placeholder whose name is not one of the known ones
    #[error("Unknown placeholder '{name}' in template '{template}'")]
    UnknownPlaceholder { template: String, name: String },
}

/// Errors raised while turning host sets into jmxtrans documents
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A host set references a query that was never defined
    #[error("Undefined query '{0}'")]
    UnknownQuery(String),

    /// A host set name that is not registered
    #[error("Undefined host set '{0}'")]
    UnknownSet(String),

    /// Alias or URL template could not be rendered
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Output document could not be serialized
    #[error("Failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Output file could not be written
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure while generating a specific host set
    #[error("Failed to generate host set '{set}': {source}")]
    HostSet {
        set: String,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    /// Attach the host set name to an error raised while generating it
    pub fn in_set(self, set: impl Into<String>) -> Self {
        match self {
            already @ GenerateError::HostSet { .. } => already,
            other => GenerateError::HostSet {
                set: set.into(),
                source: Box::new(other),
            },
        }
    }
}

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Input document error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Generation error
    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_set_wraps_once() {
        let err = GenerateError::UnknownQuery("heap".to_string())
            .in_set("prod")
            .in_set("other");

        match &err {
            GenerateError::HostSet { set, source } => {
                assert_eq!(set, "prod");
                assert!(matches!(**source, GenerateError::UnknownQuery(ref q) if q == "heap"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Failed to generate host set 'prod': Undefined query 'heap'"
        );
    }

    #[test]
    fn test_app_error_keeps_message() {
        let err: AppError = GenerateError::UnknownSet("qa".to_string()).into();
        assert!(matches!(err, AppError::Generate(GenerateError::UnknownSet(_))));
        assert!(err.to_string().starts_with("Generation error: "));
        assert!(err.to_string().contains("qa"));
    }

    #[test]
    fn test_template_error_display() {
        let err = TemplateError::UnknownPlaceholder {
            template: "${port}".to_string(),
            name: "port".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown placeholder 'port' in template '${port}'"
        );
    }
}
