//! Error types for rustible-utils.
//!
//! This module defines the error type shared by the path flattening core, the
//! path resolver and the template engine. Lookup plugins wrap it in
//! [`LookupError`](crate::plugins::lookup::LookupError).

use thiserror::Error;

/// Result type alias for rustible-utils operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for rustible-utils.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// An argument had the wrong type or an unusable value.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Argument name
        name: String,
        /// Error message
        message: String,
    },

    /// The value is not a mapping, sequence or scalar.
    #[error("Unsupported value type: {0}")]
    UnsupportedType(String),

    // ========================================================================
    // Path Errors
    // ========================================================================
    /// A path expression could not be parsed.
    #[error("Invalid path expression '{path}' at offset {offset}: {message}")]
    InvalidPath {
        /// The path expression as given
        path: String,
        /// Byte offset where parsing failed
        offset: usize,
        /// Error message
        message: String,
    },

    /// A path expression did not resolve against the value.
    #[error("Path '{path}' not found: nothing at '{segment}'")]
    PathNotFound {
        /// The full path expression
        path: String,
        /// The rendered prefix up to and including the failing segment
        segment: String,
    },

    // ========================================================================
    // Template Errors
    // ========================================================================
    /// Template rendering error.
    #[error("Template rendering failed for '{template}': {message}")]
    TemplateRender {
        /// Template name or source
        template: String,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON conversion error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a new invalid path error.
    pub fn invalid_path(path: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            offset,
            message: message.into(),
        }
    }

    /// Creates a new path not found error.
    pub fn path_not_found(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::PathNotFound {
            path: path.into(),
            segment: segment.into(),
        }
    }

    /// Creates a new template render error.
    pub fn template_render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateRender {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the caller's arguments rather than
    /// by the data being processed.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument { .. } | Error::InvalidPath { .. }
        )
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument { .. } | Error::InvalidPath { .. } => 2,
            Error::PathNotFound { .. } => 3,
            Error::UnsupportedType(_) | Error::Json(_) => 4,
            Error::TemplateRender { .. } => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = Error::invalid_path("a[", 2, "unterminated bracket");
        assert_eq!(
            err.to_string(),
            "Invalid path expression 'a[' at offset 2: unterminated bracket"
        );
        assert!(err.is_argument_error());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_path_not_found_display() {
        let err = Error::path_not_found("a.b.c", "a.b");
        assert_eq!(err.to_string(), "Path 'a.b.c' not found: nothing at 'a.b'");
        assert!(!err.is_argument_error());
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("prepend", "must be a string");
        assert_eq!(err.to_string(), "Invalid argument 'prepend': must be a string");
    }
}
