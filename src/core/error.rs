//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitCliError`], the error type for failures that are
//! internal to gitcli itself: unreadable input, configuration and hook record
//! files that cannot be read or written, hook scripts that cannot be
//! installed. Failures of `git` itself are not errors in this sense: they are
//! reported to the user by the handler that ran the command and the handler
//! returns normally.
//!
//! # Public API
//! - [`GitCliError`]: Main error enum covering all internal failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitCliError>`

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for gitcli
#[derive(Error, Debug)]
pub enum GitCliError {
    // Repository errors
    #[error("Not a git repository")]
    NotInGitRepo,

    #[error("Git hooks directory not found")]
    HooksDirNotFound,

    // Input errors
    #[error("Input stream closed")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Persisted state errors
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize settings: {source}")]
    SerializationFailed { source: serde_json::Error },

    // Hook errors
    #[error("Unknown hook type: {hook_type}")]
    UnknownHookType { hook_type: String },

    #[error("Unknown template '{template}' for hook {hook_type}")]
    UnknownTemplate { hook_type: String, template: String },

    #[error("Failed to install hook '{path}': {source}")]
    HookInstallFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Line editor errors
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Convenience type alias for Results using GitCliError
pub type Result<T> = std::result::Result<T, GitCliError>;

impl GitCliError {
    /// Create a read failed error
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a write failed error
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a parse failed error
    pub fn parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization failed error
    pub fn serialization_failed(source: serde_json::Error) -> Self {
        Self::SerializationFailed { source }
    }

    /// Create an unknown hook type error
    pub fn unknown_hook_type(hook_type: impl Into<String>) -> Self {
        Self::UnknownHookType {
            hook_type: hook_type.into(),
        }
    }

    /// Create an unknown template error
    pub fn unknown_template(hook_type: impl Into<String>, template: impl Into<String>) -> Self {
        Self::UnknownTemplate {
            hook_type: hook_type.into(),
            template: template.into(),
        }
    }

    /// Create a hook install failed error
    pub fn hook_install_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::HookInstallFailed {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitCliError::NotInGitRepo;
        assert_eq!(err.to_string(), "Not a git repository");
    }

    #[test]
    fn test_write_failed_error() {
        let path = PathBuf::from("/test/.gitcli-config.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = GitCliError::write_failed(&path, io_err);
        assert!(err.to_string().contains("/test/.gitcli-config.json"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_parse_failed_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = GitCliError::parse_failed("/test/.gitcli-hooks.json", json_err);
        assert!(err.to_string().contains("/test/.gitcli-hooks.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_unknown_template_error() {
        let err = GitCliError::unknown_template("pre-commit", "nope");
        assert_eq!(
            err.to_string(),
            "Unknown template 'nope' for hook pre-commit"
        );
    }
}
