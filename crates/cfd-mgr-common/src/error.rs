//! Error types shared across the cloudflared manager crates.
//!
//! All errors implement `std::error::Error` via `thiserror`.

use std::io;
use thiserror::Error;

/// Result type alias for manager operations.
pub type CfdResult<T> = Result<T, CfdError>;

/// Errors that can occur while driving the external daemon.
#[derive(Debug, Error)]
pub enum CfdError {
    /// Failed to spawn an external command.
    #[error("Failed to execute command '{command}': {source}")]
    Spawn {
        /// The command that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// External command returned a non-zero exit code.
    #[error("Command failed: '{command}' (exit code {exit_code}): {output}")]
    CommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// Configuration rendering failed.
    #[error("Config render failed: {message}")]
    Render {
        /// Error message.
        message: String,
    },

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl CfdError {
    /// Creates a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = CfdError::CommandFailed {
            command: "configctl cloudflared status".to_string(),
            exit_code: 2,
            output: "service not found".to_string(),
        };
        assert!(err.to_string().contains("configctl cloudflared status"));
        assert!(err.to_string().contains("exit code 2"));
    }

    #[test]
    fn test_render_error() {
        let err = CfdError::render("unserializable ingress entry");
        assert_eq!(
            err.to_string(),
            "Config render failed: unserializable ingress entry"
        );
    }
}
