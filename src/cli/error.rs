//! Structured errors for the demo binary.

use super::exit::ExitCode;
use crate::error::QueueError;
use std::fmt::{self, Write as _};

/// Error reported by the demo binary, carrying a semantic exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Machine-readable error identifier.
    pub error_type: String,
    /// Short human-readable title.
    pub title: String,
    /// Detailed explanation, possibly empty.
    pub detail: String,
    /// Suggested recovery action.
    pub suggestion: Option<String>,
    /// Extra key/value context, in insertion order.
    pub context: Vec<(String, String)>,
    /// Process exit code for this error.
    pub exit_code: i32,
}

impl CliError {
    /// Create a new error with [`ExitCode::RUNTIME_ERROR`].
    #[must_use]
    pub fn new(error_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            title: title.into(),
            detail: String::new(),
            suggestion: None,
            context: Vec::new(),
            exit_code: ExitCode::RUNTIME_ERROR,
        }
    }

    /// Add detailed explanation.
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Add a suggested recovery action.
    #[must_use]
    pub fn suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add context field.
    #[must_use]
    pub fn context(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.context.push((key.into(), value.to_string()));
        self
    }

    /// Set exit code.
    #[must_use]
    pub const fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Format for human output.
    #[must_use]
    pub fn human_format(&self) -> String {
        let mut out = format!("Error: {}\n", self.title);
        if !self.detail.is_empty() {
            out.push_str(&self.detail);
            out.push('\n');
        }
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(out, "\nSuggestion: {suggestion}");
        }
        if !self.context.is_empty() {
            out.push_str("\nContext:\n");
            for (k, v) in &self.context {
                let _ = writeln!(out, "  {k}: {v}");
            }
        }
        out
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.title)
    }
}

impl std::error::Error for CliError {}

impl From<QueueError> for CliError {
    fn from(err: QueueError) -> Self {
        errors::queue_failure(err)
    }
}

/// Standard error constructors.
pub mod errors {
    use super::{CliError, ExitCode, QueueError};

    /// Invalid argument error.
    #[must_use]
    pub fn invalid_argument(arg: &str, reason: &str) -> CliError {
        CliError::new("invalid_argument", format!("Invalid argument: {arg}"))
            .detail(reason)
            .exit_code(ExitCode::USER_ERROR)
    }

    /// A queue operation failed.
    #[must_use]
    pub fn queue_failure(err: QueueError) -> CliError {
        CliError::new("queue_error", "Queue operation failed")
            .detail(err.to_string())
            .context("recoverable", err.is_recoverable())
            .exit_code(ExitCode::RUNTIME_ERROR)
    }

    /// Internal error (bug).
    #[must_use]
    pub fn internal(details: &str) -> CliError {
        CliError::new("internal_error", "Internal error")
            .detail(details)
            .exit_code(ExitCode::INTERNAL_ERROR)
    }
}
