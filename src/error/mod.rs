//! Error handling for cosmorec.
//!
//! This module provides:
//! - [`RecError`]: The main error enum for all operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::suggest_for_error;

/// Main error type for cosmorec operations.
#[derive(Error, Debug)]
pub enum RecError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Product table not found: {0}")]
    CatalogNotFound(String),

    #[error("Failed to read product table {path}: {reason}")]
    CatalogUnreadable { path: String, reason: String },

    #[error("Invalid product table {path}: {reason}")]
    CatalogSchema { path: String, reason: String },

    #[error("Input error: {0}")]
    Prompt(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Failed to write {path}: {reason}")]
    OutputWrite { path: String, reason: String },
}

impl RecError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::CatalogNotFound(_) => ErrorCode::CatalogNotFound,
            Self::CatalogUnreadable { .. } => ErrorCode::CatalogUnreadable,
            Self::CatalogSchema { .. } => ErrorCode::CatalogSchemaInvalid,
            Self::Prompt(_) => ErrorCode::PromptFailed,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::OutputWrite { .. } => ErrorCode::OutputWriteError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::CatalogNotFound(path) => Some(serde_json::json!({ "path": path })),
            Self::CatalogUnreadable { path, reason }
            | Self::CatalogSchema { path, reason }
            | Self::OutputWrite { path, reason } => {
                Some(serde_json::json!({ "path": path, "reason": reason }))
            }
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_rec_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
///
/// Emitted in place of the plain message when the CLI runs with a machine
/// output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "CATALOG_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "catalog", "config")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a [`RecError`].
    #[must_use]
    pub fn from_rec_error(err: &RecError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&RecError> for StructuredError {
    fn from(err: &RecError) -> Self {
        Self::from_rec_error(err)
    }
}

/// Result type alias using [`RecError`].
pub type Result<T> = std::result::Result<T, RecError>;
