//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Catalog errors
//! - 2xx: Input errors
//! - 3xx: Config errors
//! - 5xx: Output errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for machine output formats.
///
/// Each variant maps to a numeric code (e.g., `CatalogNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Catalog errors (1xx)
    // ========================================
    /// E101: The product table does not exist
    CatalogNotFound,
    /// E102: The product table exists but could not be read or parsed
    CatalogUnreadable,
    /// E103: The product table is missing a required column
    CatalogSchemaInvalid,

    // ========================================
    // Input errors (2xx)
    // ========================================
    /// E201: Reading interactive input failed
    PromptFailed,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,
    /// E302: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Output errors (5xx)
    // ========================================
    /// E501: Failed to write the recommendations file
    OutputWriteError,
    /// E502: Serialization of results failed
    SerializationError,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `CatalogNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::CatalogNotFound => 101,
            Self::CatalogUnreadable => 102,
            Self::CatalogSchemaInvalid => 103,

            Self::PromptFailed => 201,

            Self::ConfigInvalid => 301,
            Self::ConfigMissingRequired => 302,

            Self::OutputWriteError => 501,
            Self::SerializationError => 502,

            Self::IoError => 901,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::CatalogNotFound => "Point --data at the directory holding products_main.csv, or set COSMOREC_DATA_DIR",
            Self::CatalogUnreadable => "Check that products_main.csv is a comma-separated file with a header row",
            Self::CatalogSchemaInvalid => "The product table needs at least an `id` column in its header row",

            Self::PromptFailed => "Input ended unexpectedly. Use `cosmorec recommend` with flags for non-interactive runs",

            Self::ConfigInvalid => "Check TOML syntax and value ranges in the config file and COSMOREC_* variables",
            Self::ConfigMissingRequired => "Set the missing value in cosmorec.toml or pass it on the command line",

            Self::OutputWriteError => "Check write permissions on the output directory, or choose another with --output",
            Self::SerializationError => "The result set could not be serialized. Try --output-format plain",

            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::CatalogNotFound
            | Self::CatalogUnreadable
            | Self::CatalogSchemaInvalid
            | Self::PromptFailed
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::OutputWriteError
            | Self::IoError => true,

            Self::SerializationError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "catalog",
            2 => "input",
            3 => "config",
            5 => "output",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::CatalogNotFound,
            Self::CatalogUnreadable,
            Self::CatalogSchemaInvalid,
            Self::PromptFailed,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::OutputWriteError,
            Self::SerializationError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
