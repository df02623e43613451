//! Error types for Solidafy Pager
//!
//! Two layers live here:
//! - [`IterError`] is what a paged run fails with. It is generic over the
//!   caller's own error type, which is carried through untouched.
//! - [`Error`] covers everything around the loop (settings, decoding, I/O, CLI).

use thiserror::Error;

/// Failure of a single `iterate` run
///
/// Fetch, advance and handler errors wrap the caller's error value exactly as
/// it was returned; the variant only records which stage produced it.
#[derive(Error, Debug)]
pub enum IterError<E> {
    /// A required callback was never set; nothing was called
    #[error("Iterator not configured: missing {missing}")]
    NotConfigured {
        /// Builder method that supplies the missing piece
        missing: &'static str,
    },

    /// The cancellation token fired before the next page
    #[error("Iteration cancelled")]
    Cancelled,

    /// The run deadline passed before the next page
    #[error("Iteration deadline exceeded")]
    DeadlineExceeded,

    /// The fetch function failed
    #[error("Page fetch failed: {0}")]
    Fetch(#[source] E),

    /// The advance or next-cursor function failed
    #[error("Cursor advance failed: {0}")]
    Advance(#[source] E),

    /// The item or page handler failed
    #[error("Handler failed: {0}")]
    Handler(#[source] E),
}

impl<E> IterError<E> {
    /// Create a not-configured error
    pub fn not_configured(missing: &'static str) -> Self {
        Self::NotConfigured { missing }
    }

    /// True for both explicit cancellation and an expired deadline
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// True if the iterator was never fully configured
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }

    /// Borrow the caller's error, if this failure came from a callback
    pub fn source_ref(&self) -> Option<&E> {
        match self {
            Self::Fetch(e) | Self::Advance(e) | Self::Handler(e) => Some(e),
            _ => None,
        }
    }

    /// Take the caller's error back, if this failure came from a callback
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Fetch(e) | Self::Advance(e) | Self::Handler(e) => Some(e),
            _ => None,
        }
    }
}

/// The main error type for everything outside the paging loop
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Settings could not be read
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A required piece of configuration is missing
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    /// A configuration value is out of range
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    /// Settings YAML is malformed
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    /// The record path does not select anything
    #[error("Failed to extract records from path '{path}': {message}")]
    RecordExtraction { path: String, message: String },

    /// The input document is not valid JSON or JSONL
    #[error("Failed to decode input: {message}")]
    Decode { message: String },

    // ============================================================================
    // Run Errors
    // ============================================================================
    /// The run was interrupted
    #[error("Run cancelled")]
    Cancelled,

    /// The run hit its timeout
    #[error("Run timed out")]
    DeadlineExceeded,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Reading input or writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An input or settings file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if this error came from cancelling a run
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }
}

impl From<IterError<Error>> for Error {
    fn from(err: IterError<Error>) -> Self {
        match err {
            IterError::NotConfigured { missing } => Error::missing_field(missing),
            IterError::Cancelled => Error::Cancelled,
            IterError::DeadlineExceeded => Error::DeadlineExceeded,
            IterError::Fetch(e) | IterError::Advance(e) | IterError::Handler(e) => e,
        }
    }
}

/// Result type alias for Solidafy Pager
pub type Result<T> = std::result::Result<T, Error>;
