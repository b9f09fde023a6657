//! Error types for the couplingmap pipeline.
//!
//! The graph, coupling and clustering modules are pure in-memory computations
//! and never fail. Errors only originate at the edges of the pipeline: reading
//! the fact document, loading configuration and writing artifacts.
//!
//! # Error Codes
//!
//! Error codes are assigned by category:
//! - E001-E009: I/O errors (fact source, output sink)
//! - E010-E019: Fact document format errors
//! - E020-E029: Configuration errors
//! - E030-E039: Serialization errors

use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Fact source could not be read
    pub const FACT_SOURCE_UNAVAILABLE: ErrorCode = ErrorCode("E001");
    /// Output destination could not be written
    pub const OUTPUT_SINK_UNWRITABLE: ErrorCode = ErrorCode("E002");
    /// Fact document is not valid JSON for the fact model
    pub const FACT_FORMAT: ErrorCode = ErrorCode("E010");
    /// Invalid configuration value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Projection could not be serialized
    pub const SERIALIZATION: ErrorCode = ErrorCode("E030");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for couplingmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// The external fact source could not be read
    #[error("Fact source unavailable: {}", path.display())]
    FactSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fact document could not be decoded
    #[error("Invalid fact document {}: {source}", path.display())]
    FactFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An artifact or report destination could not be written
    #[error("Output sink unwritable: {}", path.display())]
    OutputSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON projection errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn fact_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FactSource {
            path: path.into(),
            source,
        }
    }

    pub fn fact_format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::FactFormat {
            path: path.into(),
            source,
        }
    }

    pub fn output_sink(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputSink {
            path: path.into(),
            source,
        }
    }

    /// Get the structured error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FactSource { .. } => ErrorCode::FACT_SOURCE_UNAVAILABLE,
            Self::FactFormat { .. } => ErrorCode::FACT_FORMAT,
            Self::OutputSink { .. } => ErrorCode::OUTPUT_SINK_UNWRITABLE,
            Self::Configuration(_) => ErrorCode::CONFIG_INVALID,
            Self::Serialization(_) => ErrorCode::SERIALIZATION,
        }
    }

    /// Whether the failure happened while acquiring input rather than emitting output.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::FactSource { .. } | Self::FactFormat { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
