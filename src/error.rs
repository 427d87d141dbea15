//! Unified error types for bom-dashboard.
//!
//! Library code reports failures through [`BomDashError`]; the binary
//! boundary wraps them with `anyhow` for display.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bom-dashboard operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BomDashError {
    /// Errors while loading the index or a snapshot
    #[error("Failed to load BOM data: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors while generating the snapshot index
    #[error("Index generation failed: {context}")]
    Index {
        context: String,
        #[source]
        source: IndexErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific load error kinds, one per step of the fetch sequence.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Index request failed: {0}")]
    IndexUnavailable(String),

    #[error("Index is empty or unparseable")]
    IndexEmpty,

    #[error("Snapshot request failed: {0}")]
    SnapshotUnavailable(String),

    #[error("Snapshot is missing a scan_date")]
    MissingScanDate,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Specific index-generation error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IndexErrorKind {
    #[error("Cannot read content directory: {0}")]
    UnreadableDirectory(String),

    #[error("Cannot write index file: {0}")]
    WriteFailed(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for bom-dashboard operations
pub type Result<T> = std::result::Result<T, BomDashError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl BomDashError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an index-generation error with context
    pub fn index(context: impl Into<String>, source: IndexErrorKind) -> Self {
        Self::Index {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for BomDashError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for BomDashError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}
