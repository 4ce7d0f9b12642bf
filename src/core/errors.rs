//! QLM-prefixed error types with structured error codes.
//!
//! Errors are returned to the immediate caller of `print`/`set_format` and
//! never retried internally. A failed log line must not fail the query that
//! produced it: callers log-and-continue or ignore.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, QueryLogError>;

/// Top-level error type for query logging.
#[derive(Debug, Error)]
pub enum QueryLogError {
    #[error("[QLM-1001] invalid log format template: {details}")]
    TemplateParse { details: String },

    #[error("[QLM-1002] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[QLM-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[QLM-1004] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[QLM-2001] log template execution failed: {details}")]
    TemplateExecution { details: String },

    #[error("[QLM-2002] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[QLM-3001] log sink write failed: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    #[error("[QLM-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl QueryLogError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TemplateParse { .. } => "QLM-1001",
            Self::InvalidConfig { .. } => "QLM-1002",
            Self::ConfigParse { .. } => "QLM-1003",
            Self::MissingConfig { .. } => "QLM-1004",
            Self::TemplateExecution { .. } => "QLM-2001",
            Self::Serialization { .. } => "QLM-2002",
            Self::Write { .. } => "QLM-3001",
            Self::Io { .. } => "QLM-3002",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Io { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Convenience constructor for sink write failures.
    #[must_use]
    pub const fn write(source: std::io::Error) -> Self {
        Self::Write { source }
    }
}

impl From<serde_json::Error> for QueryLogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for QueryLogError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
