//! Query logger capability: masked, slow-query-filtered log lines for
//! executed SQL statements.
//!
//! Two implementations share the [`QueryLogger`] trait: [`TemplateLogger`]
//! writes lines to a sink and [`NullLogger`] does nothing, so call sites
//! never branch on whether logging is enabled.
//!
//! # Consistency
//!
//! Sink writes and template swaps are totally ordered by one output lock.
//! The mask registry and slow-query threshold are *eventually consistent*
//! with concurrent [`QueryLogger::print`] calls: a print that races with
//! `add_column_mask`, `remove_column_mask` or `set_slow_time` may observe
//! either the old or the new value. Treat those as runtime reconfiguration,
//! not as transactional with in-flight logging.

pub mod active;
pub mod format;
pub mod mask;
pub mod null;
pub mod template;

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

pub use active::TemplateLogger;
pub use format::REDACTION_MARKER;
pub use mask::{MaskIndexSet, MaskRegistry};
pub use null::NullLogger;
pub use template::{DEFAULT_FORMAT, LogRecord, QueryTemplate};

/// Operations a database driver uses to log executed statements.
pub trait QueryLogger: Send + Sync {
    /// Log `query`, started at `start`, with its positional bind `args`.
    ///
    /// Returns `Ok(())` without writing when the statement finished faster
    /// than the slow-query threshold. Errors must not fail the statement
    /// that produced them.
    fn print(&self, start: DateTime<Local>, query: &str, args: &[&dyn fmt::Debug]) -> Result<()>;

    /// Replace the line template. On error the previous template stays active.
    fn set_format(&self, format: &str) -> Result<()>;

    /// Minimum duration in milliseconds for a line to be written.
    /// Zero or negative logs every statement.
    fn set_slow_time(&self, threshold_ms: f64) -> Result<()>;

    /// Redact arguments bound to `column`.
    fn add_column_mask(&self, column: &str);

    /// Undo one earlier [`QueryLogger::add_column_mask`] for `column`.
    fn remove_column_mask(&self, column: &str);
}

/// How a [`TemplateLogger`] serializes each [`LogRecord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Render through the configured template.
    #[default]
    Template,
    /// One JSON object per line with `time`, `duration` and `query` keys.
    JsonLines,
}
