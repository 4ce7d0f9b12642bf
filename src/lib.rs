//! SQL Query Mask: slow-query logging for rendered SQL with positional
//! redaction of arguments bound to sensitive columns.
//!
//! A driver hands each executed statement to a [`QueryLogger`] as
//! `(start, query, args)`. The [`resolver`] infers which column every `?`
//! binds to from the backtick-quoted identifiers in the text, the mask
//! registry turns that into argument positions to redact, and the line is
//! rendered through a Tera template unless the statement beat the
//! slow-query threshold.
//!
//! ```
//! use chrono::Local;
//! use sql_query_mask::{QueryLogger, TemplateLogger};
//!
//! let logger = TemplateLogger::new(Vec::<u8>::new())
//!     .with_format("{{ query }}")
//!     .unwrap();
//! logger.add_column_mask("password");
//! logger
//!     .print(
//!         Local::now(),
//!         "UPDATE `users` SET `password` = ? WHERE `id` = ?",
//!         &[&"hunter2", &7],
//!     )
//!     .unwrap();
//! let out = String::from_utf8(logger.into_inner()).unwrap();
//! assert_eq!(
//!     out,
//!     "UPDATE `users` SET `password` = ? WHERE `id` = ?; [* SECRET *, 7]\n"
//! );
//! ```

pub mod core;
pub mod logger;
pub mod resolver;

pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::config::QueryLogConfig;
pub use crate::core::errors::{QueryLogError, Result};
pub use crate::logger::{
    DEFAULT_FORMAT, LogRecord, MaskRegistry, NullLogger, OutputFormat, QueryLogger,
    QueryTemplate, REDACTION_MARKER, TemplateLogger,
};
pub use crate::resolver::{ColumnOrder, ColumnResolver, PatternResolver, resolve_columns};

#[cfg(feature = "cli")]
pub mod cli_app;
