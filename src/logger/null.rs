//! Logger used when query logging is disabled.

use std::fmt;

use chrono::{DateTime, Local};

use super::QueryLogger;
use crate::core::errors::Result;

/// Accepts every call and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl QueryLogger for NullLogger {
    fn print(&self, _start: DateTime<Local>, _query: &str, _args: &[&dyn fmt::Debug]) -> Result<()> {
        Ok(())
    }

    fn set_format(&self, _format: &str) -> Result<()> {
        Ok(())
    }

    fn set_slow_time(&self, _threshold_ms: f64) -> Result<()> {
        Ok(())
    }

    fn add_column_mask(&self, _column: &str) {}

    fn remove_column_mask(&self, _column: &str) {}
}
