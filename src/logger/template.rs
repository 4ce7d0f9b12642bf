//! Tera-backed rendering of one [`LogRecord`] into a log line.
//!
//! Templates see exactly three fields: `time` (a timestamp usable with the
//! `date` filter), `duration` (pre-formatted, e.g. `"12.34ms"`) and `query`
//! (masked, with arguments inlined).

#![allow(missing_docs)]

use std::error::Error as _;

use chrono::{DateTime, Local};
use serde::Serialize;
use tera::{Context, Tera};

use crate::core::errors::{QueryLogError, Result};

/// Format used when none is configured: `[2024-03-01 12:00:00] [1.25ms] <query>`.
pub const DEFAULT_FORMAT: &str =
    r#"[{{ time | date(format="%Y-%m-%d %H:%M:%S") }}] [{{ duration }}] {{ query }}"#;

const TEMPLATE_NAME: &str = "query_log";

/// Data passed to the template for a single statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub time: DateTime<Local>,
    pub duration: String,
    pub query: String,
}

/// Compiled log line template.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    engine: Tera,
    source: String,
}

impl QueryTemplate {
    /// Compile `source`. Syntax errors are reported here, before the
    /// template can be installed.
    pub fn parse(source: &str) -> Result<Self> {
        let mut engine = Tera::default();
        engine.autoescape_on(Vec::new());
        engine
            .add_raw_template(TEMPLATE_NAME, source)
            .map_err(|err| QueryLogError::TemplateParse {
                details: describe(&err),
            })?;
        Ok(Self {
            engine,
            source: source.to_string(),
        })
    }

    /// Render `record`. Unknown fields and filters applied to values of the
    /// wrong type fail here.
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        let context =
            Context::from_serialize(record).map_err(|err| QueryLogError::TemplateExecution {
                details: describe(&err),
            })?;
        self.engine
            .render(TEMPLATE_NAME, &context)
            .map_err(|err| QueryLogError::TemplateExecution {
                details: describe(&err),
            })
    }

    /// Template text this was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for QueryTemplate {
    fn default() -> Self {
        // DEFAULT_FORMAT is a fixed, known-good template.
        Self::parse(DEFAULT_FORMAT).unwrap_or_else(|err| panic!("default log format: {err}"))
    }
}

/// Flatten a Tera error and its causes into one line.
fn describe(err: &tera::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cause = inner.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> LogRecord {
        LogRecord {
            time: Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap(),
            duration: "1.25ms".to_string(),
            query: "SELECT 1;".to_string(),
        }
    }

    #[test]
    fn default_format_renders_timestamp_duration_and_query() {
        let line = QueryTemplate::default().render(&record()).unwrap();
        assert_eq!(line, "[2024-03-01 12:30:45] [1.25ms] SELECT 1;");
    }

    #[test]
    fn custom_format_sees_all_fields() {
        let template = QueryTemplate::parse("{{ query }} took {{ duration }}").unwrap();
        assert_eq!(template.render(&record()).unwrap(), "SELECT 1; took 1.25ms");
        assert_eq!(template.source(), "{{ query }} took {{ duration }}");
    }

    #[test]
    fn output_is_not_html_escaped() {
        let template = QueryTemplate::parse("{{ query }}").unwrap();
        let mut rec = record();
        rec.query = r#"SELECT * FROM `t` WHERE `a` = ?; ["<b>&"]"#.to_string();
        assert_eq!(template.render(&rec).unwrap(), rec.query);
    }

    #[test]
    fn malformed_template_is_a_parse_error() {
        let err = QueryTemplate::parse("{{ query ").unwrap_err();
        assert_eq!(err.code(), "QLM-1001");
    }

    #[test]
    fn unknown_field_is_an_execution_error() {
        let template = QueryTemplate::parse("{{ rows }}").unwrap();
        let err = template.render(&record()).unwrap_err();
        assert_eq!(err.code(), "QLM-2001");
    }

    #[test]
    fn incompatible_filter_is_an_execution_error() {
        let template = QueryTemplate::parse(r#"{{ duration | date(format="%Y") }}"#).unwrap();
        assert!(matches!(
            template.render(&record()),
            Err(QueryLogError::TemplateExecution { .. })
        ));
    }
}
