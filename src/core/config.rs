//! Query log configuration: TOML loading, validation and logger selection.
//!
//! ```toml
//! enabled = true
//! slow_threshold_ms = 250.0
//! masked_columns = ["password", "token"]
//! output = "template"
//! format = "[{{ duration }}] {{ query }}"
//! ```

#![allow(missing_docs)]

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{QueryLogError, Result};
use crate::logger::{
    MaskRegistry, NullLogger, OutputFormat, QueryLogger, QueryTemplate, TemplateLogger,
};

/// Settings for building a [`QueryLogger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLogConfig {
    /// When false, [`QueryLogConfig::build`] returns a [`NullLogger`].
    pub enabled: bool,
    /// Tera template for each line; `None` keeps the default format.
    pub format: Option<String>,
    /// Line encoding.
    pub output: OutputFormat,
    /// Statements faster than this are not logged. Zero or negative logs all.
    pub slow_threshold_ms: f64,
    /// Columns whose bound arguments are redacted.
    pub masked_columns: Vec<String>,
}

impl Default for QueryLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            format: None,
            output: OutputFormat::Template,
            slow_threshold_ms: 0.0,
            masked_columns: Vec::new(),
        }
    }
}

impl QueryLogConfig {
    /// Enabled configuration with defaults for everything else.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_slow_threshold_ms(mut self, threshold_ms: f64) -> Self {
        self.slow_threshold_ms = threshold_ms;
        self
    }

    #[must_use]
    pub fn with_masked_column(mut self, column: impl Into<String>) -> Self {
        self.masked_columns.push(column.into());
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                QueryLogError::MissingConfig {
                    path: path.to_path_buf(),
                }
            } else {
                QueryLogError::io(path, source)
            }
        })?;
        Self::from_toml_str(&raw)
    }

    /// Reject settings that would misbehave at runtime.
    pub fn validate(&self) -> Result<()> {
        if !self.slow_threshold_ms.is_finite() {
            return Err(QueryLogError::InvalidConfig {
                details: format!(
                    "slow_threshold_ms must be finite, got {}",
                    self.slow_threshold_ms
                ),
            });
        }
        for column in &self.masked_columns {
            if column.trim().is_empty() {
                return Err(QueryLogError::InvalidConfig {
                    details: "masked_columns entries must not be empty".to_string(),
                });
            }
            if column.contains('`') {
                return Err(QueryLogError::InvalidConfig {
                    details: format!(
                        "masked column {column:?} must be a bare name without backticks"
                    ),
                });
            }
        }
        if let Some(format) = &self.format {
            QueryTemplate::parse(format)?;
        }
        Ok(())
    }

    /// Build the logger this configuration describes, writing to `sink`.
    pub fn build<W>(&self, sink: W) -> Result<Box<dyn QueryLogger>>
    where
        W: Write + Send + 'static,
    {
        Ok(match self.build_template_logger(sink)? {
            Some(logger) => Box::new(logger),
            None => Box::new(NullLogger),
        })
    }

    /// Concrete logger for callers that need the sink back. `None` when
    /// logging is disabled.
    pub fn build_template_logger<W>(&self, sink: W) -> Result<Option<TemplateLogger<W>>>
    where
        W: Write + Send,
    {
        if !self.enabled {
            return Ok(None);
        }
        self.validate()?;
        let mut logger = TemplateLogger::new(sink)
            .with_slow_time(self.slow_threshold_ms)
            .with_column_masks(self.masked_columns.iter().cloned().collect::<MaskRegistry>())
            .with_output_format(self.output);
        if let Some(format) = &self.format {
            logger = logger.with_format(format)?;
        }
        Ok(Some(logger))
    }
}
