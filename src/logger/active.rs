//! Sink-writing logger driven by a [`QueryTemplate`].

#![allow(missing_docs)]

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use parking_lot::{Mutex, RwLock};

use super::format::{elapsed_millis, format_duration, inline_args};
use super::mask::{MaskIndexSet, MaskRegistry};
use super::template::{LogRecord, QueryTemplate};
use super::{OutputFormat, QueryLogger};
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::{QueryLogError, Result};
use crate::resolver::{ColumnResolver, PatternResolver};

/// State touched only while holding the output lock.
struct Output<W> {
    sink: W,
    template: QueryTemplate,
    format: OutputFormat,
}

/// Writes one line per logged statement to `W`.
///
/// Column resolution, masking, duration measurement and slow-query
/// filtering happen before the output lock is taken. Rendering and the
/// sink write happen under it, so lines never interleave and a template
/// swap never lands in the middle of a render.
pub struct TemplateLogger<W> {
    output: Mutex<Output<W>>,
    slow_threshold_bits: AtomicU64,
    masks: RwLock<MaskRegistry>,
    clock: Arc<dyn Clock>,
    resolver: Box<dyn ColumnResolver>,
}

impl<W: Write + Send> TemplateLogger<W> {
    /// Logger with the default template, no masks and no slow-query filter.
    pub fn new(sink: W) -> Self {
        Self {
            output: Mutex::new(Output {
                sink,
                template: QueryTemplate::default(),
                format: OutputFormat::Template,
            }),
            slow_threshold_bits: AtomicU64::new(0.0_f64.to_bits()),
            masks: RwLock::new(MaskRegistry::new()),
            clock: Arc::new(SystemClock),
            resolver: Box::new(PatternResolver::new()),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Box<dyn ColumnResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn with_slow_time(self, threshold_ms: f64) -> Self {
        self.slow_threshold_bits
            .store(threshold_ms.to_bits(), Ordering::Relaxed);
        self
    }

    #[must_use]
    pub fn with_column_masks(self, masks: MaskRegistry) -> Self {
        *self.masks.write() = masks;
        self
    }

    #[must_use]
    pub fn with_output_format(self, format: OutputFormat) -> Self {
        self.output.lock().format = format;
        self
    }

    /// Builder form of [`QueryLogger::set_format`].
    pub fn with_format(self, format: &str) -> Result<Self> {
        self.set_format(format)?;
        Ok(self)
    }

    /// Current slow-query threshold in milliseconds.
    pub fn slow_time(&self) -> f64 {
        f64::from_bits(self.slow_threshold_bits.load(Ordering::Relaxed))
    }

    /// Snapshot of the registered mask columns.
    pub fn column_masks(&self) -> MaskRegistry {
        self.masks.read().clone()
    }

    /// Text of the active template.
    pub fn format(&self) -> String {
        self.output.lock().template.source().to_string()
    }

    /// Run `f` against the sink while holding the output lock.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.output.lock().sink)
    }

    pub fn into_inner(self) -> W {
        self.output.into_inner().sink
    }

    fn masked_query(&self, query: &str, args: &[&dyn fmt::Debug]) -> String {
        if args.is_empty() {
            return inline_args(query, args, MaskIndexSet::default());
        }
        let order = self.resolver.resolve(query);
        let masks = self.masks.read().mask_indices(&order);
        inline_args(query, args, masks)
    }
}

impl<W: Write + Send> QueryLogger for TemplateLogger<W> {
    fn print(&self, start: DateTime<Local>, query: &str, args: &[&dyn fmt::Debug]) -> Result<()> {
        let query = self.masked_query(query, args);
        let elapsed = elapsed_millis(start, self.clock.now());
        let threshold = self.slow_time();
        if threshold > 0.0 && elapsed < threshold {
            return Ok(());
        }
        let record = LogRecord {
            time: start,
            duration: format_duration(elapsed),
            query,
        };

        let mut output = self.output.lock();
        let mut line = match output.format {
            OutputFormat::Template => output.template.render(&record)?,
            OutputFormat::JsonLines => serde_json::to_string(&record)?,
        };
        if line.ends_with('\n') {
            line.pop();
        }
        line.push('\n');
        output
            .sink
            .write_all(line.as_bytes())
            .and_then(|()| output.sink.flush())
            .map_err(QueryLogError::write)
    }

    fn set_format(&self, format: &str) -> Result<()> {
        let template = QueryTemplate::parse(format)?;
        self.output.lock().template = template;
        Ok(())
    }

    fn set_slow_time(&self, threshold_ms: f64) -> Result<()> {
        self.slow_threshold_bits
            .store(threshold_ms.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    fn add_column_mask(&self, column: &str) {
        self.masks.write().add(column);
    }

    fn remove_column_mask(&self, column: &str) {
        self.masks.write().remove(column);
    }
}

impl<W> fmt::Debug for TemplateLogger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateLogger")
            .field(
                "slow_threshold_ms",
                &f64::from_bits(self.slow_threshold_bits.load(Ordering::Relaxed)),
            )
            .field("masks", &*self.masks.read())
            .finish_non_exhaustive()
    }
}
