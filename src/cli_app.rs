//! Top-level CLI definition and dispatch.

use std::fmt::Debug;
use std::io::{self, Write as _};
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};

use crate::core::config::QueryLogConfig;
use crate::logger::{OutputFormat, QueryLogger};
use crate::resolver::resolve_columns;

/// SQL Query Mask: inspect column resolution and masked query log lines.
#[derive(Parser)]
#[command(name = "sqlmask", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the column bound to each `?` placeholder, in order.
    Resolve {
        /// Rendered SQL statement.
        sql: String,
        /// Emit a JSON array instead of one column per line.
        #[arg(long)]
        json: bool,
    },
    /// Print the log line a statement would produce.
    Render {
        /// Rendered SQL statement.
        sql: String,
        /// Bound arguments, in placeholder order.
        args: Vec<String>,
        /// Column to redact (repeatable).
        #[arg(long = "mask", value_name = "COLUMN")]
        masks: Vec<String>,
        /// Tera template for the line.
        #[arg(long)]
        format: Option<String>,
        /// TOML configuration supplying format, output and masks.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit one JSON object instead of a templated line.
        #[arg(long)]
        json_lines: bool,
    },
}

/// Dispatch CLI commands.
///
/// # Errors
/// Returns an error if configuration loading, rendering or stdout fails.
pub fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Resolve { sql, json } => {
            let order = resolve_columns(sql);
            let mut stdout = io::stdout().lock();
            if *json {
                writeln!(stdout, "{}", serde_json::to_string(order.as_slice())?)?;
            } else {
                for column in order.iter() {
                    writeln!(stdout, "{column}")?;
                }
            }
        }
        Command::Render {
            sql,
            args,
            masks,
            format,
            config,
            json_lines,
        } => {
            let mut settings = match config {
                Some(path) => QueryLogConfig::load(path)?,
                None => QueryLogConfig::default(),
            };
            settings.enabled = true;
            settings.slow_threshold_ms = 0.0;
            settings.masked_columns.extend(masks.iter().cloned());
            if let Some(format) = format {
                settings.format = Some(format.clone());
            }
            if *json_lines {
                settings.output = OutputFormat::JsonLines;
            }
            let logger = settings.build(io::stdout())?;
            let args: Vec<&dyn Debug> = args.iter().map(|arg| arg as &dyn Debug).collect();
            logger.print(Local::now(), sql, &args)?;
        }
    }
    Ok(())
}
