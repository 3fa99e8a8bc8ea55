//! # streamfilter-logging
//!
//! Output side of streamfilter.
//!
//! ## Key Types
//!
//! - [`ConsoleWriter`] - Timestamped, flushed console lines
//! - [`ErrorLog`] - Append-only JSONL error log
//! - [`ErrorSink`] - Where detected errors go
//! - [`LogFormat`] - Diagnostic output formats (Text, JSON)
//!
//! Diagnostics from [`init_tracing`] always go to stderr so they never mix
//! with the console stream on stdout.

mod console;
mod error_log;
mod events;

pub use console::{ConsoleLine, ConsoleWriter, Glyph};
pub use error_log::{ErrorLog, ErrorLogError, ErrorSink, DEFAULT_ERROR_LOG, DEFAULT_ITERATION};
pub use events::{ErrorEntry, ErrorReport, ErrorType};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Diagnostic log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON lines format for machine consumption
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Initialize tracing for the application
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
