use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::debug;

use crate::events::{ErrorEntry, ErrorReport};

/// Default location of the error log, relative to the working directory.
pub const DEFAULT_ERROR_LOG: &str = "logs/errors.jsonl";

/// Iteration tag used when none is configured.
pub const DEFAULT_ITERATION: &str = "?";

#[derive(Error, Debug)]
pub enum ErrorLogError {
    #[error("Failed to create error log directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to append to error log {path}: {source}")]
    Append { path: PathBuf, source: io::Error },

    #[error("Failed to serialize error entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for errors detected in the event stream
pub trait ErrorSink {
    fn record(&mut self, report: ErrorReport) -> Result<(), ErrorLogError>;
}

/// Collects reports in memory. Useful for tests and dry runs.
impl ErrorSink for Vec<ErrorReport> {
    fn record(&mut self, report: ErrorReport) -> Result<(), ErrorLogError> {
        self.push(report);
        Ok(())
    }
}

/// Append-only JSONL error log.
///
/// The file is opened, appended and closed for every entry, so an entry is
/// either fully written or not at all when the process dies mid-stream.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
    iteration: String,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>, iteration: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            iteration: iteration.into(),
        }
    }

    /// Returns the path to the error log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn iteration(&self) -> &str {
        &self.iteration
    }

    /// Stamp a report with the current local time and the iteration tag,
    /// then append it.
    pub fn append(&self, report: ErrorReport) -> Result<ErrorEntry, ErrorLogError> {
        let entry = ErrorEntry::from_report(report, &self.iteration, Local::now());
        self.write_entry(&entry)?;
        Ok(entry)
    }

    fn write_entry(&self, entry: &ErrorEntry) -> Result<(), ErrorLogError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ErrorLogError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let append_err = |source: io::Error| ErrorLogError::Append {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(append_err)?;
        file.write_all(line.as_bytes()).map_err(append_err)?;

        debug!(
            path = %self.path.display(),
            error_type = %entry.error_type,
            tool = entry.tool_name.as_str(),
            "Appended error entry"
        );
        Ok(())
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG, DEFAULT_ITERATION)
    }
}

impl ErrorSink for ErrorLog {
    fn record(&mut self, report: ErrorReport) -> Result<(), ErrorLogError> {
        self.append(report).map(|_| ())
    }
}
