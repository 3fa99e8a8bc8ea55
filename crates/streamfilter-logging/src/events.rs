use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Category of a recorded error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "http_403")]
    Http403,
    #[serde(rename = "permission_denied")]
    PermissionDenied,
    #[serde(rename = "exit_code")]
    ExitCode,
    #[serde(rename = "tool_error")]
    ToolError,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Http403 => "http_403",
            ErrorType::PermissionDenied => "permission_denied",
            ErrorType::ExitCode => "exit_code",
            ErrorType::ToolError => "tool_error",
        }
    }

    /// Classify a tool-reported failure by its message.
    ///
    /// First match wins: `403`, then `permission`/`approval`, then
    /// `exit code`. Anything else is a generic tool error.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("403") {
            ErrorType::Http403
        } else if lower.contains("permission") || lower.contains("approval") {
            ErrorType::PermissionDenied
        } else if lower.contains("exit code") {
            ErrorType::ExitCode
        } else {
            ErrorType::ToolError
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error detected in the event stream, before it is stamped for the log
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    pub error_type: ErrorType,
    pub tool_name: String,
    pub message: String,
    pub context: Option<Value>,
}

impl ErrorReport {
    pub fn new(
        error_type: ErrorType,
        tool_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            tool_name: tool_name.into(),
            message: message.into(),
            context: None,
        }
    }

    /// Attach context. Absent, null and empty mappings are dropped so they
    /// never reach the log.
    pub fn with_context(mut self, context: Option<&Value>) -> Self {
        self.context = context.filter(|value| !is_empty_context(value)).cloned();
        self
    }
}

fn is_empty_context(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// One line of the JSONL error log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub timestamp: String,
    pub iteration: String,
    pub error_type: ErrorType,
    pub tool_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ErrorEntry {
    pub fn from_report(report: ErrorReport, iteration: &str, at: DateTime<Local>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            iteration: iteration.to_string(),
            error_type: report.error_type,
            tool_name: report.tool_name,
            message: report.message,
            context: report.context,
        }
    }
}
