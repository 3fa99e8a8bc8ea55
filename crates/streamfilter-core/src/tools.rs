//! Per-tool console rendering.

use serde_json::Value;
use streamfilter_logging::{ConsoleLine, Glyph};

use crate::text::{stringify, truncate};

/// Tools with a dedicated console rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    WebFetch,
    WebSearch,
    Read,
    Write,
    Edit,
    Bash,
    Glob,
    Grep,
    Task,
    /// Rendered from its first input value
    Other,
}

impl Tool {
    pub fn from_name(name: &str) -> Self {
        match name {
            "WebFetch" => Tool::WebFetch,
            "WebSearch" => Tool::WebSearch,
            "Read" => Tool::Read,
            "Write" => Tool::Write,
            "Edit" => Tool::Edit,
            "Bash" => Tool::Bash,
            "Glob" => Tool::Glob,
            "Grep" => Tool::Grep,
            "Task" => Tool::Task,
            _ => Tool::Other,
        }
    }

    pub fn glyph(&self) -> Glyph {
        match self {
            Tool::WebFetch => Glyph::Globe,
            Tool::WebSearch => Glyph::MagnifierLeft,
            Tool::Read => Glyph::Book,
            Tool::Write | Tool::Edit => Glyph::Pencil,
            Tool::Bash => Glyph::Laptop,
            Tool::Glob | Tool::Grep => Glyph::MagnifierRight,
            Tool::Task => Glyph::Robot,
            Tool::Other => Glyph::Wrench,
        }
    }
}

/// Console line for a tool invocation.
pub fn describe(name: &str, input: &Value) -> ConsoleLine {
    let tool = Tool::from_name(name);
    let field = |key: &str| input_field(input, key).unwrap_or_else(|| "?".to_string());
    let path = || input_field(input, "path").unwrap_or_else(|| ".".to_string());

    let text = match tool {
        Tool::WebFetch => format!("WebFetch: {}", truncate(&field("url"), 60)),
        Tool::WebSearch => format!("WebSearch: {}", field("query")),
        Tool::Read => format!("Read: {}", field("file_path")),
        Tool::Write => format!("Write: {}", field("file_path")),
        Tool::Edit => format!("Edit: {}", field("file_path")),
        Tool::Bash => format!("Bash: {}", truncate(&field("command"), 80)),
        Tool::Glob => format!("Glob: {} in {}", field("pattern"), path()),
        Tool::Grep => format!("Grep: '{}' in {}", truncate(&field("pattern"), 40), path()),
        Tool::Task => {
            let desc = input_field(input, "description")
                .or_else(|| input_field(input, "prompt"))
                .unwrap_or_else(|| "?".to_string());
            format!("Task: {}", truncate(&desc, 50))
        }
        Tool::Other => {
            let first = input
                .as_object()
                .and_then(|map| map.values().next())
                .map(|value| truncate(&stringify(value), 50).to_string())
                .unwrap_or_else(|| "?".to_string());
            format!("{}: {}", name, first)
        }
    };

    ConsoleLine::new(tool.glyph(), text)
}

/// A present, non-null input field rendered for display.
fn input_field(input: &Value, key: &str) -> Option<String> {
    match input.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(stringify(value).into_owned()),
    }
}
