//! Lenient view over one stream-json record.
//!
//! Only the fields the formatter needs are read. Anything missing or of an
//! unexpected shape falls back to an empty value instead of failing the
//! whole record.

use serde_json::{Map, Value};

use crate::text::stringify;

/// One decoded input line
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Assistant(Vec<ContentBlock>),
    User(Vec<ContentBlock>),
    Result(SessionResult),
    /// Unrecognised or missing `type`
    Other,
}

/// An element of `message.content`
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    Text(String),
    ToolResult {
        tool_use_id: String,
        content: Value,
        is_error: bool,
    },
    Other,
}

/// Terminal summary of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub subtype: String,
    pub total_cost_usd: f64,
    pub num_turns: Value,
    pub permission_denials: Vec<Denial>,
}

/// A tool call blocked by policy
#[derive(Debug, Clone, PartialEq)]
pub struct Denial {
    pub tool_name: String,
    pub tool_input: Value,
}

impl Event {
    /// Decode a line. Anything that is not a JSON object is an error.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        let record: Map<String, Value> = serde_json::from_str(line)?;
        Ok(Self::from_record(&record))
    }

    pub fn from_record(record: &Map<String, Value>) -> Self {
        match str_field(record, "type") {
            Some("assistant") => Event::Assistant(content_blocks(record)),
            Some("user") => Event::User(content_blocks(record)),
            Some("result") => Event::Result(SessionResult::from_record(record)),
            _ => Event::Other,
        }
    }
}

impl ContentBlock {
    pub fn from_value(value: &Value) -> Self {
        let Some(block) = value.as_object() else {
            return ContentBlock::Other;
        };

        match str_field(block, "type") {
            Some("tool_use") => ContentBlock::ToolUse {
                id: id_field(block, "id"),
                name: str_field(block, "name").unwrap_or("?").to_string(),
                input: block
                    .get("input")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new())),
            },
            Some("text") => {
                ContentBlock::Text(str_field(block, "text").unwrap_or_default().to_string())
            }
            Some("tool_result") => ContentBlock::ToolResult {
                tool_use_id: id_field(block, "tool_use_id"),
                content: block
                    .get("content")
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new())),
                is_error: block.get("is_error").and_then(Value::as_bool).unwrap_or(false),
            },
            _ => ContentBlock::Other,
        }
    }
}

impl SessionResult {
    fn from_record(record: &Map<String, Value>) -> Self {
        let num_turns = match record.get("num_turns") {
            Some(turns @ Value::Number(_)) => turns.clone(),
            _ => Value::from(0),
        };

        let permission_denials = record
            .get("permission_denials")
            .and_then(Value::as_array)
            .map(|denials| denials.iter().map(Denial::from_value).collect())
            .unwrap_or_default();

        Self {
            subtype: str_field(record, "subtype").unwrap_or_default().to_string(),
            total_cost_usd: record
                .get("total_cost_usd")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            num_turns,
            permission_denials,
        }
    }
}

impl Denial {
    fn from_value(value: &Value) -> Self {
        let denial = value.as_object();
        Self {
            tool_name: denial
                .and_then(|d| str_field(d, "tool_name"))
                .unwrap_or("unknown")
                .to_string(),
            tool_input: denial
                .and_then(|d| d.get("tool_input"))
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
        }
    }
}

fn content_blocks(record: &Map<String, Value>) -> Vec<ContentBlock> {
    record
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_array)
        .map(|blocks| blocks.iter().map(ContentBlock::from_value).collect())
        .unwrap_or_default()
}

/// Tool-call identifiers key the call table, so non-string ids keep their
/// own rendering instead of collapsing onto the empty id.
fn id_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .map(|value| stringify(value).into_owned())
        .unwrap_or_default()
}

/// Read a string field, treating any other shape as absent.
pub(crate) fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}
