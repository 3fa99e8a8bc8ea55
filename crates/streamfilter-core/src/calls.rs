//! Memory of tool calls, keyed by call id.

use std::collections::HashMap;

use serde_json::Value;

/// A tool invocation seen earlier in the stream
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub tool: String,
    pub input: Value,
}

/// Tool calls by identifier, kept for the life of the stream so a later
/// failing result can be attributed to the call that caused it.
///
/// Entries are never evicted. A repeated identifier replaces the earlier call.
#[derive(Debug, Default)]
pub struct ToolCallTable {
    calls: HashMap<String, ToolCall>,
}

impl ToolCallTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, tool: impl Into<String>, input: Value) {
        self.calls.insert(
            id.into(),
            ToolCall {
                tool: tool.into(),
                input,
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&ToolCall> {
        self.calls.get(id)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_latest_call_wins() {
        let mut table = ToolCallTable::new();
        table.insert("toolu_1", "Read", json!({"file_path": "a"}));
        table.insert("toolu_1", "Bash", json!({"command": "ls"}));

        assert_eq!(table.len(), 1);
        let call = table.get("toolu_1").unwrap();
        assert_eq!(call.tool, "Bash");
        assert_eq!(call.input, json!({"command": "ls"}));
        assert!(table.get("toolu_2").is_none());
    }
}
