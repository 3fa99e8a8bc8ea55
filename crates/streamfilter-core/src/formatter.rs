//! Event to console-line and error-report translation.

use streamfilter_logging::{ConsoleLine, ErrorReport, ErrorType, Glyph};
use tracing::debug;

use crate::calls::ToolCallTable;
use crate::event::{ContentBlock, Event, SessionResult};
use crate::text::{stringify, truncate};
use crate::tools;

const TEXT_LIMIT: usize = 100;
const CONSOLE_ERROR_LIMIT: usize = 80;
const LOGGED_ERROR_LIMIT: usize = 200;
const DENIAL_INPUT_LIMIT: usize = 60;

/// Message recorded for every tool call denied by settings.
pub const DENIAL_MESSAGE: &str = "Permission denied by settings";

/// What a single event produces, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Console(ConsoleLine),
    Error(ErrorReport),
}

/// Turns events into console lines and error reports.
///
/// Owns the tool-call table, so it must see every event of a stream in order.
#[derive(Debug, Default)]
pub struct Formatter {
    calls: ToolCallTable,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &ToolCallTable {
        &self.calls
    }

    pub fn format(&mut self, event: &Event) -> Vec<Output> {
        let mut out = Vec::new();
        match event {
            Event::Assistant(blocks) => {
                for block in blocks {
                    self.assistant_block(block, &mut out);
                }
            }
            Event::User(blocks) => {
                for block in blocks {
                    self.user_block(block, &mut out);
                }
            }
            Event::Result(result) => Self::session_result(result, &mut out),
            Event::Other => {}
        }
        out
    }

    fn assistant_block(&mut self, block: &ContentBlock, out: &mut Vec<Output>) {
        match block {
            ContentBlock::ToolUse { id, name, input } => {
                // Recorded for every tool, known or not, so errors can be attributed
                self.calls.insert(id.as_str(), name.as_str(), input.clone());
                debug!(id = id.as_str(), tool = name.as_str(), "Recorded tool call");
                out.push(Output::Console(tools::describe(name, input)));
            }
            ContentBlock::Text(text) => {
                let text = truncate(text, TEXT_LIMIT);
                if !text.trim().is_empty() {
                    out.push(Output::Console(ConsoleLine::new(Glyph::Speech, text)));
                }
            }
            _ => {}
        }
    }

    fn user_block(&self, block: &ContentBlock, out: &mut Vec<Output>) {
        let ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error: true,
        } = block
        else {
            return;
        };

        let content = stringify(content);
        out.push(Output::Console(ConsoleLine::new(
            Glyph::Cross,
            format!("Tool error: {}", truncate(&content, CONSOLE_ERROR_LIMIT)),
        )));

        let call = self.calls.get(tool_use_id);
        let tool_name = call.map(|c| c.tool.as_str()).unwrap_or("unknown");
        let report = ErrorReport::new(
            ErrorType::classify(&content),
            tool_name,
            truncate(&content, LOGGED_ERROR_LIMIT),
        )
        .with_context(call.map(|c| &c.input));
        out.push(Output::Error(report));
    }

    fn session_result(result: &SessionResult, out: &mut Vec<Output>) {
        let denials = &result.permission_denials;
        if !denials.is_empty() {
            out.push(Output::Console(ConsoleLine::new(
                Glyph::Warning,
                format!("Permission denied for {} tool calls", denials.len()),
            )));
            for denial in denials {
                let input = stringify(&denial.tool_input);
                out.push(Output::Console(ConsoleLine::plain(format!(
                    "   - {}: {}",
                    denial.tool_name,
                    truncate(&input, DENIAL_INPUT_LIMIT)
                ))));
                let report = ErrorReport::new(
                    ErrorType::PermissionDenied,
                    denial.tool_name.as_str(),
                    DENIAL_MESSAGE,
                )
                .with_context(Some(&denial.tool_input));
                out.push(Output::Error(report));
            }
        }

        out.push(Output::Console(ConsoleLine::new(
            Glyph::Check,
            format!("Done: {} turns, ${:.4}", result.num_turns, result.total_cost_usd),
        )));

        if result.subtype == "error_max_turns" {
            out.push(Output::Console(ConsoleLine::new(
                Glyph::Warning,
                "Hit max turns limit",
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn format_line(formatter: &mut Formatter, line: &str) -> Vec<Output> {
        formatter.format(&Event::parse(line).unwrap())
    }

    fn console_text(outputs: &[Output]) -> Vec<String> {
        outputs
            .iter()
            .filter_map(|o| match o {
                Output::Console(line) => Some(line.to_string()),
                Output::Error(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_text_blocks() {
        let mut formatter = Formatter::new();
        let out = format_line(
            &mut formatter,
            r#"{"type":"assistant","message":{"content":[{"type":"text","text":"   "},{"type":"text","text":"hello"},{"type":"text","text":""}]}}"#,
        );
        assert_eq!(console_text(&out), vec!["💬 hello"]);
    }

    #[test]
    fn test_text_is_truncated_not_trimmed() {
        let mut formatter = Formatter::new();
        let text = format!("  {}", "w".repeat(150));
        let line = json!({"type": "assistant", "message": {"content": [{"type": "text", "text": text}]}});
        let out = format_line(&mut formatter, &line.to_string());
        assert_eq!(console_text(&out), vec![format!("💬   {}", "w".repeat(98))]);
    }

    #[test]
    fn test_tool_use_is_recorded_for_unknown_tools() {
        let mut formatter = Formatter::new();
        let out = format_line(
            &mut formatter,
            r#"{"type":"assistant","message":{"content":[{"type":"tool_use","id":"t1","name":"Foo","input":{"a":1,"b":2}}]}}"#,
        );
        assert_eq!(console_text(&out), vec!["🔧 Foo: 1"]);
        assert_eq!(formatter.calls().get("t1").unwrap().tool, "Foo");
    }

    #[test]
    fn test_tool_error_is_attributed_to_prior_call() {
        let mut formatter = Formatter::new();
        format_line(
            &mut formatter,
            r#"{"type":"assistant","message":{"content":[{"type":"tool_use","id":"t1","name":"WebFetch","input":{"url":"http://x"}}]}}"#,
        );
        let out = format_line(
            &mut formatter,
            r#"{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":"t1","is_error":true,"content":"Error: 403 Forbidden"}]}}"#,
        );

        assert_eq!(
            out,
            vec![
                Output::Console(ConsoleLine::new(Glyph::Cross, "Tool error: Error: 403 Forbidden")),
                Output::Error(ErrorReport {
                    error_type: ErrorType::Http403,
                    tool_name: "WebFetch".to_string(),
                    message: "Error: 403 Forbidden".to_string(),
                    context: Some(json!({"url": "http://x"})),
                }),
            ]
        );
    }

    #[test]
    fn test_tool_error_without_prior_call() {
        let mut formatter = Formatter::new();
        let content = "e".repeat(250);
        let line = json!({"type": "user", "message": {"content": [
            {"type": "tool_result", "tool_use_id": "missing", "is_error": true, "content": content}
        ]}});
        let out = format_line(&mut formatter, &line.to_string());

        assert_eq!(console_text(&out), vec![format!("❌ Tool error: {}", "e".repeat(80))]);
        let Output::Error(report) = &out[1] else {
            panic!("expected error report");
        };
        assert_eq!(report.tool_name, "unknown");
        assert_eq!(report.error_type, ErrorType::ToolError);
        assert_eq!(report.message.chars().count(), 200);
        assert!(report.context.is_none());
    }

    #[test]
    fn test_structured_error_content_is_stringified() {
        let mut formatter = Formatter::new();
        let out = format_line(
            &mut formatter,
            r#"{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":"t9","is_error":true,"content":[{"type":"text","text":"Command failed: exit code 1"}]}]}}"#,
        );
        let Output::Error(report) = &out[1] else {
            panic!("expected error report");
        };
        assert_eq!(report.error_type, ErrorType::ExitCode);
        assert_eq!(
            report.message,
            r#"[{"type":"text","text":"Command failed: exit code 1"}]"#
        );
    }

    #[test]
    fn test_successful_tool_results_are_silent() {
        let mut formatter = Formatter::new();
        let out = format_line(
            &mut formatter,
            r#"{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":"t1","content":"ok"},{"type":"tool_result","tool_use_id":"t2","is_error":false,"content":"ok"}]}}"#,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_result_summary() {
        let mut formatter = Formatter::new();
        let out = format_line(
            &mut formatter,
            r#"{"type":"result","subtype":"","total_cost_usd":1.23456,"num_turns":7,"permission_denials":[]}"#,
        );
        assert_eq!(console_text(&out), vec!["✅ Done: 7 turns, $1.2346"]);
    }

    #[test]
    fn test_result_defaults_and_max_turns() {
        let mut formatter = Formatter::new();
        let out = format_line(&mut formatter, r#"{"type":"result","subtype":"error_max_turns"}"#);
        assert_eq!(
            console_text(&out),
            vec!["✅ Done: 0 turns, $0.0000", "⚠️  Hit max turns limit"]
        );
    }

    #[test]
    fn test_result_with_denials() {
        let mut formatter = Formatter::new();
        let out = format_line(
            &mut formatter,
            r#"{"type":"result","subtype":"success","total_cost_usd":0.1,"num_turns":2,"permission_denials":[{"tool_name":"Bash","tool_input":{"command":"rm -rf build"}},{"tool_name":"Write"}]}"#,
        );

        assert_eq!(
            console_text(&out),
            vec![
                "⚠️  Permission denied for 2 tool calls",
                r#"   - Bash: {"command":"rm -rf build"}"#,
                "   - Write: {}",
                "✅ Done: 2 turns, $0.1000",
            ]
        );

        let reports: Vec<&ErrorReport> = out
            .iter()
            .filter_map(|o| match o {
                Output::Error(report) => Some(report),
                Output::Console(_) => None,
            })
            .collect();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].error_type, ErrorType::PermissionDenied);
        assert_eq!(reports[0].tool_name, "Bash");
        assert_eq!(reports[0].message, DENIAL_MESSAGE);
        assert_eq!(reports[0].context, Some(json!({"command": "rm -rf build"})));
        assert_eq!(reports[1].tool_name, "Write");
        assert!(reports[1].context.is_none());
    }

    #[test]
    fn test_long_denial_input_is_truncated() {
        let mut formatter = Formatter::new();
        let line = json!({"type": "result", "num_turns": 1, "permission_denials": [
            {"tool_name": "Bash", "tool_input": {"command": "x".repeat(100)}}
        ]});
        let out = format_line(&mut formatter, &line.to_string());

        let lines = console_text(&out);
        assert_eq!(lines[1], format!(r#"   - Bash: {{"command":"{}"#, "x".repeat(48)));

        // The log keeps the full input
        let Output::Error(report) = &out[2] else {
            panic!("expected error report");
        };
        assert_eq!(report.context, Some(json!({"command": "x".repeat(100)})));
    }

    #[test]
    fn test_other_events_produce_nothing() {
        let mut formatter = Formatter::new();
        let out = format_line(&mut formatter, r#"{"type":"system","subtype":"init","tools":[]}"#);
        assert!(out.is_empty());
    }
}
