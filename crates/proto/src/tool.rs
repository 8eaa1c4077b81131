//! Tool definition and result types exchanged with the host framework.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::failure::ToolFailure;

/// Declaration of a tool exposed to the host framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name used for registration and dispatch.
    pub name: String,
    /// Human-readable description for tool selection.
    pub description: String,
    /// JSON schema for accepted arguments.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Creates a tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Result of a single tool invocation.
///
/// `output` is always a well-formed JSON document: success fields on the
/// happy path, an `{"error": ...}` document otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Host-supplied call id this result answers.
    pub call_id: String,
    /// Name of the tool that produced the result.
    pub tool_name: String,
    /// JSON document with the tool output.
    pub output: String,
    /// Whether `output` is an error document.
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a success result.
    pub fn success(call_id: &str, tool_name: &str, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.to_string(),
            tool_name: tool_name.to_string(),
            output: output.into(),
            is_error: false,
        }
    }

    /// Creates an error result from a raw message document.
    pub fn error(call_id: &str, tool_name: &str, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.to_string(),
            tool_name: tool_name.to_string(),
            output: output.into(),
            is_error: true,
        }
    }

    /// Creates an error result rendering a [`ToolFailure`] as JSON.
    pub fn failure(call_id: &str, tool_name: &str, failure: &ToolFailure) -> Self {
        Self::error(call_id, tool_name, failure.to_json().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_new_sets_fields() {
        let def = ToolDefinition::new(
            "web_navigator",
            "Analyzes a webpage",
            serde_json::json!({"type":"object"}),
        );
        assert_eq!(def.name, "web_navigator");
        assert_eq!(def.description, "Analyzes a webpage");
        assert_eq!(def.parameters["type"], "object");
    }

    #[test]
    fn success_result_is_not_error() {
        let result = ToolResult::success("c1", "web_navigator", r#"{"urls":[]}"#);
        assert!(!result.is_error);
        assert_eq!(result.call_id, "c1");
        assert_eq!(result.tool_name, "web_navigator");
    }

    #[test]
    fn failure_result_embeds_error_document() {
        let failure = ToolFailure::invalid_input("At least one test case must be provided.");
        let result = ToolResult::failure("c2", "generate_test_plan_markdown", &failure);
        assert!(result.is_error);

        let doc: Value = serde_json::from_str(&result.output).expect("well-formed JSON");
        assert_eq!(doc["error"], "At least one test case must be provided.");
    }

    #[test]
    fn result_round_trips_through_serde() {
        let result = ToolResult::success("c3", "generate_test_plan_markdown", r#"{"result":"ok"}"#);
        let encoded = serde_json::to_string(&result).expect("serialize");
        let decoded: ToolResult = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded.call_id, "c3");
        assert!(!decoded.is_error);
    }
}
