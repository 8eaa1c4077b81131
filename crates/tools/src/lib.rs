//! Tool trait and the QA tool handler implementations.
//!
//! The hosting agent framework uses this crate to expose three stateless,
//! LLM-backed capabilities: webpage analysis, browser-test code generation
//! with a one-shot repair pass, and test-plan document generation.

pub mod artifact;
pub mod codegen;
pub mod navigator;
pub mod normalize;
pub mod plan;
pub mod prompts;
pub mod registry;
pub mod runner;

pub use artifact::OutputDir;
pub use codegen::TestCodeGenTool;
pub use navigator::WebNavigatorTool;
pub use plan::TestPlanTool;
pub use registry::ToolRegistry;
pub use runner::{CypressRunner, FailureClassifier, SubstringClassifier, TestRunner};

use async_trait::async_trait;
use proto::ToolResult;
use serde::Deserialize;

/// Name the configured default model handle is registered under.
pub const DEFAULT_LLM_NAME: &str = "openai_llm";

/// Trait that all tools must implement
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name exposed to the host framework.
    fn name(&self) -> &str;
    /// Human-readable description for tool selection.
    fn description(&self) -> &str;
    /// JSON schema for accepted tool arguments.
    fn parameters_schema(&self) -> serde_json::Value;
    /// Executes the tool with the given call id and JSON args.
    async fn execute(&self, call_id: &str, args: serde_json::Value) -> ToolResult;
}

/// Registration config shared by all tools: a description and the name of
/// the model-access handle to resolve at invocation time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Description shown to the host framework.
    pub description: String,
    /// Name of the LLM handle resolved from the provider registry.
    pub llm_name: String,
}

impl ToolConfig {
    /// Creates a config with the given description and the default handle name.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            llm_name: DEFAULT_LLM_NAME.to_string(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_config_defaults_to_named_default_handle() {
        let config = ToolConfig::new("Analyzes a webpage");
        assert_eq!(config.description, "Analyzes a webpage");
        assert_eq!(config.llm_name, "openai_llm");
    }

    #[test]
    fn tool_config_deserializes_with_default_llm_name() {
        let config: ToolConfig =
            serde_json::from_str(r#"{"description":"custom"}"#).expect("config");
        assert_eq!(config.description, "custom");
        assert_eq!(config.llm_name, "openai_llm");
    }

    #[test]
    fn tool_config_deserializes_explicit_llm_name() {
        let config: ToolConfig =
            serde_json::from_str(r#"{"description":"d","llm_name":"local_llm"}"#).expect("config");
        assert_eq!(config.llm_name, "local_llm");
    }
}
