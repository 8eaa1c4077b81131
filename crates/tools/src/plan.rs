//! Test-plan document generator: render a decorated markdown plan and
//! persist it under the output directory.

use std::sync::Arc;

use async_trait::async_trait;
use llm::{ChatMessage, ProviderRegistry};
use proto::{ToolFailure, ToolResult};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::artifact::{OutputDir, plan_file_name};
use crate::normalize::parse_plan_request;
use crate::{Tool, ToolConfig, prompts};

/// Placeholder used when the payload carries no test plan name.
const DEFAULT_TEST_NAME: &str = "Untitled Test Plan";

/// Tool that asks the model for a decorated markdown test plan and writes
/// it to a dated file.
pub struct TestPlanTool {
    config: ToolConfig,
    providers: Arc<ProviderRegistry>,
    output: OutputDir,
}

impl TestPlanTool {
    /// Creates the tool with its default registration config.
    pub fn new(providers: Arc<ProviderRegistry>, output: OutputDir) -> Self {
        Self {
            config: ToolConfig::new(
                "Generates a markdown file with a comprehensive test plan including \
                 emoticons. Input: JSON with 'test_name', 'application_url', and \
                 'test_cases'. Output: Path to the created markdown file.",
            ),
            providers,
            output,
        }
    }

    /// Replaces the registration config.
    pub fn with_config(mut self, config: ToolConfig) -> Self {
        self.config = config;
        self
    }

    async fn generate(&self, args: Value) -> Result<Value, ToolFailure> {
        let data = parse_plan_request(&args)?;

        let test_name = data
            .get("test_name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TEST_NAME)
            .to_string();
        let application_url = data
            .get("application_url")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let test_cases: Vec<String> = match data.get("test_cases") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };

        if test_cases.is_empty() {
            return Err(ToolFailure::invalid_input(
                "At least one test case must be provided.",
            ));
        }

        let llm = self
            .providers
            .resolve(&self.config.llm_name)
            .ok_or_else(|| {
                ToolFailure::upstream_unavailable("Unable to access LLM for test plan generation.")
            })?;

        let prompt = prompts::test_plan(&test_name, &application_url, &test_cases);
        let markdown = llm
            .complete(&[ChatMessage::user(prompt)])
            .await
            .map_err(ToolFailure::from)?
            .trim()
            .to_string();

        let date = chrono::Local::now().format("%Y%m%d").to_string();
        let filename = plan_file_name(&date, &test_name);
        let path = self
            .output
            .write(&filename, &markdown)
            .map_err(|e| ToolFailure::internal(e.to_string()).with_trace(format!("{e:?}")))?;
        info!("Wrote test plan: {}", path.display());

        Ok(json!({
            "result": "Test plan markdown generated successfully",
            "file_path": path.to_string_lossy(),
        }))
    }
}

#[async_trait]
impl Tool for TestPlanTool {
    fn name(&self) -> &str {
        "generate_test_plan_markdown"
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "test_name": {
                    "type": "string",
                    "description": "Name of the test plan"
                },
                "application_url": {
                    "type": "string",
                    "description": "URL of the application under test"
                },
                "test_cases": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Test case descriptions to include"
                }
            },
            "required": ["test_cases"]
        })
    }

    async fn execute(&self, call_id: &str, args: Value) -> ToolResult {
        match self.generate(args).await {
            Ok(doc) => ToolResult::success(call_id, self.name(), doc.to_string()),
            Err(failure) => {
                warn!("Failed to generate test plan: {}", failure.message);
                ToolResult::failure(call_id, self.name(), &failure)
            }
        }
    }
}
