//! Test-automation code generator: produce a Cypress script, run it, and
//! attempt one repair pass when the run fails.

use std::sync::Arc;

use async_trait::async_trait;
use llm::{ChatMessage, ProviderRegistry};
use proto::{ToolFailure, ToolResult};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::artifact::{OutputDir, test_script_name};
use crate::normalize::{parse_code_request, raw_payload};
use crate::runner::{CypressRunner, FailureClassifier, SubstringClassifier, TestRunner};
use crate::{Tool, ToolConfig, prompts};

/// Tool that generates a Cypress test script for a test case, persists it,
/// executes it, and rewrites it once if the run is classified as failing.
pub struct TestCodeGenTool {
    config: ToolConfig,
    providers: Arc<ProviderRegistry>,
    runner: Arc<dyn TestRunner>,
    classifier: Arc<dyn FailureClassifier>,
    output: OutputDir,
}

impl TestCodeGenTool {
    /// Creates the tool with the Cypress runner and default classifier.
    pub fn new(providers: Arc<ProviderRegistry>, output: OutputDir) -> Self {
        Self {
            config: ToolConfig::new(
                "Generates Cypress JS test automation code for a given test case and start \
                 page URL. Input: JSON with 'test_case' and 'start_page_url'. Output: status \
                 and path of the generated test file.",
            ),
            providers,
            runner: Arc::new(CypressRunner::new()),
            classifier: Arc::new(SubstringClassifier::default()),
            output,
        }
    }

    /// Replaces the registration config.
    pub fn with_config(mut self, config: ToolConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the test runner.
    pub fn with_runner(mut self, runner: Arc<dyn TestRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replaces the success/failure classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn FailureClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    async fn generate(&self, args: Value) -> Result<Value, ToolFailure> {
        let request = parse_code_request(&raw_payload(&args))?;

        let llm = self
            .providers
            .resolve(&self.config.llm_name)
            .ok_or_else(|| {
                ToolFailure::upstream_unavailable("Unable to access LLM for code generation.")
            })?;

        let prompt = prompts::cypress_generation(
            &request.start_page_url,
            &request.test_case,
            request.relevant_html.as_deref().unwrap_or(""),
        );
        let code = llm
            .complete(&[ChatMessage::user(prompt)])
            .await
            .map_err(ToolFailure::from)?
            .trim()
            .to_string();

        let filename = test_script_name(&request.test_case);
        let path = self
            .output
            .write(&filename, &code)
            .map_err(|e| ToolFailure::internal(e.to_string()).with_trace(format!("{e:?}")))?;
        info!("Wrote generated test script: {}", path.display());

        let runner_output = self
            .runner
            .run(&path)
            .await
            .map_err(|e| ToolFailure::execution(e.to_string()).with_trace(format!("{e:?}")))?;

        if self.classifier.is_failing(&runner_output) {
            info!("Test run classified as failing, attempting one repair pass");
            let fixed = llm
                .complete(&[ChatMessage::user(prompts::cypress_repair(
                    &code,
                    &runner_output,
                ))])
                .await
                .map_err(ToolFailure::from)?
                .trim()
                .to_string();
            self.output
                .write(&filename, &fixed)
                .map_err(|e| ToolFailure::internal(e.to_string()).with_trace(format!("{e:?}")))?;
        }

        Ok(json!({
            "result": "1 test case generated",
            "test_file_path": path.to_string_lossy(),
        }))
    }
}

#[async_trait]
impl Tool for TestCodeGenTool {
    fn name(&self) -> &str {
        "generate_test_automation_code"
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "test_case": {
                    "type": "string",
                    "description": "Description of the test case to automate"
                },
                "start_page_url": {
                    "type": "string",
                    "description": "URL the test starts from"
                },
                "relevant_html_content_to_test": {
                    "type": "string",
                    "description": "HTML context for the elements under test"
                }
            },
            "required": ["test_case", "start_page_url"]
        })
    }

    async fn execute(&self, call_id: &str, args: Value) -> ToolResult {
        match self.generate(args).await {
            Ok(doc) => ToolResult::success(call_id, self.name(), doc.to_string()),
            Err(failure) => {
                warn!("Failed to generate test code: {}", failure.message);
                ToolResult::failure(call_id, self.name(), &failure)
            }
        }
    }
}
