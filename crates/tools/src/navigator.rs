//! Webpage analyzer tool: fetch a page, extract links and propose test cases.

use std::sync::Arc;

use async_trait::async_trait;
use llm::{ChatMessage, ProviderRegistry};
use proto::{ToolFailure, ToolResult};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::normalize::{clip_chars, non_empty_lines, raw_payload, resolve_url_query};
use crate::{Tool, ToolConfig, prompts};

/// Upper bound on HTML characters fed to each prompt.
const HTML_CLIP_CHARS: usize = 15_000;

/// Tool that fetches a webpage and returns relevant links plus proposed
/// test-case descriptions, both produced by the model.
pub struct WebNavigatorTool {
    config: ToolConfig,
    providers: Arc<ProviderRegistry>,
    client: Client,
}

impl WebNavigatorTool {
    /// Creates the tool with its default registration config.
    pub fn new(providers: Arc<ProviderRegistry>) -> Self {
        Self::with_config(
            providers,
            ToolConfig::new(
                "Fetches and analyzes a webpage, returning structured data with relevant \
                 URLs and test case descriptions.",
            ),
        )
    }

    /// Creates the tool with an explicit registration config.
    pub fn with_config(providers: Arc<ProviderRegistry>, config: ToolConfig) -> Self {
        Self {
            config,
            providers,
            client: Client::new(),
        }
    }

    async fn analyze(&self, args: Value) -> Result<Value, ToolFailure> {
        let url = resolve_url_query(&raw_payload(&args));
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ToolFailure::invalid_input(
                "Please provide a valid URL starting with http:// or https://",
            ));
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ToolFailure::network(e.to_string()))?;
        let html = response
            .text()
            .await
            .map_err(|e| ToolFailure::network(e.to_string()))?;
        info!("Fetched HTML content from {url}");

        let llm = self
            .providers
            .resolve(&self.config.llm_name)
            .ok_or_else(|| {
                ToolFailure::upstream_unavailable("Unable to access LLM for content analysis")
            })?;

        let html = clip_chars(&html, HTML_CLIP_CHARS);

        let url_response = llm
            .complete(&[ChatMessage::user(prompts::link_extraction(html))])
            .await
            .map_err(ToolFailure::from)?;
        let urls = non_empty_lines(&url_response);

        let test_response = llm
            .complete(&[ChatMessage::user(prompts::test_case_proposal(html))])
            .await
            .map_err(ToolFailure::from)?;
        let tests = non_empty_lines(&test_response);

        Ok(json!({ "urls": urls, "tests": tests }))
    }
}

#[async_trait]
impl Tool for WebNavigatorTool {
    fn name(&self) -> &str {
        "web_navigator"
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "URL of the webpage to analyze"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, call_id: &str, args: Value) -> ToolResult {
        match self.analyze(args).await {
            Ok(doc) => ToolResult::success(call_id, self.name(), doc.to_string()),
            Err(failure) => {
                warn!("Failed to analyze webpage: {}", failure.message);
                ToolResult::failure(call_id, self.name(), &failure)
            }
        }
    }
}
