//! CLI entrypoint: loads config, wires providers and tools, runs one command.

mod config;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use llm::{LlmProvider, OpenAiProvider, ProviderRegistry};
use tools::{
    DEFAULT_LLM_NAME, OutputDir, TestCodeGenTool, TestPlanTool, ToolRegistry, WebNavigatorTool,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Top-level command-line arguments for the navqa application.
#[derive(Parser)]
#[command(name = "navqa")]
#[command(about = "LLM-backed QA tool suite", version = "0.1.0")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI subcommands available in the application.
#[derive(Subcommand)]
enum Commands {
    /// List registered tools and their parameter schemas
    List,

    /// Run a single tool and print its JSON output
    Run {
        /// Tool name (web_navigator, generate_test_automation_code,
        /// generate_test_plan_markdown)
        tool: String,

        /// JSON arguments for the tool
        #[arg(short, long)]
        input: String,
    },
}

fn build_providers(config: &Config) -> Arc<ProviderRegistry> {
    let api_key = config.resolve_api_key();
    let provider: Arc<dyn LlmProvider> = match config.provider.effective_base_url() {
        Some(base_url) => Arc::new(OpenAiProvider::with_base_url(
            api_key,
            base_url,
            &config.provider.model,
        )),
        None => Arc::new(OpenAiProvider::new(api_key, &config.provider.model)),
    };

    let mut registry = ProviderRegistry::new();
    registry.register(DEFAULT_LLM_NAME, provider.clone());
    registry.register(config.provider.provider.name(), provider);
    Arc::new(registry)
}

fn build_tools(config: &Config, providers: Arc<ProviderRegistry>) -> ToolRegistry {
    let output = OutputDir::new(&config.output.dir);

    let mut navigator = WebNavigatorTool::new(providers.clone());
    if let Some(tool_config) = config.tools.web_navigator.clone() {
        navigator = WebNavigatorTool::with_config(providers.clone(), tool_config);
    }

    let mut codegen = TestCodeGenTool::new(providers.clone(), output.clone());
    if let Some(tool_config) = config.tools.generate_test_automation_code.clone() {
        codegen = codegen.with_config(tool_config);
    }

    let mut plan = TestPlanTool::new(providers, output);
    if let Some(tool_config) = config.tools.generate_test_plan_markdown.clone() {
        plan = plan.with_config(tool_config);
    }

    let mut registry = ToolRegistry::new();
    registry.register(navigator);
    registry.register(codegen);
    registry.register(plan);
    registry
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    let providers = build_providers(&config);
    let tools = build_tools(&config, providers);

    match cli.command {
        Commands::List => {
            let mut definitions = tools.definitions();
            definitions.sort_by(|a, b| a.name.cmp(&b.name));
            for def in definitions {
                println!("{}", def.name);
                println!("  {}", def.description);
                println!("  parameters: {}", def.parameters);
            }
        }
        Commands::Run { tool, input } => {
            if !tools.tool_names().contains(&tool.as_str()) {
                bail!(
                    "unknown tool '{tool}' (available: {})",
                    tools.tool_names().join(", ")
                );
            }
            let args: serde_json::Value =
                serde_json::from_str(&input).context("failed to parse --input as JSON")?;

            info!("Running tool: {tool}");
            let result = tools.execute("cli", &tool, args).await;
            // Error-shaped output is still data; the exit code stays 0.
            println!("{}", result.output);
        }
    }

    Ok(())
}
