use std::path::{Path, PathBuf};

use proto::ConfigError;
use serde::Deserialize;
use tools::ToolConfig;
use tracing::debug;

/// Known LLM provider presets.
///
/// Each preset auto-configures `base_url` so that users only have to specify
/// what differs from the preset defaults.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderPreset {
    /// OpenAI API (api.openai.com). Default.
    #[default]
    OpenAi,
    /// Fully custom OpenAI-compatible endpoint: set `base_url` manually.
    Custom,
}

impl ProviderPreset {
    /// Canonical lowercase name, used as a secondary registry binding.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Custom => "custom",
        }
    }
}

impl std::str::FromStr for ProviderPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Model/provider config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider preset: openai | custom.
    pub provider: ProviderPreset,
    /// Model ID.
    pub model: String,
    /// API key (env overrides applied at load time; see `Config::load`).
    pub api_key: String,
    /// Explicit API base URL. Required for `provider = "custom"`.
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderPreset::default(),
            model: default_model(),
            api_key: String::new(),
            base_url: String::new(),
        }
    }
}

impl ProviderConfig {
    /// Returns the explicit base URL, if any.
    pub fn effective_base_url(&self) -> Option<&str> {
        if self.base_url.is_empty() {
            None
        } else {
            Some(self.base_url.as_str())
        }
    }
}

/// Artifact output config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where generated scripts and plans are written.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

/// Per-tool registration overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Webpage analyzer overrides.
    pub web_navigator: Option<ToolConfig>,
    /// Code generator overrides.
    pub generate_test_automation_code: Option<ToolConfig>,
    /// Test-plan generator overrides.
    pub generate_test_plan_markdown: Option<ToolConfig>,
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider/model configuration.
    pub provider: ProviderConfig,
    /// Artifact output configuration.
    pub output: OutputConfig,
    /// Per-tool registration overrides.
    pub tools: ToolsConfig,
}

impl Config {
    /// Loads configuration from explicit path, fallback locations, and env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(|p| p.to_path_buf()).or_else(|| {
            // Look in current dir, then home dir
            let cwd = std::env::current_dir().ok()?.join("navqa.toml");
            if cwd.exists() {
                return Some(cwd);
            }
            let home = std::env::var("HOME").ok()?;
            let home_config = PathBuf::from(home).join(".navqa").join("navqa.toml");
            if home_config.exists() {
                return Some(home_config);
            }
            None
        });
        debug!(path = ?config_path, "Config file resolved");

        let mut config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(|e| ConfigError::Toml(e.to_string()))?
        } else {
            Config::default()
        };

        if let Ok(key) = std::env::var("NAVQA_API_KEY") {
            config.provider.api_key = key;
        }
        if let Ok(model) = std::env::var("NAVQA_MODEL") {
            config.provider.model = model;
        }

        debug!(
            provider = %config.provider.provider.name(),
            model = %config.provider.model,
            base_url = ?config.provider.effective_base_url(),
            "Config loaded"
        );
        Ok(config)
    }

    /// Resolves the API key to use for the configured provider.
    ///
    /// Priority:
    /// 1. `provider.api_key` in config file (or `NAVQA_API_KEY` applied at load time)
    /// 2. `OPENAI_API_KEY` environment variable
    pub fn resolve_api_key(&self) -> String {
        if !self.provider.api_key.is_empty() {
            debug!(source = "config", "API key resolved");
            return self.provider.api_key.clone();
        }

        let fallback = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if fallback.is_empty() {
            debug!("No API key found from any source");
        } else {
            debug!(source = "env", "API key resolved from OPENAI_API_KEY");
        }
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, content).expect("write config");
    }

    #[test]
    fn default_config_has_expected_values() {
        let cfg = Config::default();
        assert_eq!(cfg.provider.provider, ProviderPreset::OpenAi);
        assert_eq!(cfg.provider.model, "gpt-4o-mini");
        assert_eq!(cfg.output.dir, "output");
        assert!(cfg.tools.web_navigator.is_none());
    }

    #[test]
    fn load_reads_explicit_file_path() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config_path = tmp.path().join("navqa.toml");
        write_file(
            &config_path,
            r#"
[provider]
provider = "custom"
model = "llama3.2"
api_key = "from_file"
base_url = "http://localhost:11434/v1"

[output]
dir = "/tmp/navqa-artifacts"

[tools.web_navigator]
description = "Custom analyzer description"
llm_name = "local_llm"
"#,
        );
        let cfg = Config::load(Some(&config_path)).expect("config should parse");
        assert_eq!(cfg.provider.provider, ProviderPreset::Custom);
        assert_eq!(cfg.provider.model, "llama3.2");
        assert_eq!(cfg.provider.api_key, "from_file");
        assert_eq!(
            cfg.provider.effective_base_url(),
            Some("http://localhost:11434/v1")
        );
        assert_eq!(cfg.output.dir, "/tmp/navqa-artifacts");

        let nav = cfg.tools.web_navigator.expect("tool override");
        assert_eq!(nav.description, "Custom analyzer description");
        assert_eq!(nav.llm_name, "local_llm");
    }

    #[test]
    fn load_returns_toml_error_for_invalid_content() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config_path = tmp.path().join("navqa.toml");
        write_file(&config_path, "[provider\nmodel = \"broken\"");
        let err = Config::load(Some(&config_path)).expect_err("invalid toml must fail");
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn resolve_api_key_prefers_config_key() {
        let mut cfg = Config::default();
        cfg.provider.api_key = "abc123".to_string();
        assert_eq!(cfg.resolve_api_key(), "abc123");
    }

    #[test]
    fn provider_preset_from_str_is_stable() {
        assert_eq!(
            "openai".parse::<ProviderPreset>().ok(),
            Some(ProviderPreset::OpenAi)
        );
        assert_eq!(
            "custom".parse::<ProviderPreset>().ok(),
            Some(ProviderPreset::Custom)
        );
        assert!("anthropic".parse::<ProviderPreset>().is_err());
    }

    #[test]
    fn tool_override_defaults_llm_name_when_omitted() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config_path = tmp.path().join("navqa.toml");
        write_file(
            &config_path,
            r#"
[tools.generate_test_plan_markdown]
description = "Plan writer"
"#,
        );
        let cfg = Config::load(Some(&config_path)).expect("config should parse");
        let plan = cfg.tools.generate_test_plan_markdown.expect("override");
        assert_eq!(plan.llm_name, "openai_llm");
    }
}
