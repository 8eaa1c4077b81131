use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem read error.
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(String),
}

/// LLM provider errors
#[derive(Debug, Error)]
pub enum LlmError {
    /// Remote API failure.
    #[error("{0}")]
    Api(String),

    /// Provider throttled the request.
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Provider response schema/content was invalid.
    #[error("Invalid response from LLM: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Tool execution errors
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool process or operation failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Filesystem/process IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_config_toml_error() {
        let err = ConfigError::Toml("expected table".to_string());
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn wraps_config_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConfigError::from(io);
        assert!(err.to_string().contains("IO error reading config"));
    }

    #[test]
    fn llm_error_display_variants_are_stable() {
        assert_eq!(LlmError::Api("upstream 500".to_string()).to_string(), "upstream 500");
        assert_eq!(LlmError::RateLimit.to_string(), "Rate limit exceeded");
        assert!(
            LlmError::InvalidResponse("no choices".to_string())
                .to_string()
                .contains("Invalid response")
        );
    }

    #[test]
    fn tool_error_wraps_process_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "npx missing");
        let err = ToolError::from(io);
        assert!(err.to_string().contains("IO error"));

        let err = ToolError::ExecutionFailed("runner crashed".to_string());
        assert_eq!(err.to_string(), "Execution failed: runner crashed");
    }
}
