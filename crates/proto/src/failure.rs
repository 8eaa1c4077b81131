//! Closed failure taxonomy surfaced by tool handlers.
//!
//! Handlers never propagate errors to the host framework; every failure is
//! converted into a [`ToolFailure`] and rendered as a JSON error document.

use serde_json::{Value, json};

use crate::error::LlmError;

/// Classification of a tool handler failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Malformed or incomplete input, detected before any external call.
    InvalidInput,
    /// No model-access handle could be resolved for the configured name.
    UpstreamUnavailable,
    /// HTTP fetch or model API call failed.
    NetworkFailure,
    /// External test-runner process failed to execute.
    ExecutionFailure,
    /// Filesystem or other internal failure.
    InternalFailure,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::InvalidInput => "InvalidInput",
            FailureKind::UpstreamUnavailable => "UpstreamUnavailable",
            FailureKind::NetworkFailure => "NetworkFailure",
            FailureKind::ExecutionFailure => "ExecutionFailure",
            FailureKind::InternalFailure => "InternalFailure",
        };
        write!(f, "{name}")
    }
}

/// A handler failure carrying a message and an optional trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable message. Rendered verbatim for input/upstream kinds.
    pub message: String,
    /// Optional diagnostic trace attached to the JSON document.
    pub trace: Option<String>,
}

impl ToolFailure {
    /// Creates a failure of the given kind.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: None,
        }
    }

    /// Malformed/incomplete input, rejected before any external call.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidInput, message)
    }

    /// No model-access handle available for the configured name.
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::UpstreamUnavailable, message)
    }

    /// Network or HTTP-status failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NetworkFailure, message)
    }

    /// External process failure.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ExecutionFailure, message)
    }

    /// Filesystem or other internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InternalFailure, message)
    }

    /// Attaches a diagnostic trace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Renders the failure as the JSON error document returned to the host.
    ///
    /// Input and upstream failures keep their message verbatim; the other
    /// kinds are prefixed with the kind name and carry the trace when one
    /// was attached.
    pub fn to_json(&self) -> Value {
        match self.kind {
            FailureKind::InvalidInput | FailureKind::UpstreamUnavailable => {
                json!({ "error": self.message })
            }
            _ => {
                let mut doc = json!({ "error": format!("{}: {}", self.kind, self.message) });
                if let Some(trace) = &self.trace {
                    doc["traceback"] = Value::String(trace.clone());
                }
                doc
            }
        }
    }
}

impl From<LlmError> for ToolFailure {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Serialization(msg) => ToolFailure::internal(msg),
            other => ToolFailure::network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_renders_message_verbatim() {
        let failure = ToolFailure::invalid_input("Both 'a' and 'b' must be provided.");
        assert_eq!(
            failure.to_json(),
            json!({"error": "Both 'a' and 'b' must be provided."})
        );
    }

    #[test]
    fn upstream_unavailable_renders_without_trace() {
        let failure =
            ToolFailure::upstream_unavailable("Unable to access LLM for content analysis")
                .with_trace("ignored for this kind");
        let doc = failure.to_json();
        assert_eq!(doc["error"], "Unable to access LLM for content analysis");
        assert!(doc.get("traceback").is_none());
    }

    #[test]
    fn network_failure_is_kind_prefixed() {
        let failure = ToolFailure::network("connection refused");
        assert_eq!(
            failure.to_json()["error"],
            "NetworkFailure: connection refused"
        );
    }

    #[test]
    fn execution_failure_carries_traceback() {
        let failure = ToolFailure::execution("runner exited abnormally").with_trace("spawn: ENOENT");
        let doc = failure.to_json();
        assert_eq!(doc["error"], "ExecutionFailure: runner exited abnormally");
        assert_eq!(doc["traceback"], "spawn: ENOENT");
    }

    #[test]
    fn internal_failure_without_trace_has_no_traceback_key() {
        let doc = ToolFailure::internal("disk full").to_json();
        assert_eq!(doc["error"], "InternalFailure: disk full");
        assert!(doc.get("traceback").is_none());
    }

    #[test]
    fn kind_display_names_are_stable() {
        assert_eq!(FailureKind::InvalidInput.to_string(), "InvalidInput");
        assert_eq!(
            FailureKind::UpstreamUnavailable.to_string(),
            "UpstreamUnavailable"
        );
        assert_eq!(FailureKind::NetworkFailure.to_string(), "NetworkFailure");
        assert_eq!(FailureKind::ExecutionFailure.to_string(), "ExecutionFailure");
        assert_eq!(FailureKind::InternalFailure.to_string(), "InternalFailure");
    }

    #[test]
    fn llm_api_error_converts_to_network_failure() {
        let failure: ToolFailure = LlmError::Api("upstream 500".to_string()).into();
        assert_eq!(failure.kind, FailureKind::NetworkFailure);
        assert_eq!(failure.message, "upstream 500");
    }

    #[test]
    fn llm_serialization_error_converts_to_internal_failure() {
        let failure: ToolFailure = LlmError::Serialization("bad schema".to_string()).into();
        assert_eq!(failure.kind, FailureKind::InternalFailure);
    }
}
