//! External test-runner boundary and failure classification.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use proto::ToolError;
use tokio::process::Command;
use tracing::debug;

/// Runs a generated test script and returns the combined process output.
///
/// The invocation blocks until the subprocess exits; no timeout is enforced.
#[async_trait]
pub trait TestRunner: Send + Sync {
    /// Executes the script at `spec_path`, returning stdout and stderr
    /// concatenated.
    async fn run(&self, spec_path: &Path) -> Result<String, ToolError>;
}

/// Runner invoking `npx cypress run --spec <path>`.
pub struct CypressRunner {
    program: String,
}

impl CypressRunner {
    /// Creates a runner using `npx` from the PATH.
    pub fn new() -> Self {
        Self {
            program: "npx".to_string(),
        }
    }

    /// Creates a runner invoking a custom program in place of `npx`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CypressRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TestRunner for CypressRunner {
    async fn run(&self, spec_path: &Path) -> Result<String, ToolError> {
        debug!("Running test script: {}", spec_path.display());

        let output = Command::new(&self.program)
            .args(["cypress", "run", "--spec"])
            .arg(spec_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ))
    }
}

/// Decides whether runner output signals a failed test run.
pub trait FailureClassifier: Send + Sync {
    /// Returns `true` when the output indicates failure.
    fn is_failing(&self, runner_output: &str) -> bool;
}

/// Classifier matching a case-insensitive substring of the runner output.
///
/// The default needle is `"failing"`, which is what Cypress prints in its
/// run summary for failed specs.
pub struct SubstringClassifier {
    needle: String,
}

impl SubstringClassifier {
    /// Creates a classifier for the given needle.
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into().to_lowercase(),
        }
    }
}

impl Default for SubstringClassifier {
    fn default() -> Self {
        Self::new("failing")
    }
}

impl FailureClassifier for SubstringClassifier {
    fn is_failing(&self, runner_output: &str) -> bool {
        runner_output.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_classifier_matches_failing_case_insensitively() {
        let classifier = SubstringClassifier::default();
        assert!(classifier.is_failing("  1 passing\n  2 FAILING"));
        assert!(classifier.is_failing("1 failing"));
        assert!(!classifier.is_failing("All specs passed!"));
    }

    #[test]
    fn custom_needle_is_matched_case_insensitively() {
        let classifier = SubstringClassifier::new("ASSERTION ERROR");
        assert!(classifier.is_failing("assertion error: expected 1 to equal 2"));
        assert!(!classifier.is_failing("1 failing"));
    }

    #[tokio::test]
    async fn runner_captures_combined_output() {
        // `echo` stands in for npx: it prints its arguments and exits 0.
        let runner = CypressRunner::with_program("echo");
        let output = runner.run(Path::new("/tmp/spec.cy.js")).await.expect("run");
        assert!(output.contains("cypress run --spec /tmp/spec.cy.js"));
    }

    #[tokio::test]
    async fn runner_surfaces_spawn_failure_as_io_error() {
        let runner = CypressRunner::with_program("definitely-not-a-real-program-xyz");
        let err = runner
            .run(Path::new("/tmp/spec.cy.js"))
            .await
            .expect_err("missing program");
        assert!(matches!(err, ToolError::Io(_)));
    }

    #[test]
    fn default_runner_uses_npx() {
        let runner = CypressRunner::default();
        assert_eq!(runner.program, "npx");
    }
}
