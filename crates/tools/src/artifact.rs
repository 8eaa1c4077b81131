//! Generated-artifact persistence under the fixed output directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::normalize::{clip_chars, slugify};

/// Suffix appended to generated browser-test scripts.
pub const TEST_SCRIPT_SUFFIX: &str = ".cy.js";

/// Maximum slug length used for test-script filenames.
const SCRIPT_SLUG_MAX_CHARS: usize = 40;

/// Output directory artifacts are written into, created on demand.
///
/// Filenames are deterministic derivations of caller-supplied titles, so
/// concurrent writers using the same title race on the same file; the last
/// writer wins.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Creates a handle for the given directory without touching the disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the configured root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a UTF-8 artifact, creating the directory if absent, and
    /// returns the absolute path. Existing files are overwritten.
    pub fn write(&self, filename: &str, contents: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(filename);
        std::fs::write(&path, contents)?;
        debug!("Wrote artifact: {}", path.display());
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(std::env::current_dir()?.join(path))
        }
    }
}

impl Default for OutputDir {
    fn default() -> Self {
        Self::new("output")
    }
}

/// Filename for a generated test script: slugified test case, truncated to
/// 40 characters, plus the fixed suffix.
pub fn test_script_name(test_case: &str) -> String {
    format!(
        "{}{TEST_SCRIPT_SUFFIX}",
        clip_chars(&slugify(test_case), SCRIPT_SLUG_MAX_CHARS)
    )
}

/// Filename for a generated test plan: `<YYYYMMDD>_<slug>.md`.
pub fn plan_file_name(date: &str, test_name: &str) -> String {
    format!("{date}_{}.md", slugify(test_name))
}
