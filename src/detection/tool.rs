//! Version probing for external tools.
//!
//! Presence of a tool is determined the only way that is actually
//! reliable: invoke it with `--version` and inspect the exit status.
//! The reported version string is extracted from whichever stream the
//! tool writes it to (Python historically printed its version to
//! stderr).

use crate::shell;
use regex::Regex;
use std::sync::LazyLock;

/// Regex for a dotted version number in `--version` output.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.\d+(?:\.\d+)?)").expect("VERSION_REGEX must compile")
});

/// Result of probing a single tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolProbe {
    /// The command name that answered the probe (e.g. "python3").
    pub command: String,
    /// Extracted dotted version, if one could be parsed.
    pub version: Option<String>,
}

/// Extract a dotted version number from `--version` output.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_REGEX
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Probe a tool by trying each candidate command with `--version`.
///
/// Returns the first candidate that exits 0, along with its version.
/// Returns `None` when no candidate is invocable.
pub fn probe_version(candidates: &[&str]) -> Option<ToolProbe> {
    for candidate in candidates {
        let command = format!("{} --version", candidate);
        match shell::execute_quiet(&command, None) {
            Ok(result) if result.success => {
                let combined = format!("{}{}", result.stdout, result.stderr);
                tracing::debug!(tool = candidate, output = %combined.trim(), "version probe succeeded");
                return Some(ToolProbe {
                    command: candidate.to_string(),
                    version: extract_version(&combined),
                });
            }
            Ok(result) => {
                tracing::debug!(tool = candidate, code = ?result.exit_code, "version probe failed");
            }
            Err(e) => {
                tracing::debug!(tool = candidate, error = %e, "version probe could not run");
            }
        }
    }
    None
}
