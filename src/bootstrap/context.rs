//! Side-effect boundary for the bootstrap pipeline.
//!
//! Every process or filesystem effect the orchestrator performs goes
//! through a [`BootstrapContext`] of injected closures, so tests can
//! drive the full step sequence without python, uv, or the network.

use std::path::{Path, PathBuf};

use crate::detection::{
    self, manager_install_dirs, parse_system_path, prepend_process_path, resolve_tool_path,
    ToolProbe,
};
use crate::shell::{self, CommandOptions};

use super::MANAGER;

/// URL of the package manager's official Windows install script.
pub const UV_INSTALL_URL_WINDOWS: &str = "https://astral.sh/uv/install.ps1";

/// URL of the package manager's official Unix install script.
pub const UV_INSTALL_URL_UNIX: &str = "https://astral.sh/uv/install.sh";

/// Mockable dependencies for the bootstrap pipeline.
pub struct BootstrapContext<'a> {
    /// Probe a tool: try each candidate command with `--version`.
    pub probe_version: &'a dyn Fn(&[&str]) -> Option<ToolProbe>,
    /// Run the package manager's remote install script; true on exit 0.
    pub run_install: &'a dyn Fn() -> bool,
    /// Run the dependency sync in the given project root; true on exit 0.
    pub run_sync: &'a dyn Fn(&Path) -> bool,
    /// Resolve the package manager's absolute executable path.
    pub resolve_manager_path: &'a dyn Fn() -> Option<PathBuf>,
    /// Best-effort process PATH refresh after a fresh install.
    pub refresh_path: &'a dyn Fn(),
}

/// Build the default `BootstrapContext` for production use.
pub fn default_context() -> BootstrapContext<'static> {
    BootstrapContext {
        probe_version: &|candidates| detection::probe_version(candidates),
        run_install: &run_install_script,
        run_sync: &run_sync_command,
        resolve_manager_path: &resolve_manager,
        refresh_path: &refresh_process_path,
    }
}

/// The command line that fetches and runs the official install script.
///
/// On Windows this goes through PowerShell with the execution policy
/// bypassed, since remotely fetched scripts are blocked by default.
pub fn install_command() -> String {
    if cfg!(target_os = "windows") {
        format!(
            "powershell -ExecutionPolicy ByPass -NoProfile -Command \"irm {} | iex\"",
            UV_INSTALL_URL_WINDOWS
        )
    } else {
        format!("curl -LsSf {} | sh", UV_INSTALL_URL_UNIX)
    }
}

/// The dependency sync command line.
pub fn sync_command() -> String {
    format!("{} sync", MANAGER)
}

fn run_install_script() -> bool {
    // Output is captured so the spinner owns the terminal; the full
    // installer transcript is available under --debug.
    // No timeout: a hung network install is interrupted by the operator.
    run_captured(&install_command(), None)
}

fn run_sync_command(project_root: &Path) -> bool {
    run_captured(&sync_command(), Some(project_root))
}

fn run_captured(command: &str, cwd: Option<&Path>) -> bool {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        capture_stdout: true,
        capture_stderr: true,
    };
    match shell::execute(command, &options) {
        Ok(result) => {
            tracing::debug!(command, stdout = %result.stdout.trim(), stderr = %result.stderr.trim(), "captured output");
            result.success
        }
        Err(e) => {
            tracing::debug!(command, error = %e, "command could not run");
            false
        }
    }
}

fn resolve_manager() -> Option<PathBuf> {
    let mut entries = parse_system_path();
    entries.extend(manager_install_dirs());
    resolve_tool_path(MANAGER, &entries)
}

/// Prepend well-known installer target directories to the process PATH.
///
/// A freshly installed manager is not visible through the PATH snapshot
/// this process inherited. Re-probing the installer's known target
/// directories sometimes rescues the run; when it does not, the pipeline
/// falls back to the halt-and-restart contract.
fn refresh_process_path() {
    let system = parse_system_path();
    for dir in manager_install_dirs() {
        if !system.contains(&dir) {
            tracing::debug!(dir = %dir.display(), "prepending install dir to PATH");
            prepend_process_path(&dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_command_references_vendor_url() {
        let cmd = install_command();
        assert!(cmd.contains("astral.sh/uv"));
    }

    #[cfg(windows)]
    #[test]
    fn install_command_bypasses_execution_policy() {
        assert!(install_command().contains("-ExecutionPolicy ByPass"));
    }

    #[test]
    fn sync_command_uses_manager() {
        assert_eq!(sync_command(), "uv sync");
    }

    #[test]
    fn default_context_builds() {
        let ctx = default_context();
        // Resolution must not panic regardless of whether uv is installed.
        let _ = (ctx.resolve_manager_path)();
    }
}
