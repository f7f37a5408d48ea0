//! Executable path resolution and well-known install locations.
//!
//! A tool installed moments ago by a remote install script lands in a
//! directory the current process PATH snapshot does not know about. The
//! probe side of this module knows where the package manager's installer
//! puts its binary, so the pipeline can attempt an in-process PATH
//! refresh before giving up and asking the operator to reopen their
//! shell.

use std::path::{Path, PathBuf};

/// Windows executable extensions tried in resolution order.
#[cfg(windows)]
const EXE_SUFFIXES: &[&str] = &[".exe", ".cmd", ".bat"];

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// `where`/`which` — their behavior varies across systems and shells.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        for name in candidate_names(tool) {
            let candidate = dir.join(&name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidate_names(tool: &str) -> Vec<String> {
    let mut names: Vec<String> = EXE_SUFFIXES
        .iter()
        .map(|suffix| format!("{}{}", tool, suffix))
        .collect();
    names.push(tool.to_string());
    names
}

#[cfg(not(windows))]
fn candidate_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

/// Directories the package manager's install script is known to use.
///
/// The uv installer targets `~/.local/bin` (and historically
/// `~/.cargo/bin`); on Windows the same layout lives under the user
/// profile. Only directories that actually exist are returned.
pub fn manager_install_dirs() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };

    [home.join(".local").join("bin"), home.join(".cargo").join("bin")]
        .into_iter()
        .filter(|dir| dir.is_dir())
        .collect()
}

/// Prepend a directory to the current process PATH.
pub fn prepend_process_path(dir: &Path) {
    let separator = if cfg!(windows) { ";" } else { ":" };
    let current = std::env::var("PATH").unwrap_or_default();
    let new_path = format!("{}{}{}", dir.display(), separator, current);
    std::env::set_var("PATH", new_path);
}
