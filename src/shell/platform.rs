//! Platform-specific shell detection.
//!
//! Used for two things: CI detection (suppresses interactive prompts)
//! and wording the restart instruction after a fresh package-manager
//! install, which names the shell the operator has to reopen.

use std::path::Path;

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Cmd,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    ///
    /// Splits on both separator styles, so Windows paths parse even when
    /// the instruction text is generated off-platform.
    pub fn from_executable(exe: &str) -> Self {
        let file_name = exe.rsplit(['/', '\\']).next().unwrap_or(exe);
        let name = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            "powershell" | "pwsh" => ShellType::PowerShell,
            "cmd" => ShellType::Cmd,
            _ => ShellType::Unknown,
        }
    }

    /// Human-readable name for restart wording.
    pub fn label(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::PowerShell => "PowerShell",
            ShellType::Cmd => "Command Prompt",
            ShellType::Unknown => "terminal",
        }
    }
}

/// Name of the current shell, best effort.
pub fn shell_name() -> ShellType {
    let exe = if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    };
    ShellType::from_executable(&exe)
}

/// Instruction shown when a fresh install needs a new process environment.
///
/// Child processes inherit a snapshot of environment variables at launch;
/// a tool installed a moment ago is only resolvable from a fresh session.
/// The wording names the shell the operator is actually using.
pub fn restart_instruction() -> String {
    match shell_name() {
        shell @ (ShellType::Cmd | ShellType::PowerShell) => format!(
            "Close this {} window, open a new one, and run mcp-bootstrap again.",
            shell.label()
        ),
        shell => format!(
            "Open a new {} session (or re-source your shell profile) and run mcp-bootstrap again.",
            shell.label()
        ),
    }
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"];
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_type_from_executable_bash() {
        assert_eq!(ShellType::from_executable("/bin/bash"), ShellType::Bash);
    }

    #[test]
    fn shell_type_from_executable_zsh() {
        assert_eq!(ShellType::from_executable("/usr/bin/zsh"), ShellType::Zsh);
    }

    #[test]
    fn shell_type_from_executable_powershell() {
        assert_eq!(
            ShellType::from_executable("pwsh.exe"),
            ShellType::PowerShell
        );
        assert_eq!(
            ShellType::from_executable("C:\\Windows\\System32\\WindowsPowerShell\\v1.0\\powershell.exe"),
            ShellType::PowerShell
        );
    }

    #[test]
    fn shell_type_from_executable_cmd() {
        assert_eq!(ShellType::from_executable("cmd.exe"), ShellType::Cmd);
    }

    #[test]
    fn shell_type_unknown_for_unrecognized() {
        assert_eq!(ShellType::from_executable("/bin/nushell"), ShellType::Unknown);
    }

    #[test]
    fn shell_type_labels() {
        assert_eq!(ShellType::Bash.label(), "bash");
        assert_eq!(ShellType::PowerShell.label(), "PowerShell");
        assert_eq!(ShellType::Cmd.label(), "Command Prompt");
        assert_eq!(ShellType::Unknown.label(), "terminal");
    }

    #[test]
    fn restart_instruction_mentions_rerun_and_current_shell() {
        let instruction = restart_instruction();
        assert!(instruction.contains("mcp-bootstrap again"));
        assert!(instruction.contains(shell_name().label()));
    }
}
