//! Status command implementation.
//!
//! The `mcp-bootstrap status` command reports what a bootstrap run would
//! find, without installing or syncing anything. Informational only; it
//! always exits 0.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::bootstrap::{default_context, EnvironmentScan, ToolStatus, CONFIG_FILE};
use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, args: StatusArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn tool_line(name: &str, status: &ToolStatus) -> String {
        match (&status.command, &status.version) {
            (Some(command), Some(version)) => format!("{}: {} ({})", name, command, version),
            (Some(command), None) => format!("{}: {}", name, command),
            _ => format!("{}: not found", name),
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = default_context();
        let scan = EnvironmentScan::run(&self.project_root, &ctx);

        if self.args.json {
            let payload = serde_json::to_string_pretty(&scan)
                .context("failed to serialize environment status")?;
            ui.message(&payload);
            return Ok(CommandResult::success());
        }

        ui.show_header("Environment status");
        ui.message(&format!("Project root: {}", scan.project_root));
        ui.message(&Self::tool_line("Interpreter", &scan.interpreter));
        ui.message(&Self::tool_line("Manager", &scan.manager));
        if let Some(path) = &scan.manager_path {
            ui.message(&format!("Manager path: {}", path));
        }
        if scan.config_present {
            ui.message(&format!("Configuration: {}", CONFIG_FILE));
        } else {
            ui.warning(&format!("Configuration: {} missing", CONFIG_FILE));
        }

        if scan.is_ready() {
            ui.success("Ready; run 'mcp-bootstrap' to sync and print connection parameters");
        } else {
            ui.message("Run 'mcp-bootstrap' to install missing tools");
        }

        Ok(CommandResult::success())
    }
}
