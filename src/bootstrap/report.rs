//! Final connection-parameter report.
//!
//! The report is the bootstrap's product: the exact command, working
//! directory, and argument list an operator pastes into their MCP
//! client's server configuration form. Its structure is fixed so that
//! repeated runs produce an identical block.

use serde::Serialize;
use std::path::Path;

use super::{INTERPRETER, SERVER_MODULE};

/// Connection parameters for launching the MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchReport {
    /// Command the client should run (absolute manager path, or the
    /// bare command name when resolution failed).
    pub command: String,
    /// Working directory for the server process.
    pub working_directory: String,
    /// Fixed six-token argument list.
    pub args: Vec<String>,
}

impl LaunchReport {
    /// Build the report for a project root and manager command.
    pub fn new(manager_command: &str, project_root: &Path) -> Self {
        let root = project_root.display().to_string();
        Self {
            command: manager_command.to_string(),
            working_directory: root.clone(),
            args: vec![
                "--directory".to_string(),
                root,
                "run".to_string(),
                INTERPRETER.to_string(),
                "-m".to_string(),
                SERVER_MODULE.to_string(),
            ],
        }
    }

    /// Render the fixed-format human-readable block.
    pub fn render(&self) -> String {
        let rule = "=".repeat(60);
        // Args as a JSON array, ready to paste into the client form.
        let args_json =
            serde_json::to_string(&self.args).unwrap_or_else(|_| self.args.join(" "));
        format!(
            "{rule}\n MCP server connection parameters\n{rule}\n Command:           {}\n Working directory: {}\n Arguments:         {}\n\n Paste into your MCP client's server configuration form:\n   command: {}\n   args:    {}\n{rule}",
            self.command,
            self.working_directory,
            self.args.join(" "),
            self.command,
            args_json,
            rule = rule,
        )
    }
}
