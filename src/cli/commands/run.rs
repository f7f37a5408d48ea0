//! Run command implementation.
//!
//! The `mcp-bootstrap run` command drives the full bootstrap pipeline
//! and prints the client connection parameters when the environment is
//! ready.

use std::path::{Path, PathBuf};

use crate::bootstrap::{default_context, Bootstrapper, RunOutcome};
use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("MCP server environment bootstrap");

        let ctx = default_context();
        let bootstrapper = Bootstrapper::new(&self.project_root, &ctx, self.args.non_interactive);

        match bootstrapper.run(ui)? {
            RunOutcome::Ready(report) => {
                ui.message("");
                ui.message(&report.render());
                Ok(CommandResult::success())
            }
            // Installed but unresolvable from this session. Not a failure;
            // the operator re-runs from a fresh terminal.
            RunOutcome::RestartRequired => Ok(CommandResult::success()),
        }
    }
}
