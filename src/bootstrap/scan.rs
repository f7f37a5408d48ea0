//! Read-only environment scan.
//!
//! Collects the same facts the bootstrap pipeline acts on, without
//! changing anything. Backs the `status` subcommand.

use std::path::Path;

use serde::Serialize;

use super::{
    BootstrapContext, CONFIG_EXAMPLE_FILE, CONFIG_FILE, INTERPRETER_CANDIDATES, MANAGER,
};

/// Presence and version of a single tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub present: bool,
    /// Command that answered the probe, when present.
    pub command: Option<String>,
    pub version: Option<String>,
}

impl ToolStatus {
    fn absent() -> Self {
        Self {
            present: false,
            command: None,
            version: None,
        }
    }
}

/// Snapshot of everything the pipeline would inspect.
#[derive(Debug, Serialize)]
pub struct EnvironmentScan {
    pub project_root: String,
    pub interpreter: ToolStatus,
    pub manager: ToolStatus,
    /// Resolved executable path of the manager, when it could be found.
    pub manager_path: Option<String>,
    pub config_present: bool,
    pub config_example_present: bool,
}

impl EnvironmentScan {
    /// Probe the environment without modifying it.
    pub fn run(project_root: &Path, ctx: &BootstrapContext) -> Self {
        let interpreter = match (ctx.probe_version)(INTERPRETER_CANDIDATES) {
            Some(probe) => ToolStatus {
                present: true,
                command: Some(probe.command),
                version: probe.version,
            },
            None => ToolStatus::absent(),
        };

        let manager = match (ctx.probe_version)(&[MANAGER]) {
            Some(probe) => ToolStatus {
                present: true,
                command: Some(probe.command),
                version: probe.version,
            },
            None => ToolStatus::absent(),
        };

        let manager_path =
            (ctx.resolve_manager_path)().map(|path| path.display().to_string());

        Self {
            project_root: project_root.display().to_string(),
            interpreter,
            manager,
            manager_path,
            config_present: project_root.join(CONFIG_FILE).is_file(),
            config_example_present: project_root.join(CONFIG_EXAMPLE_FILE).is_file(),
        }
    }

    /// True when a bootstrap run would reach the report without installing.
    pub fn is_ready(&self) -> bool {
        self.interpreter.present && self.manager.present
    }
}
