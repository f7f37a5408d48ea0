//! Bootstrap orchestrator.
//!
//! A strictly sequential pipeline that brings a development environment
//! from unknown state to "dependencies installed, configuration checked,
//! connection parameters printed":
//!
//! 1. Resolve the project root
//! 2. Probe the interpreter (fatal when absent)
//! 3. Probe the package manager
//! 4. Auto-install the manager when absent (may end the run with a
//!    restart instruction — a fresh install is only resolvable from a
//!    new process environment)
//! 5. Sync dependencies (one attempt, no retry)
//! 6. Check configuration presence (warning only)
//! 7. Resolve the manager's executable path (warning only)
//! 8. Emit the final report
//!
//! Each step returns a tagged [`StepOutcome`]; the driver halts at the
//! first fatal outcome. Running the pipeline twice with everything
//! already in place produces the same report both times.

pub mod context;
pub mod report;
pub mod scan;

pub use context::{default_context, install_command, sync_command, BootstrapContext};
pub use report::LaunchReport;
pub use scan::{EnvironmentScan, ToolStatus};

use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};
use crate::shell::restart_instruction;
use crate::ui::{Confirm, UserInterface};

/// Interpreter named in the printed launch arguments.
pub const INTERPRETER: &str = "python";

/// Commands tried when probing for the interpreter.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python", "python3"];

/// The package manager command.
pub const MANAGER: &str = "uv";

/// Module identifier the client launches with `-m`.
pub const SERVER_MODULE: &str = "mcp_server.server";

/// Configuration file checked for presence, relative to the project root.
pub const CONFIG_FILE: &str = "config/config.yaml";

/// Example configuration shipped with the project.
pub const CONFIG_EXAMPLE_FILE: &str = "config/config.example.yaml";

/// Where to get the interpreter when it is missing.
pub const INTERPRETER_DOWNLOAD_URL: &str = "https://www.python.org/downloads/";

/// Manual install documentation for the package manager.
pub const MANAGER_INSTALL_DOCS_URL: &str =
    "https://docs.astral.sh/uv/getting-started/installation/";

/// Tagged result of a single pipeline step.
#[derive(Debug)]
pub enum StepOutcome {
    /// Step succeeded; continue with the next one.
    Completed,
    /// Step found a recoverable problem; warn and continue.
    Warned(String),
    /// Install succeeded but the tool needs a fresh session; halt with
    /// exit status 0. Successful-but-incomplete, not a failure.
    RestartRequired(String),
    /// Unrecoverable; halt with non-zero exit status.
    Fatal(BootstrapError),
}

/// Terminal state of a full pipeline run.
#[derive(Debug)]
pub enum RunOutcome {
    /// Environment is ready; the report was built.
    Ready(LaunchReport),
    /// Fresh install requires a new session; re-run to finish.
    RestartRequired,
}

/// Internal driver decision after consuming a step outcome.
enum Flow {
    Continue,
    Halt(RunOutcome),
}

/// The bootstrap pipeline driver.
pub struct Bootstrapper<'a> {
    project_root: PathBuf,
    ctx: &'a BootstrapContext<'a>,
    non_interactive: bool,
}

impl<'a> Bootstrapper<'a> {
    /// Create a driver for a project root.
    pub fn new(project_root: &Path, ctx: &'a BootstrapContext<'a>, non_interactive: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            ctx,
            non_interactive,
        }
    }

    /// Run the full pipeline.
    ///
    /// Fatal conditions come back as `Err`; the restart contract and a
    /// ready environment come back as `Ok(RunOutcome)`.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<RunOutcome> {
        // Step 1: resolve project root. Always succeeds.
        let root = self.resolve_root()?;
        ui.message(&format!("Project root: {}", root.display()));

        // Step 2: probe interpreter.
        if let Flow::Halt(outcome) = self.consume(self.probe_interpreter(ui), ui)? {
            return Ok(outcome);
        }

        // Step 3/4: probe manager, auto-installing when absent.
        if let Flow::Halt(outcome) = self.consume(self.ensure_manager(ui)?, ui)? {
            return Ok(outcome);
        }

        // Step 5: sync dependencies. One attempt, no retry.
        if let Flow::Halt(outcome) = self.consume(self.sync_dependencies(&root, ui), ui)? {
            return Ok(outcome);
        }

        // Step 6: configuration presence. Never fatal.
        if let Flow::Halt(outcome) = self.consume(self.check_configuration(&root), ui)? {
            return Ok(outcome);
        }

        // Step 7: resolve the manager path, falling back to the bare name.
        let manager_command = match (self.ctx.resolve_manager_path)() {
            Some(path) => path.display().to_string(),
            None => {
                ui.warning(&format!(
                    "Could not resolve the {} executable path; the report uses the bare command name",
                    MANAGER
                ));
                MANAGER.to_string()
            }
        };

        // Step 8: final report.
        Ok(RunOutcome::Ready(LaunchReport::new(&manager_command, &root)))
    }

    /// Resolve the project root to an absolute path.
    fn resolve_root(&self) -> Result<PathBuf> {
        if self.project_root.is_absolute() {
            Ok(self.project_root.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.project_root))
        }
    }

    fn probe_interpreter(&self, ui: &mut dyn UserInterface) -> StepOutcome {
        match (self.ctx.probe_version)(INTERPRETER_CANDIDATES) {
            Some(probe) => {
                let version = probe.version.as_deref().unwrap_or("unknown version");
                ui.success(&format!("Found {} ({})", probe.command, version));
                StepOutcome::Completed
            }
            None => {
                ui.error(&format!(
                    "Python was not found. Install it from {} and run mcp-bootstrap again.",
                    INTERPRETER_DOWNLOAD_URL
                ));
                StepOutcome::Fatal(BootstrapError::MissingDependency {
                    tool: INTERPRETER.to_string(),
                    message: "interpreter not found on PATH".to_string(),
                })
            }
        }
    }

    /// Steps 3 and 4: probe the manager, install it when absent.
    fn ensure_manager(&self, ui: &mut dyn UserInterface) -> Result<StepOutcome> {
        if let Some(probe) = (self.ctx.probe_version)(&[MANAGER]) {
            let version = probe.version.as_deref().unwrap_or("unknown version");
            ui.success(&format!("Found {} ({})", MANAGER, version));
            return Ok(StepOutcome::Completed);
        }

        ui.message(&format!("{} is not installed", MANAGER));

        if ui.is_interactive() && !self.non_interactive {
            let prompt = Confirm {
                key: format!("install_{}", MANAGER),
                question: format!("Install {} from the official install script now?", MANAGER),
                default: true,
            };
            if !ui.confirm(&prompt)? {
                self.print_manual_install(ui);
                return Ok(StepOutcome::Fatal(BootstrapError::MissingDependency {
                    tool: MANAGER.to_string(),
                    message: "install declined by operator".to_string(),
                }));
            }
        }

        tracing::debug!(command = %install_command(), "running install script");
        let mut spinner = ui.start_spinner(&format!(
            "Installing {} from the official install script",
            MANAGER
        ));

        if !(self.ctx.run_install)() {
            spinner.finish_error(&format!("{} install failed", MANAGER));
            self.print_manual_install(ui);
            return Ok(StepOutcome::Fatal(BootstrapError::InstallFailure {
                tool: MANAGER.to_string(),
                message: "install script exited with a non-zero status".to_string(),
            }));
        }
        spinner.finish_success(&format!("{} install script completed", MANAGER));

        // Best-effort PATH refresh: the installer's target directory is
        // not in this process's PATH snapshot.
        (self.ctx.refresh_path)();

        if let Some(probe) = (self.ctx.probe_version)(&[MANAGER]) {
            let version = probe.version.as_deref().unwrap_or("unknown version");
            ui.success(&format!(
                "Installed {} ({}); resolved after PATH refresh",
                MANAGER, version
            ));
            return Ok(StepOutcome::Completed);
        }

        Ok(StepOutcome::RestartRequired(format!(
            "{} was installed, but it is only visible to a fresh session. {}",
            MANAGER,
            restart_instruction()
        )))
    }

    fn print_manual_install(&self, ui: &mut dyn UserInterface) {
        ui.message("Install it manually with one of:");
        ui.message(&format!("  pipx install {}", MANAGER));
        ui.message(&format!("  pip install {}", MANAGER));
        ui.message(&format!("Details: {}", MANAGER_INSTALL_DOCS_URL));
    }

    fn sync_dependencies(&self, root: &Path, ui: &mut dyn UserInterface) -> StepOutcome {
        let mut spinner = ui.start_spinner(&format!("Syncing dependencies ({})", sync_command()));

        if (self.ctx.run_sync)(root) {
            spinner.finish_success("Dependencies are in sync");
            StepOutcome::Completed
        } else {
            spinner.finish_error("Dependency sync failed");
            ui.error("Likely causes:");
            ui.message("  - no pyproject.toml in the project root");
            ui.message("  - network failure while downloading packages");
            ui.message("  - installed Python does not satisfy the project's version requirement");
            StepOutcome::Fatal(BootstrapError::SyncFailure {
                message: format!("'{}' exited with a non-zero status", sync_command()),
            })
        }
    }

    fn check_configuration(&self, root: &Path) -> StepOutcome {
        if root.join(CONFIG_FILE).is_file() {
            return StepOutcome::Completed;
        }

        let mut warning = format!("No configuration file at {}", CONFIG_FILE);
        if root.join(CONFIG_EXAMPLE_FILE).is_file() {
            warning.push_str(&format!(
                "; copy {} to {} to get started",
                CONFIG_EXAMPLE_FILE, CONFIG_FILE
            ));
        }
        StepOutcome::Warned(warning)
    }

    /// Drive a step outcome: print warnings, halt on restart, raise fatals.
    fn consume(&self, outcome: StepOutcome, ui: &mut dyn UserInterface) -> Result<Flow> {
        match outcome {
            StepOutcome::Completed => Ok(Flow::Continue),
            StepOutcome::Warned(msg) => {
                ui.warning(&msg);
                Ok(Flow::Continue)
            }
            StepOutcome::RestartRequired(msg) => {
                ui.success(&msg);
                Ok(Flow::Halt(RunOutcome::RestartRequired))
            }
            StepOutcome::Fatal(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ToolProbe;
    use crate::ui::MockUI;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    /// Context where every tool is present and every command succeeds.
    fn all_present_ctx() -> BootstrapContext<'static> {
        BootstrapContext {
            probe_version: &|candidates| {
                Some(ToolProbe {
                    command: candidates[0].to_string(),
                    version: Some("1.0.0".to_string()),
                })
            },
            run_install: &|| true,
            run_sync: &|_| true,
            resolve_manager_path: &|| Some(PathBuf::from("/opt/bin/uv")),
            refresh_path: &|| {},
        }
    }

    #[test]
    fn full_run_produces_report() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "key: value\n").unwrap();

        let ctx = all_present_ctx();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let outcome = bootstrapper.run(&mut ui).unwrap();
        match outcome {
            RunOutcome::Ready(report) => {
                assert_eq!(report.command, "/opt/bin/uv");
                assert_eq!(report.args.len(), 6);
            }
            RunOutcome::RestartRequired => panic!("unexpected restart"),
        }
        assert!(ui.warnings().is_empty());
        // Long-running sync runs under a spinner.
        assert!(ui.spinners().iter().any(|m| m.contains("Syncing")));
    }

    #[test]
    fn missing_interpreter_halts_before_manager_probe() {
        let manager_probed = Cell::new(false);
        let probe: &dyn Fn(&[&str]) -> Option<ToolProbe> = &|candidates| {
            if candidates.contains(&MANAGER) {
                manager_probed.set(true);
            }
            None
        };
        let ctx = BootstrapContext {
            probe_version: probe,
            run_install: &|| true,
            run_sync: &|_| true,
            resolve_manager_path: &|| None,
            refresh_path: &|| {},
        };

        let temp = TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let err = bootstrapper.run(&mut ui).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingDependency { .. }));
        assert!(!manager_probed.get(), "manager must not be probed");
        assert!(ui.has_error("python.org"));
    }

    #[test]
    fn failed_install_surfaces_manual_instructions() {
        let ctx = BootstrapContext {
            // Interpreter present, manager absent.
            probe_version: &|candidates| {
                if candidates.contains(&MANAGER) {
                    None
                } else {
                    Some(ToolProbe {
                        command: "python".to_string(),
                        version: Some("3.12.1".to_string()),
                    })
                }
            },
            run_install: &|| false,
            run_sync: &|_| true,
            resolve_manager_path: &|| None,
            refresh_path: &|| {},
        };

        let temp = TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let err = bootstrapper.run(&mut ui).unwrap_err();
        assert!(matches!(err, BootstrapError::InstallFailure { .. }));
        assert!(ui.has_message("pipx install uv"));
        assert!(ui.has_message("pip install uv"));
        // The install attempt itself runs under a spinner.
        assert!(ui.spinners().iter().any(|m| m.contains("Installing uv")));
    }

    #[test]
    fn fresh_install_requires_restart_and_skips_sync() {
        let sync_ran = Cell::new(false);
        let sync: &dyn Fn(&Path) -> bool = &|_| {
            sync_ran.set(true);
            true
        };
        let ctx = BootstrapContext {
            // Manager stays unresolvable even after the install succeeds.
            probe_version: &|candidates| {
                if candidates.contains(&MANAGER) {
                    None
                } else {
                    Some(ToolProbe {
                        command: "python".to_string(),
                        version: Some("3.12.1".to_string()),
                    })
                }
            },
            run_install: &|| true,
            run_sync: sync,
            resolve_manager_path: &|| None,
            refresh_path: &|| {},
        };

        let temp = TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let outcome = bootstrapper.run(&mut ui).unwrap();
        assert!(matches!(outcome, RunOutcome::RestartRequired));
        assert!(!sync_ran.get(), "sync must not run after a fresh install");
    }

    #[test]
    fn install_resolvable_after_refresh_continues() {
        let refreshed = Cell::new(false);
        let refresh: &dyn Fn() = &|| refreshed.set(true);
        let probe: &dyn Fn(&[&str]) -> Option<ToolProbe> = &|candidates| {
            if candidates.contains(&MANAGER) && !refreshed.get() {
                None
            } else {
                Some(ToolProbe {
                    command: candidates[0].to_string(),
                    version: Some("0.4.2".to_string()),
                })
            }
        };
        let ctx = BootstrapContext {
            probe_version: probe,
            run_install: &|| true,
            run_sync: &|_| true,
            resolve_manager_path: &|| Some(PathBuf::from("/home/dev/.local/bin/uv")),
            refresh_path: refresh,
        };

        let temp = TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let outcome = bootstrapper.run(&mut ui).unwrap();
        assert!(matches!(outcome, RunOutcome::Ready(_)));
        assert!(refreshed.get());
    }

    #[test]
    fn sync_runs_once_and_failure_is_fatal() {
        let sync_count = Cell::new(0usize);
        let sync: &dyn Fn(&Path) -> bool = &|_| {
            sync_count.set(sync_count.get() + 1);
            false
        };
        let ctx = BootstrapContext {
            probe_version: &|candidates| {
                Some(ToolProbe {
                    command: candidates[0].to_string(),
                    version: Some("1.0.0".to_string()),
                })
            },
            run_install: &|| true,
            run_sync: sync,
            resolve_manager_path: &|| None,
            refresh_path: &|| {},
        };

        let temp = TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let err = bootstrapper.run(&mut ui).unwrap_err();
        assert!(matches!(err, BootstrapError::SyncFailure { .. }));
        assert_eq!(sync_count.get(), 1, "no retry on sync failure");
        assert!(ui.has_message("pyproject.toml"));
    }

    #[test]
    fn missing_config_warns_without_example() {
        let temp = TempDir::new().unwrap();
        let ctx = all_present_ctx();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let outcome = bootstrapper.run(&mut ui).unwrap();
        assert!(matches!(outcome, RunOutcome::Ready(_)));
        assert!(ui.has_warning(CONFIG_FILE));
        assert!(!ui.has_warning(CONFIG_EXAMPLE_FILE));
    }

    #[test]
    fn missing_config_mentions_example_when_present() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::write(temp.path().join(CONFIG_EXAMPLE_FILE), "key: value\n").unwrap();

        let ctx = all_present_ctx();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        let outcome = bootstrapper.run(&mut ui).unwrap();
        assert!(matches!(outcome, RunOutcome::Ready(_)));
        assert!(ui.has_warning(CONFIG_EXAMPLE_FILE));
    }

    #[test]
    fn unresolvable_manager_path_falls_back_to_bare_name() {
        let ctx = BootstrapContext {
            probe_version: &|candidates| {
                Some(ToolProbe {
                    command: candidates[0].to_string(),
                    version: Some("1.0.0".to_string()),
                })
            },
            run_install: &|| true,
            run_sync: &|_| true,
            resolve_manager_path: &|| None,
            refresh_path: &|| {},
        };

        let temp = TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);
        let mut ui = MockUI::new();

        match bootstrapper.run(&mut ui).unwrap() {
            RunOutcome::Ready(report) => assert_eq!(report.command, MANAGER),
            RunOutcome::RestartRequired => panic!("unexpected restart"),
        }
        assert!(ui.has_warning("executable path"));
    }

    #[test]
    fn interactive_decline_halts_with_manual_instructions() {
        let ctx = BootstrapContext {
            probe_version: &|candidates| {
                if candidates.contains(&MANAGER) {
                    None
                } else {
                    Some(ToolProbe {
                        command: "python".to_string(),
                        version: Some("3.12.1".to_string()),
                    })
                }
            },
            run_install: &|| true,
            run_sync: &|_| true,
            resolve_manager_path: &|| None,
            refresh_path: &|| {},
        };

        let temp = TempDir::new().unwrap();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, false);
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_confirm_response("install_uv", false);

        let err = bootstrapper.run(&mut ui).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingDependency { .. }));
        assert!(ui.has_message("pipx install uv"));
    }

    #[test]
    fn repeated_runs_are_idempotent() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "key: value\n").unwrap();

        let ctx = all_present_ctx();
        let bootstrapper = Bootstrapper::new(temp.path(), &ctx, true);

        let mut ui1 = MockUI::new();
        let mut ui2 = MockUI::new();
        let first = bootstrapper.run(&mut ui1).unwrap();
        let second = bootstrapper.run(&mut ui2).unwrap();

        match (first, second) {
            (RunOutcome::Ready(a), RunOutcome::Ready(b)) => {
                assert_eq!(a, b);
                assert_eq!(a.render(), b.render());
            }
            _ => panic!("both runs must be ready"),
        }
    }

    #[test]
    fn end_to_end_argument_block_is_exact() {
        let ctx = BootstrapContext {
            probe_version: &|candidates| {
                Some(ToolProbe {
                    command: candidates[0].to_string(),
                    version: Some("0.4.2".to_string()),
                })
            },
            run_install: &|| true,
            run_sync: &|_| true,
            resolve_manager_path: &|| Some(PathBuf::from("uv")),
            refresh_path: &|| {},
        };

        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let bootstrapper = Bootstrapper::new(&root, &ctx, true);
        let mut ui = MockUI::new();

        match bootstrapper.run(&mut ui).unwrap() {
            RunOutcome::Ready(report) => {
                assert_eq!(
                    report.args,
                    vec![
                        "--directory".to_string(),
                        root.display().to_string(),
                        "run".to_string(),
                        "python".to_string(),
                        "-m".to_string(),
                        "mcp_server.server".to_string(),
                    ]
                );
            }
            RunOutcome::RestartRequired => panic!("unexpected restart"),
        }
    }
}
