//! mcp-bootstrap - MCP server development environment bootstrap.
//!
//! mcp-bootstrap replaces the ad-hoc "start" scripts shipped with MCP
//! server projects. It probes for the Python interpreter and the `uv`
//! package manager, installs `uv` when it is missing, syncs the
//! project's dependencies, checks for a configuration file, and prints
//! the exact connection parameters an MCP client needs to launch the
//! server.
//!
//! # Modules
//!
//! - [`bootstrap`] - The sequential bootstrap pipeline and final report
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Tool probing and PATH resolution
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Shell command execution
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use mcp_bootstrap::bootstrap::LaunchReport;
//! use std::path::Path;
//!
//! let report = LaunchReport::new("uv", Path::new("/srv/project"));
//! assert_eq!(report.args[0], "--directory");
//! assert_eq!(report.args.last().map(String::as_str), Some("mcp_server.server"));
//! ```

pub mod bootstrap;
pub mod cli;
pub mod detection;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{BootstrapError, Result};
