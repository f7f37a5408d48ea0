//! Tool detection: version probing and executable path resolution.

pub mod path_probe;
pub mod tool;

pub use path_probe::{
    manager_install_dirs, parse_system_path, prepend_process_path, resolve_tool_path,
};
pub use tool::{extract_version, probe_version, ToolProbe};
