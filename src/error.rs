//! Error types for bootstrap operations.
//!
//! This module defines [`BootstrapError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `BootstrapError` for fatal conditions that halt the pipeline
//! - Restart-required and configuration warnings are NOT errors; they are
//!   step outcomes (see `bootstrap::StepOutcome`)
//! - All errors should provide actionable messages for operators

use thiserror::Error;

/// Core error type for bootstrap operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A required tool is absent and cannot be installed by this run.
    #[error("Missing dependency '{tool}': {message}")]
    MissingDependency { tool: String, message: String },

    /// The package manager's remote install script failed.
    #[error("Failed to install '{tool}': {message}")]
    InstallFailure { tool: String, message: String },

    /// Dependency synchronization failed.
    #[error("Dependency sync failed: {message}")]
    SyncFailure { message: String },

    /// Shell command failed to spawn or was killed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
