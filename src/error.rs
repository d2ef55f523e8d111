//! Error types for gitdeploy
//!
//! Uses `thiserror` for library errors. Every per-target error stays inside
//! that target's worker and only surfaces through logging.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for gitdeploy operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for gitdeploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// A required external program is not on `PATH`
    #[error("required tool '{tool}' not found in PATH")]
    ToolNotFound { tool: &'static str },

    /// Descriptor file is not valid TOML or has the wrong shape
    #[error("failed to parse descriptor {file}: {message}")]
    DescriptorParse { file: PathBuf, message: String },

    /// Descriptor parsed but is missing something the provider needs
    #[error("invalid descriptor {file}: {message}")]
    InvalidDescriptor { file: PathBuf, message: String },

    /// A git step exited non-zero
    #[error("git {step} failed ({status})\n{output}")]
    VcsStepFailed {
        step: String,
        status: String,
        output: String,
    },

    /// An external process exceeded the invocation timeout and was killed
    #[error("'{program}' timed out after {}s and was killed", after.as_secs())]
    Timeout { program: String, after: Duration },

    /// Post-update command tokenized to nothing
    #[error("post-update command is empty")]
    EmptyCommand,

    /// Post-update command could not be tokenized (e.g. unbalanced quotes)
    #[error("post-update command '{command}' is not valid shell syntax")]
    InvalidCommand { command: String },

    /// Post-update command failed to start or exited non-zero
    #[error("post-update command '{command}' failed: {reason}\n{output}")]
    ActionExecFailed {
        command: String,
        reason: String,
        output: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
