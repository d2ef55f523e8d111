//! git operations used by the sync engine
//!
//! Everything here drives the `git` command-line client; no repository or
//! transport protocol is implemented in-process.

mod runner;
mod transport;

use std::path::Path;

pub use runner::{GitCli, GitRunner};
pub use transport::{SshTransport, SSH_BINARY, SSH_COMMAND_ENV, TERMINAL_PROMPT_ENV};

use crate::error::{DeployError, DeployResult};

/// git client binary
pub const GIT_BINARY: &str = "git";

/// Metadata directory that marks an initialized working copy
pub const GIT_DIRECTORY: &str = ".git";

/// Name under which the tracked remote is registered
pub const REMOTE_NAME: &str = "origin";

/// Messages `git pull` prints when there was nothing to merge.
///
/// Older clients hyphenate "up-to-date".
pub const UP_TO_DATE_MARKERS: [&str; 2] = ["Already up to date.", "Already up-to-date."];

/// Whether a target directory already holds a working copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Initialized,
    Uninitialized,
}

impl TargetState {
    /// Derive the state of `dir` from disk.
    ///
    /// Missing, empty and corrupt directories are all `Uninitialized`; only the
    /// presence of the metadata directory counts.
    pub fn classify(dir: &Path) -> Self {
        if dir.join(GIT_DIRECTORY).exists() {
            Self::Initialized
        } else {
            Self::Uninitialized
        }
    }
}

/// Check that both `git` and `ssh` can be found on `PATH`.
pub fn ensure_installed() -> DeployResult<()> {
    for tool in [GIT_BINARY, SSH_BINARY] {
        which::which(tool).map_err(|_| DeployError::ToolNotFound { tool })?;
    }
    Ok(())
}

/// Populate an uninitialized directory with a checkout of `origin/<branch>`.
///
/// Steps run strictly in order and the first failure aborts the rest. Returns
/// the combined output of all steps.
pub async fn clone(
    runner: &dyn GitRunner,
    dir: &Path,
    transport: &SshTransport,
    url: &str,
    branch: &str,
) -> DeployResult<String> {
    let tracking = format!("{REMOTE_NAME}/{branch}");
    let steps: [&[&str]; 4] = [
        &["init"],
        &["remote", "add", REMOTE_NAME, url],
        &["fetch"],
        &["checkout", "-t", tracking.as_str()],
    ];

    let mut output = String::new();
    for args in steps {
        output.push_str(&runner.run(dir, transport, args).await?);
    }
    Ok(output)
}

/// Pull incoming changes for the checked-out tracking branch.
pub async fn pull(
    runner: &dyn GitRunner,
    dir: &Path,
    transport: &SshTransport,
) -> DeployResult<String> {
    runner.run(dir, transport, &["pull"]).await
}

/// Resolve the commit `HEAD` points at, or `None` when it cannot be resolved.
pub async fn head_commit(
    runner: &dyn GitRunner,
    dir: &Path,
    transport: &SshTransport,
) -> Option<String> {
    match runner.run(dir, transport, &["rev-parse", "HEAD"]).await {
        Ok(out) => {
            let id = out.trim();
            (!id.is_empty()).then(|| id.to_string())
        }
        Err(e) => {
            tracing::debug!(target_dir = %dir.display(), error = %e, "could not resolve HEAD");
            None
        }
    }
}

/// Whether `git pull` output says nothing was merged.
pub fn is_up_to_date(pull_output: &str) -> bool {
    UP_TO_DATE_MARKERS
        .iter()
        .any(|marker| pull_output.contains(marker))
}
