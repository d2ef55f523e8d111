//! Identity-scoped git command runner

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::transport::SshTransport;
use super::GIT_BINARY;
use crate::error::{DeployError, DeployResult};
use crate::process::{run_captured, Completion};

/// Runs git subcommands inside a target directory.
///
/// Returns the combined stdout/stderr of the child on success. A non-zero
/// exit is reported as [`DeployError::VcsStepFailed`] carrying that output.
#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn run(
        &self,
        dir: &Path,
        transport: &SshTransport,
        args: &[&str],
    ) -> DeployResult<String>;
}

/// [`GitRunner`] backed by the `git` command-line client
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    timeout: Option<Duration>,
}

impl GitCli {
    /// Create a runner that kills any git invocation running longer than
    /// `timeout`. `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl GitRunner for GitCli {
    async fn run(
        &self,
        dir: &Path,
        transport: &SshTransport,
        args: &[&str],
    ) -> DeployResult<String> {
        let binary =
            which::which(GIT_BINARY).map_err(|_| DeployError::ToolNotFound { tool: GIT_BINARY })?;

        let mut cmd = Command::new(binary);
        cmd.args(args).current_dir(dir);
        transport.apply(&mut cmd);

        let step = args.join(" ");
        tracing::trace!(target_dir = %dir.display(), step = %step, "running git");

        match run_captured(&mut cmd, self.timeout).await? {
            Completion::Exited(captured) if captured.status.success() => Ok(captured.output),
            Completion::Exited(captured) => Err(DeployError::VcsStepFailed {
                step,
                status: captured.status.to_string(),
                output: captured.output,
            }),
            Completion::TimedOut => Err(DeployError::Timeout {
                program: format!("{GIT_BINARY} {step}"),
                after: self.timeout.unwrap_or_default(),
            }),
        }
    }
}
