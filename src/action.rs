//! Post-update action invoker
//!
//! A descriptor's `command` is split with POSIX shell-word rules and run
//! directly, never through a shell: quotes and backslash escapes are honoured
//! but nothing is expanded or substituted.

use std::time::Duration;

use tokio::process::Command;

use crate::error::{DeployError, DeployResult};
use crate::process::{run_captured, Completion};

/// A tokenized post-update command, ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdateAction {
    command_line: String,
    program: String,
    args: Vec<String>,
}

impl PostUpdateAction {
    /// Tokenize `command_line`.
    ///
    /// Fails with [`DeployError::EmptyCommand`] when it yields no words and
    /// [`DeployError::InvalidCommand`] on unbalanced quoting or a dangling
    /// escape.
    pub fn parse(command_line: &str) -> DeployResult<Self> {
        let words = shlex::split(command_line).ok_or_else(|| DeployError::InvalidCommand {
            command: command_line.to_string(),
        })?;

        let mut words = words.into_iter();
        let program = words.next().ok_or(DeployError::EmptyCommand)?;

        Ok(Self {
            command_line: command_line.to_string(),
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command and return its combined output.
    pub async fn invoke(&self, timeout: Option<Duration>) -> DeployResult<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        let failed = |reason: String, output: String| DeployError::ActionExecFailed {
            command: self.command_line.clone(),
            reason,
            output,
        };

        match run_captured(&mut cmd, timeout).await {
            Ok(Completion::Exited(captured)) if captured.status.success() => Ok(captured.output),
            Ok(Completion::Exited(captured)) => {
                Err(failed(captured.status.to_string(), captured.output))
            }
            Ok(Completion::TimedOut) => Err(DeployError::Timeout {
                program: self.program.clone(),
                after: timeout.unwrap_or_default(),
            }),
            Err(e) => Err(failed(e.to_string(), String::new())),
        }
    }
}
