//! Child process execution with captured output and an optional deadline
//!
//! Shared by the git runner and the post-update action invoker.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

/// Output of a child process that ran to completion
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    /// stdout followed by stderr
    pub output: String,
}

/// How a supervised child process ended
#[derive(Debug)]
pub enum Completion {
    Exited(Captured),
    TimedOut,
}

/// Spawn `cmd`, wait for it and capture its output.
///
/// stdin is closed so a prompting child fails instead of hanging. When
/// `timeout` elapses the child is killed and `Completion::TimedOut` is
/// returned.
pub async fn run_captured(
    cmd: &mut Command,
    timeout: Option<Duration>,
) -> std::io::Result<Completion> {
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    // Dropping the future on timeout drops the child, which kills it.
    let wait = child.wait_with_output();
    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, wait).await {
            Ok(result) => result?,
            Err(_) => return Ok(Completion::TimedOut),
        },
        None => wait.await?,
    };

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(Completion::Exited(Captured {
        status: output.status,
        output: combined,
    }))
}
