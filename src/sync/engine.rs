//! Sync Engine
//!
//! State machine for one target:
//! 1. Classify the target directory from disk
//! 2. Uninitialized: `init`, `remote add`, `fetch`, `checkout -t` (always a change)
//! 3. Initialized: `pull`, then compare `HEAD` before and after
//! 4. On change, run the post-update command if one is configured
//!
//! Nothing is remembered between runs; every call starts from what is on disk.

use std::path::Path;
use std::sync::Arc;

use crate::action::PostUpdateAction;
use crate::descriptor::Descriptor;
use crate::git::{self, GitRunner, SshTransport, TargetState};

use super::options::SyncOptions;
use super::result::{ActionOutcome, SyncOutcome, SyncPath, SyncReport};

/// Brings one target directory in line with its remote branch
pub struct SyncEngine {
    runner: Arc<dyn GitRunner>,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(runner: Arc<dyn GitRunner>, options: SyncOptions) -> Self {
        Self { runner, options }
    }

    /// Sync the target described by `descriptor`.
    ///
    /// Never fails: errors are logged and reported in the returned
    /// [`SyncReport`].
    pub async fn sync(&self, descriptor: &Descriptor) -> SyncReport {
        let dir = descriptor.target_dir();
        let transport = SshTransport::with_identity(descriptor.identity());

        let outcome = match TargetState::classify(dir) {
            TargetState::Initialized => self.update(dir, &transport).await,
            TargetState::Uninitialized => self.initialize(descriptor, dir, &transport).await,
        };

        let action = match (&outcome, descriptor.post_update_command()) {
            (SyncOutcome::Changed { path, .. }, Some(command))
                if *path == SyncPath::Pull || self.options.action_on_clone =>
            {
                Some(self.run_action(dir, command).await)
            }
            _ => None,
        };

        SyncReport {
            target: dir.to_path_buf(),
            outcome,
            action,
        }
    }

    async fn initialize(
        &self,
        descriptor: &Descriptor,
        dir: &Path,
        transport: &SshTransport,
    ) -> SyncOutcome {
        tracing::info!(
            target_dir = %dir.display(),
            url = %descriptor.url,
            branch = %descriptor.branch,
            "repository not cloned, initializing deployment"
        );

        match git::clone(
            self.runner.as_ref(),
            dir,
            transport,
            &descriptor.url,
            &descriptor.branch,
        )
        .await
        {
            Ok(output) => {
                tracing::info!(
                    target_dir = %dir.display(),
                    output = %output.trim_end(),
                    "successfully deployed git repository"
                );
                SyncOutcome::Changed {
                    path: SyncPath::Clone,
                    output,
                }
            }
            Err(error) => {
                tracing::error!(target_dir = %dir.display(), error = %error, "failed to clone repository");
                SyncOutcome::Failed {
                    path: SyncPath::Clone,
                    error,
                }
            }
        }
    }

    async fn update(&self, dir: &Path, transport: &SshTransport) -> SyncOutcome {
        let runner = self.runner.as_ref();

        let before = git::head_commit(runner, dir, transport).await;
        let output = match git::pull(runner, dir, transport).await {
            Ok(output) => output,
            Err(error) => {
                tracing::error!(target_dir = %dir.display(), error = %error, "failed to pull incoming changes");
                return SyncOutcome::Failed {
                    path: SyncPath::Pull,
                    error,
                };
            }
        };
        let after = git::head_commit(runner, dir, transport).await;

        let changed = match (&before, &after) {
            (Some(before), Some(after)) => before != after,
            _ => !git::is_up_to_date(&output),
        };

        if changed {
            tracing::info!(
                target_dir = %dir.display(),
                from = before.as_deref().unwrap_or("unknown"),
                to = after.as_deref().unwrap_or("unknown"),
                output = %output.trim_end(),
                "deployed new HEAD"
            );
            SyncOutcome::Changed {
                path: SyncPath::Pull,
                output,
            }
        } else {
            tracing::debug!(target_dir = %dir.display(), "already up to date");
            SyncOutcome::NoChange
        }
    }

    async fn run_action(&self, dir: &Path, command: &str) -> ActionOutcome {
        let result = match PostUpdateAction::parse(command) {
            Ok(action) => action.invoke(self.options.action_timeout).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(output) => {
                tracing::info!(
                    target_dir = %dir.display(),
                    command = command,
                    output = %output.trim_end(),
                    "executed post-update command"
                );
                ActionOutcome::Succeeded { output }
            }
            Err(error) => {
                tracing::error!(
                    target_dir = %dir.display(),
                    command = command,
                    error = %error,
                    "failed to execute post-update command"
                );
                ActionOutcome::Failed { error }
            }
        }
    }
}
