//! Sync Result
//!
//! Result types for a single target's sync.

use std::path::PathBuf;

use crate::error::DeployError;

/// Which branch of the state machine ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPath {
    /// First-time population of an uninitialized target
    Clone,
    /// `git pull` in an existing working copy
    Pull,
}

/// Final state of one target after a sync attempt
#[derive(Debug)]
pub enum SyncOutcome {
    /// Pull succeeded and nothing was merged
    NoChange,
    /// New content landed (a clone always counts)
    Changed { path: SyncPath, output: String },
    /// A git step failed; nothing else was attempted
    Failed { path: SyncPath, error: DeployError },
}

impl SyncOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, SyncOutcome::Changed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SyncOutcome::Failed { .. })
    }
}

/// Result of running the post-update command
#[derive(Debug)]
pub enum ActionOutcome {
    Succeeded { output: String },
    Failed { error: DeployError },
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Succeeded { .. })
    }
}

/// Everything that happened to one target in one cycle
#[derive(Debug)]
pub struct SyncReport {
    /// Target directory
    pub target: PathBuf,
    pub outcome: SyncOutcome,
    /// `None` when no action was configured or nothing changed
    pub action: Option<ActionOutcome>,
}
