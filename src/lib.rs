//! gitdeploy - continuous deployment from git branches
//!
//! gitdeploy scans a directory tree for `Deployfile` descriptors. Each one makes
//! its parent directory a mirror of a remote git branch, optionally running a
//! command whenever new content lands.

pub mod action;
pub mod config;
pub mod coordinator;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod git;
pub mod process;
pub mod sync;

// Re-exports for convenience
pub use action::PostUpdateAction;
pub use config::Settings;
pub use coordinator::{Coordinator, CycleSummary};
pub use descriptor::{Descriptor, Provider, DESCRIPTOR_FILE_NAME};
pub use error::{DeployError, DeployResult};
pub use git::{GitCli, GitRunner, SshTransport, TargetState};
pub use sync::{ActionOutcome, SyncEngine, SyncOptions, SyncOutcome, SyncPath, SyncReport};
