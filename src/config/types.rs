//! Configuration types

use std::path::PathBuf;
use std::time::Duration;

use crate::descriptor::DESCRIPTOR_FILE_NAME;

/// Default pause between two cycles
pub const DEFAULT_CYCLE_TIME: Duration = Duration::from_secs(60);

/// Default limit for a single external command
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// Resolved daemon settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the tree scanned for descriptors
    pub watch_dir: PathBuf,
    /// Run a single cycle and exit
    pub one_shot: bool,
    /// Sleep between cycles
    pub cycle_time: Duration,
    /// Per-invocation limit for git and post-update commands; `None` waits forever
    pub command_timeout: Option<Duration>,
    /// Run the post-update command after a first-time clone
    pub action_on_clone: bool,
    /// File name suffix that marks a descriptor
    pub descriptor_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            watch_dir: PathBuf::from("."),
            one_shot: false,
            cycle_time: DEFAULT_CYCLE_TIME,
            command_timeout: Some(DEFAULT_COMMAND_TIMEOUT),
            action_on_clone: true,
            descriptor_name: DESCRIPTOR_FILE_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Interpret a timeout given in seconds, where `0` disables it.
    pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
        (secs > 0).then(|| Duration::from_secs(secs))
    }
}
