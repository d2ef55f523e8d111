//! Sync Options

use std::time::Duration;

use crate::config::Settings;

/// Options for the sync engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Limit for the post-update command; `None` waits forever
    pub action_timeout: Option<Duration>,
    /// Run the post-update command after a first-time clone
    pub action_on_clone: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            action_timeout: None,
            action_on_clone: true,
        }
    }
}

impl From<&Settings> for SyncOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            action_timeout: settings.command_timeout,
            action_on_clone: settings.action_on_clone,
        }
    }
}
