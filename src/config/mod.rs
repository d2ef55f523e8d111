//! Daemon configuration
//!
//! Settings are resolved in this order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GITDEPLOY_*)
//! 3. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{with_env_overrides, with_overrides_from};
pub use types::{Settings, DEFAULT_COMMAND_TIMEOUT, DEFAULT_CYCLE_TIME};
