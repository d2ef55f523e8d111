//! Environment overrides

use std::time::Duration;

use super::types::Settings;

/// Apply environment variable overrides (GITDEPLOY_* prefix)
pub fn with_env_overrides(settings: Settings) -> Settings {
    with_overrides_from(settings, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`.
///
/// Invalid values are ignored with a warning and the previous value is kept.
pub fn with_overrides_from(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    // GITDEPLOY_CYCLE_TIME (seconds, at least 1)
    if let Some(value) = lookup("GITDEPLOY_CYCLE_TIME") {
        match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => settings.cycle_time = Duration::from_secs(secs),
            _ => warn_invalid(
                "GITDEPLOY_CYCLE_TIME",
                &value,
                "a positive number of seconds",
            ),
        }
    }

    // GITDEPLOY_TIMEOUT (seconds, 0 disables)
    if let Some(value) = lookup("GITDEPLOY_TIMEOUT") {
        match value.trim().parse::<u64>() {
            Ok(secs) => settings.command_timeout = Settings::timeout_from_secs(secs),
            Err(_) => warn_invalid(
                "GITDEPLOY_TIMEOUT",
                &value,
                "a number of seconds (0 disables)",
            ),
        }
    }

    // GITDEPLOY_ACTION_ON_CLONE
    if let Some(value) = lookup("GITDEPLOY_ACTION_ON_CLONE") {
        match parse_bool(&value) {
            Some(flag) => settings.action_on_clone = flag,
            None => warn_invalid("GITDEPLOY_ACTION_ON_CLONE", &value, "true or false"),
        }
    }

    // GITDEPLOY_DESCRIPTOR
    if let Some(value) = lookup("GITDEPLOY_DESCRIPTOR") {
        if value.trim().is_empty() {
            warn_invalid("GITDEPLOY_DESCRIPTOR", &value, "a non-empty file name");
        } else {
            settings.descriptor_name = value.trim().to_string();
        }
    }

    settings
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn warn_invalid(var: &str, value: &str, expected: &str) {
    tracing::warn!(
        var = var,
        value = value,
        "ignoring invalid environment value, expected {expected}"
    );
}
