//! SSH transport policy for git child processes
//!
//! # Security
//!
//! The transport skips host-key verification: known-hosts lookups go to
//! `/dev/null` and `StrictHostKeyChecking=no` accepts any host key. This trades
//! host-key pinning for zero-touch automation. Anyone able to intercept the
//! connection to the remote can impersonate it and serve arbitrary content,
//! which the daemon will then deploy. Only use remotes reachable over a network
//! path you trust.

use std::path::{Path, PathBuf};

use tokio::process::Command;

/// Environment variable git reads to override its SSH command
pub const SSH_COMMAND_ENV: &str = "GIT_SSH_COMMAND";

/// Environment variable that stops git from prompting for credentials
pub const TERMINAL_PROMPT_ENV: &str = "GIT_TERMINAL_PROMPT";

/// SSH client binary used by the transport
pub const SSH_BINARY: &str = "ssh";

/// Non-interactive SSH transport, optionally bound to exactly one private key.
///
/// Applied to each git child individually; the daemon's own environment is
/// never modified. Without a key, ssh falls back to its default identities
/// and non-ssh remotes never use the transport at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SshTransport {
    identity_file: Option<PathBuf>,
}

impl SshTransport {
    /// Transport that offers only `identity_file`.
    pub fn new(identity_file: impl Into<PathBuf>) -> Self {
        Self {
            identity_file: Some(identity_file.into()),
        }
    }

    /// Transport pinned to `identity_file` when given, keyless otherwise.
    pub fn with_identity(identity_file: Option<&Path>) -> Self {
        identity_file.map_or_else(Self::default, Self::new)
    }

    /// Render the value of `GIT_SSH_COMMAND`.
    ///
    /// git runs this through a shell, so the key path is shell-quoted.
    pub fn ssh_command(&self) -> String {
        let mut command = format!(
            "{SSH_BINARY} -F /dev/null \
             -o UserKnownHostsFile=/dev/null \
             -o GlobalKnownHostsFile=/dev/null \
             -o StrictHostKeyChecking=no \
             -o BatchMode=yes"
        );

        if let Some(identity) = &self.identity_file {
            let identity = identity.to_string_lossy();
            let identity = shlex::try_quote(&identity)
                .map(|q| q.into_owned())
                .unwrap_or_else(|_| identity.replace('\0', ""));
            command.push_str(" -o IdentitiesOnly=yes -i ");
            command.push_str(&identity);
        }

        command
    }

    /// Apply the transport to a child command's environment.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env(SSH_COMMAND_ENV, self.ssh_command())
            .env(TERMINAL_PROMPT_ENV, "0");
    }
}
