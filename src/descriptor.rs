//! Deployment descriptors (`Deployfile`)
//!
//! ```toml
//! provider = "git"
//! url = "git@example.com:team/site.git"
//! identity_file = "/etc/gitdeploy/id_ed25519"
//! branch = "main"
//! command = "systemctl reload nginx"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DeployError, DeployResult};

/// Default descriptor file name; any file whose name ends with it matches.
pub const DESCRIPTOR_FILE_NAME: &str = "Deployfile";

/// Source-control provider named by a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Provider {
    Git,
    Other(String),
}

impl From<String> for Provider {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("git") {
            Provider::Git
        } else {
            Provider::Other(value)
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Other(String::new())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Git => f.write_str("git"),
            Provider::Other(name) => f.write_str(name),
        }
    }
}

/// One deployment target, as declared by its descriptor file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Descriptor {
    /// File this descriptor was read from
    #[serde(skip)]
    pub path: PathBuf,

    #[serde(default)]
    pub provider: Provider,

    #[serde(default)]
    pub url: String,

    /// Private key for ssh remotes; other transports need none
    #[serde(default)]
    pub identity_file: Option<PathBuf>,

    #[serde(default)]
    pub branch: String,

    /// Post-update command line
    #[serde(default)]
    pub command: Option<String>,
}

/// Non-fatal descriptor problem (unknown keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorWarning {
    pub key: String,
    pub file: PathBuf,
}

impl Descriptor {
    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> DeployResult<Self> {
        Self::load_with_warnings(path).map(|(descriptor, _)| descriptor)
    }

    /// Read and parse a descriptor file, collecting unknown keys as warnings.
    pub fn load_with_warnings(path: &Path) -> DeployResult<(Self, Vec<DescriptorWarning>)> {
        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parse descriptor `content` that was read from `path`.
    pub fn parse(path: &Path, content: &str) -> DeployResult<(Self, Vec<DescriptorWarning>)> {
        let mut unknown = Vec::new();
        let deserializer = toml::de::Deserializer::new(content);

        let mut descriptor: Descriptor = serde_ignored::deserialize(deserializer, |p| {
            unknown.push(p.to_string());
        })
        .map_err(|e| DeployError::DescriptorParse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        descriptor.path = path.to_path_buf();

        let warnings = unknown
            .into_iter()
            .map(|key| DescriptorWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((descriptor, warnings))
    }

    /// Directory this descriptor keeps in sync
    pub fn target_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Identity key to pin, if one is set.
    pub fn identity(&self) -> Option<&Path> {
        self.identity_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Post-update command, if one is set.
    ///
    /// An empty string means no command. Whitespace-only strings are returned
    /// as-is so running them reports an empty command.
    pub fn post_update_command(&self) -> Option<&str> {
        self.command.as_deref().filter(|c| !c.is_empty())
    }

    /// Check that a git descriptor names everything a sync needs.
    pub fn validate(&self) -> DeployResult<()> {
        let missing: Vec<&str> = [
            ("url", self.url.trim().is_empty()),
            ("branch", self.branch.trim().is_empty()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DeployError::InvalidDescriptor {
                file: self.path.clone(),
                message: format!("missing required key(s): {}", missing.join(", ")),
            })
        }
    }
}
