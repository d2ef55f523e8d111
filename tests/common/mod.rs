//! Common test utilities for gitdeploy integration tests.
//!
//! This module provides:
//! - `Remote`: a local bare repository with a working clone to push from
//! - helpers to lay out deployment targets under a watch directory
//! - tool detection so tests skip on machines without git

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub const BRANCH: &str = "main";

/// Whether the git client is on `PATH`
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Whether both git and ssh are on `PATH` (required by the binary at startup)
pub fn tools_available() -> bool {
    git_available() && which::which("ssh").is_ok()
}

/// Run fixture git in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Fixture")
        .env("GIT_AUTHOR_EMAIL", "fixture@example.com")
        .env("GIT_COMMITTER_NAME", "Fixture")
        .env("GIT_COMMITTER_EMAIL", "fixture@example.com")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to run git");

    assert!(
        output.status.success(),
        "git {} failed:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Bare remote with a working copy used to publish commits
pub struct Remote {
    root: TempDir,
}

impl Remote {
    /// Create a remote whose `main` branch holds one commit with `index.html`.
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let bare = root.path().join("remote.git");
        let work = root.path().join("work");
        fs::create_dir_all(&bare).unwrap();
        fs::create_dir_all(&work).unwrap();

        git(&bare, &["init", "--bare"]);
        git(&work, &["init"]);
        git(&work, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(&work, &["remote", "add", "origin", bare.to_str().unwrap()]);

        let remote = Self { root };
        remote.commit("index.html", "<h1>v1</h1>\n", "initial");
        remote
    }

    /// URL the daemon clones from
    pub fn url(&self) -> String {
        self.root.path().join("remote.git").display().to_string()
    }

    /// Commit `content` to `file` and push it to the remote branch.
    pub fn commit(&self, file: &str, content: &str, message: &str) {
        let work = self.root.path().join("work");
        fs::write(work.join(file), content).unwrap();
        git(&work, &["add", file]);
        git(&work, &["commit", "-m", message]);
        git(&work, &["push", "origin", BRANCH]);
    }

    /// Current remote head commit
    pub fn head(&self) -> String {
        let work = self.root.path().join("work");
        git(&work, &["rev-parse", "HEAD"]).trim().to_string()
    }
}

/// Create `watch_dir/name/Deployfile` pointing at `url`; returns the target directory.
pub fn add_target(watch_dir: &Path, name: &str, url: &str, command: Option<&str>) -> PathBuf {
    let content = descriptor(url, Some("/nonexistent/deploy_key"), command);
    write_descriptor(&watch_dir.join(name), "Deployfile", &content)
}

/// Like [`add_target`], without an `identity_file` key.
pub fn add_keyless_target(watch_dir: &Path, name: &str, url: &str) -> PathBuf {
    write_descriptor(&watch_dir.join(name), "Deployfile", &descriptor(url, None, None))
}

/// Descriptor file content for a git target on [`BRANCH`]
pub fn descriptor(url: &str, identity_file: Option<&str>, command: Option<&str>) -> String {
    let mut content = format!("provider = \"git\"\nurl = {url:?}\nbranch = \"{BRANCH}\"\n");
    if let Some(identity_file) = identity_file {
        content.push_str(&format!("identity_file = {identity_file:?}\n"));
    }
    if let Some(command) = command {
        content.push_str(&format!("command = {command:?}\n"));
    }
    content
}

/// Write `content` to `target/file_name`; returns `target`.
pub fn write_descriptor(target: &Path, file_name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(target).unwrap();
    fs::write(target.join(file_name), content).unwrap();
    target.to_path_buf()
}
