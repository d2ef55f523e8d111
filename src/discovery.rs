//! Descriptor discovery
//!
//! Walks the watch directory fresh every cycle. Nothing is cached between
//! cycles.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::git::GIT_DIRECTORY;

/// Find every file below `root` whose name ends with `descriptor_name`.
///
/// Hidden and git-ignored files are included; `.git` directories are not
/// descended into and symlinks are not followed. Unreadable entries are logged
/// and skipped. Results are sorted for stable log output.
pub fn find_descriptors(root: &Path, descriptor_name: &str) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| entry.file_name() != GIT_DIRECTORY)
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };

        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(descriptor_name));

        if is_file && matches {
            found.push(entry.into_path());
        }
    }

    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn finds_descriptors_recursively() {
        let root = tempdir().unwrap();
        touch(&root.path().join("a/Deployfile"));
        touch(&root.path().join("b/c/Deployfile"));
        touch(&root.path().join("b/README.md"));

        let found = find_descriptors(root.path(), "Deployfile");
        assert_eq!(
            found,
            vec![
                root.path().join("a/Deployfile"),
                root.path().join("b/c/Deployfile"),
            ]
        );
    }

    #[test]
    fn matches_name_suffix() {
        let root = tempdir().unwrap();
        touch(&root.path().join("site/staging.Deployfile"));
        touch(&root.path().join("site/Deployfile.bak"));

        let found = find_descriptors(root.path(), "Deployfile");
        assert_eq!(found, vec![root.path().join("site/staging.Deployfile")]);
    }

    #[test]
    fn includes_hidden_and_ignored_paths() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(".gitignore"), "ignored/\n").unwrap();
        touch(&root.path().join(".hidden/Deployfile"));
        touch(&root.path().join("ignored/Deployfile"));

        let found = find_descriptors(root.path(), "Deployfile");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn skips_git_metadata() {
        let root = tempdir().unwrap();
        touch(&root.path().join("site/.git/Deployfile"));
        touch(&root.path().join("site/Deployfile"));

        let found = find_descriptors(root.path(), "Deployfile");
        assert_eq!(found, vec![root.path().join("site/Deployfile")]);
    }

    #[test]
    fn directory_named_like_descriptor_is_ignored() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("Deployfile")).unwrap();

        assert!(find_descriptors(root.path(), "Deployfile").is_empty());
    }

    #[test]
    fn missing_root_yields_nothing() {
        let root = tempdir().unwrap();
        let missing = root.path().join("nope");
        assert!(find_descriptors(&missing, "Deployfile").is_empty());
    }
}
