//! Cycle driver and fan-out coordinator
//!
//! One cycle discovers every descriptor, launches one task per git target and
//! waits for all of them before the next sleep. Tasks share nothing mutable;
//! the per-cycle `JoinSet` is the only coordination point and is dropped at
//! the end of the cycle.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::Settings;
use crate::descriptor::{Descriptor, Provider};
use crate::discovery::find_descriptors;
use crate::sync::{SyncEngine, SyncOutcome, SyncReport};

/// Tally of one cycle
#[derive(Debug, Default)]
pub struct CycleSummary {
    /// Descriptors that failed to load or validate, name another provider, or
    /// share a target directory with an earlier descriptor
    pub skipped: usize,
    /// Reports of every target that was synced, in completion order
    pub reports: Vec<SyncReport>,
    /// Workers that panicked
    pub crashed: usize,
}

impl CycleSummary {
    pub fn changed(&self) -> usize {
        self.count(|o| o.is_changed())
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::NoChange))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| o.is_failed()) + self.crashed
    }

    fn count(&self, pred: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Drives sync cycles over a watch directory
pub struct Coordinator {
    settings: Settings,
    engine: Arc<SyncEngine>,
}

impl Coordinator {
    pub fn new(settings: Settings, engine: Arc<SyncEngine>) -> Self {
        Self { settings, engine }
    }

    /// Run cycles until `shutdown` resolves, or exactly one in one-shot mode.
    ///
    /// `shutdown` is only observed between cycles; a running cycle is always
    /// joined first.
    pub async fn run(&self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            self.run_cycle().await;

            if self.settings.one_shot {
                return;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.settings.cycle_time) => {}
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested, stopping");
                    return;
                }
            }
        }
    }

    /// Discover all targets, sync them concurrently and wait for every one.
    pub async fn run_cycle(&self) -> CycleSummary {
        let root = self.settings.watch_dir.clone();
        let name = self.settings.descriptor_name.clone();

        let (descriptors, skipped) = match tokio::task::spawn_blocking(move || {
            load_descriptors(&root, &name)
        })
        .await
        {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!(error = %e, "descriptor discovery crashed");
                (Vec::new(), 0)
            }
        };

        let mut summary = CycleSummary {
            skipped,
            ..CycleSummary::default()
        };

        let mut workers = JoinSet::new();
        for descriptor in descriptors {
            let engine = Arc::clone(&self.engine);
            workers.spawn(async move { engine.sync(&descriptor).await });
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    tracing::error!(error = %e, "sync worker crashed");
                    summary.crashed += 1;
                }
            }
        }

        tracing::info!(
            targets = summary.reports.len() + summary.crashed,
            changed = summary.changed(),
            unchanged = summary.unchanged(),
            failed = summary.failed(),
            skipped = summary.skipped,
            "cycle complete"
        );

        summary
    }
}

/// Find and load every descriptor below `root`, keeping the git ones.
///
/// At most one descriptor is kept per target directory: the first usable one
/// in path order. Returns the usable descriptors and how many were skipped.
pub fn load_descriptors(root: &Path, descriptor_name: &str) -> (Vec<Descriptor>, usize) {
    let mut descriptors = Vec::new();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut skipped = 0;

    for path in find_descriptors(root, descriptor_name) {
        let Some(descriptor) = load_git_descriptor(&path) else {
            skipped += 1;
            continue;
        };

        let target = descriptor.target_dir().to_path_buf();
        if let Some(kept) = claimed.get(&target) {
            tracing::warn!(
                file = %path.display(),
                kept = %kept.display(),
                target_dir = %target.display(),
                "target directory already has a descriptor, ignoring this one"
            );
            skipped += 1;
            continue;
        }

        claimed.insert(target, path);
        descriptors.push(descriptor);
    }

    (descriptors, skipped)
}

fn load_git_descriptor(path: &Path) -> Option<Descriptor> {
    let (descriptor, warnings) = match Descriptor::load_with_warnings(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, "failed to load descriptor");
            return None;
        }
    };

    for warning in &warnings {
        tracing::warn!(file = %warning.file.display(), key = %warning.key, "unknown descriptor key");
    }

    if descriptor.provider != Provider::Git {
        tracing::debug!(
            file = %path.display(),
            provider = %descriptor.provider,
            "skipping descriptor for unsupported provider"
        );
        return None;
    }

    if let Err(e) = descriptor.validate() {
        tracing::error!(file = %path.display(), error = %e, "invalid descriptor");
        return None;
    }

    Some(descriptor)
}
