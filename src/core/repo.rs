//! The repository the editors publish from.
//!
//! [`PushyRepo`] ties a [`CommandRunner`] to the tracked folders and status
//! filter from the configuration. It queries git afresh on every call; the
//! working tree is the only state that outlives a request.
//!
//! # Public API
//! - [`PushyRepo`]: status listing, change detection, classified items
//! - [`discover_root`]: resolve any path inside a working tree to its root
//! - [`is_git_initialized`]: whether a directory is inside a git working tree

use crate::core::classifier::ChangeClassifier;
use crate::core::config::PushyConfig;
use crate::core::content::ContentLookup;
use crate::core::error::{PushyError, Result};
use crate::core::process::{CommandRunner, ProcessRunner};
use crate::core::registry::ChangeSetRegistry;
use crate::core::status_parser::{ChangeRecord, StatusFilter, StatusParser};
use std::path::{Path, PathBuf};

pub struct PushyRepo<R: CommandRunner = ProcessRunner> {
    runner: R,
    root: PathBuf,
    folders: Vec<String>,
    filter: StatusFilter,
}

impl PushyRepo<ProcessRunner> {
    /// Open the working tree containing `path`, running git as configured
    pub fn open(path: &Path, config: &PushyConfig) -> Result<Self> {
        let root = discover_root(path)?;
        let runner = ProcessRunner::from_config(config, &root);
        Ok(Self::with_runner(runner, root, config))
    }
}

impl<R: CommandRunner> PushyRepo<R> {
    pub fn with_runner(runner: R, root: impl Into<PathBuf>, config: &PushyConfig) -> Self {
        Self {
            runner,
            root: root.into(),
            folders: config.folders.clone(),
            filter: StatusFilter::from_config(config),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw porcelain lines for the tracked folders, renames detected
    pub fn status_lines(&self) -> Result<Vec<String>> {
        let mut args = vec!["status", "--porcelain", "--find-renames", "-u", "--"];
        args.extend(self.folders.iter().map(String::as_str));

        let output = self.runner.execute(&args)?;
        if output.is_noop() {
            log::debug!("git status reported nothing to do");
            return Ok(Vec::new());
        }
        Ok(output.lines)
    }

    /// Parsed and filtered change records, in the order git reported them
    pub fn status_select(&self) -> Result<Vec<ChangeRecord>> {
        let lines = self.status_lines()?;
        let records = self.filter.apply(StatusParser::parse(&lines));
        log::debug!(
            "{} of {} status lines selected",
            records.len(),
            lines.len()
        );
        Ok(records)
    }

    /// Classify the pending changes into a fresh registry
    pub fn changed_items(
        &self,
        classifier: &ChangeClassifier,
        lookup: &dyn ContentLookup,
    ) -> Result<ChangeSetRegistry> {
        Ok(classifier.classify_all(self.status_select()?, lookup))
    }

    /// Whether any tracked folder has changes, refreshing the index first
    pub fn has_changes(&self) -> Result<bool> {
        if let Err(e) = self.runner.execute(&["update-index", "-q", "--refresh"]) {
            log::debug!("Index refresh reported: {e}");
        }

        let mut args = vec!["status", "--porcelain", "--"];
        args.extend(self.folders.iter().map(String::as_str));
        let output = self.runner.execute(&args)?;
        Ok(output.lines.iter().any(|line| !line.trim().is_empty()))
    }
}

/// Root of the working tree containing `path`
pub fn discover_root(path: &Path) -> Result<PathBuf> {
    let repo = git2::Repository::discover(path).map_err(|e| {
        log::debug!("Repository discovery from {} failed: {e}", path.display());
        PushyError::NotInGitRepo
    })?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| PushyError::BareRepository {
            path: repo.path().to_path_buf(),
        })
}

pub fn is_git_initialized(path: &Path) -> bool {
    discover_root(path).is_ok()
}
