//! Publishing a selection of changed items as one attributed commit.
//!
//! The client sends back the items the editor ticked plus a commit message.
//! [`PublishCoordinator`] stages exactly those paths, in the order given, and
//! commits once with the selection as the pathspec, so other staged entries
//! stay out of the commit. The commit is the only irreversible step and
//! happens last; a staging failure aborts before it.
//!
//! Staging that succeeded before a failure is left in the index. The next
//! listing shows it, and re-publishing the same selection stages the same
//! paths again, which git treats as a no-op.
//!
//! Nothing here serializes concurrent publishes against the same working
//! tree.

use crate::core::error::{PushyError, Result};
use crate::core::identity::Author;
use crate::core::process::CommandRunner;
use crate::core::status_flag::StatusFlag;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

pub const PUBLISHED_ALERT: &str = "Items have been published.";
pub const NOTHING_TO_PUBLISH_ALERT: &str = "There was nothing to publish.";

/// One item the editor selected, as echoed back by the client.
///
/// The client sends whole listing items; the display fields are accepted and
/// ignored, anything else is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selection {
    pub path: String,
    pub index: StatusFlag,
    #[serde(default)]
    pub orig_path: Option<String>,

    #[serde(default, rename = "working")]
    _working: Option<IgnoredAny>,
    #[serde(default, rename = "type")]
    _type: Option<IgnoredAny>,
    #[serde(default, rename = "title")]
    _title: Option<IgnoredAny>,
    #[serde(default, rename = "adminUrl")]
    _admin_url: Option<IgnoredAny>,
    #[serde(default, rename = "siteUrl")]
    _site_url: Option<IgnoredAny>,
}

impl Selection {
    pub fn new(path: impl Into<String>, index: StatusFlag) -> Self {
        Self {
            path: path.into(),
            index,
            orig_path: None,
            _working: None,
            _type: None,
            _title: None,
            _admin_url: None,
            _site_url: None,
        }
    }

    pub fn renamed(orig_path: impl Into<String>, path: impl Into<String>) -> Self {
        let mut selection = Self::new(path, StatusFlag::Renamed);
        selection.orig_path = Some(orig_path.into());
        selection
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishRequest {
    pub items: Vec<Selection>,
    pub message: String,
}

impl PublishRequest {
    pub fn new(items: Vec<Selection>, message: impl Into<String>) -> Self {
        Self {
            items,
            message: message.into(),
        }
    }

    /// Parse and validate a request body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(PushyError::invalid_request(
                "No valid data submitted for task 'Publish'",
            ));
        }
        let request: Self = serde_json::from_slice(body)
            .map_err(|e| PushyError::invalid_request(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(PushyError::invalid_request("A commit message is required"));
        }
        for selection in &self.items {
            if selection.path.trim().is_empty() {
                return Err(PushyError::invalid_request("Selected item has an empty path"));
            }
            let has_orig = matches!(selection.orig_path.as_deref(), Some(orig) if !orig.trim().is_empty());
            if selection.index == StatusFlag::Renamed && !has_orig {
                return Err(PushyError::invalid_request(format!(
                    "Renamed item {} has no orig_path",
                    selection.path
                )));
            }
        }
        Ok(())
    }

    /// Every path the selection touches, originals of renames included
    fn touched_paths(&self) -> Vec<&str> {
        let mut paths = Vec::with_capacity(self.items.len());
        for selection in &self.items {
            if let Some(orig) = selection.orig_path.as_deref() {
                if selection.index == StatusFlag::Renamed {
                    paths.push(orig);
                }
            }
            paths.push(selection.path.as_str());
        }
        paths
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
    pub alert: String,
}

impl PublishResult {
    pub fn success(alert: impl Into<String>) -> Self {
        Self {
            is_success: true,
            alert: alert.into(),
        }
    }

    pub fn failure(alert: impl Into<String>) -> Self {
        Self {
            is_success: false,
            alert: alert.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    NothingToPublish,
}

pub struct PublishCoordinator<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> PublishCoordinator<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    pub fn publish(&self, request: &PublishRequest, author: &Author) -> PublishResult {
        match self.try_publish(request, author) {
            Ok(PublishOutcome::Published) => {
                log::info!("Published {} item(s) as {author}", request.items.len());
                PublishResult::success(PUBLISHED_ALERT)
            }
            Ok(PublishOutcome::NothingToPublish) => {
                log::info!("Publish requested with nothing to commit");
                PublishResult::success(NOTHING_TO_PUBLISH_ALERT)
            }
            Err(e) => {
                log::error!("Publishing failed: {e}");
                PublishResult::failure(format!("There was an error publishing: \"{e}\""))
            }
        }
    }

    pub fn try_publish(&self, request: &PublishRequest, author: &Author) -> Result<PublishOutcome> {
        request.validate()?;
        if request.items.is_empty() {
            return Ok(PublishOutcome::NothingToPublish);
        }

        for selection in &request.items {
            self.stage(selection)?;
        }

        let staged = self.staged_paths(&request.touched_paths())?;
        if staged.is_empty() {
            return Ok(PublishOutcome::NothingToPublish);
        }

        self.commit(&request.message, author, &staged)?;
        Ok(PublishOutcome::Published)
    }

    fn stage(&self, selection: &Selection) -> Result<()> {
        match selection.index {
            StatusFlag::Deleted => self.stage_removal(&selection.path),
            StatusFlag::Renamed => {
                let orig_path = selection.orig_path.as_deref().ok_or_else(|| {
                    PushyError::invalid_request(format!(
                        "Renamed item {} has no orig_path",
                        selection.path
                    ))
                })?;
                self.stage_removal(orig_path)?;
                self.stage_addition(&selection.path)
            }
            _ => self.stage_addition(&selection.path),
        }
    }

    fn stage_addition(&self, path: &str) -> Result<()> {
        log::debug!("Staging {path}");
        self.runner.execute(&["add", "--all", "--", path])?;
        Ok(())
    }

    /// Removes from the index only; a path already gone is not an error
    fn stage_removal(&self, path: &str) -> Result<()> {
        log::debug!("Staging removal of {path}");
        self.runner
            .execute(&["rm", "--cached", "--ignore-unmatch", "--quiet", "--", path])?;
        Ok(())
    }

    /// Selected paths with staged changes, both sides of a rename included
    fn staged_paths(&self, paths: &[&str]) -> Result<Vec<String>> {
        let mut args = vec!["diff", "--cached", "--name-only", "--no-renames", "-z", "--"];
        args.extend_from_slice(paths);
        let output = self.runner.execute(&args)?;
        Ok(output
            .lines
            .join("\n")
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Commits only `paths`; anything else staged stays in the index
    fn commit(&self, message: &str, author: &Author, paths: &[String]) -> Result<()> {
        let author_flag = format!("--author={author}");
        let mut args = vec!["commit", author_flag.as_str(), "-m", message, "--"];
        args.extend(paths.iter().map(String::as_str));
        self.runner.execute(&args).map_err(|e| match e {
            PushyError::Process { output, .. } => PushyError::publish(output),
            other => other,
        })?;
        Ok(())
    }
}
