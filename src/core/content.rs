//! Resolving a page folder to its title and URLs.
//!
//! The classifier only needs one question answered about pages: given the
//! folder a changed page file lives in, what is the page called and where does
//! it live on the site? [`ContentLookup`] is that question. [`FilesystemPages`]
//! answers it by reading the page folders in the working tree; any plain
//! function or closure with the right signature works too.

use crate::core::config::PushyConfig;
use crate::core::error::{PushyError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What the content repository knows about a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub title: String,
    /// Rendered as part of its parent page instead of at its own URL
    pub is_module: bool,
    /// Raw route, e.g. `/blog/first-post`
    pub route: String,
    pub url: String,
}

pub trait ContentLookup {
    /// Resolve a repository-relative page folder, e.g. `pages/01.blog/first-post`
    fn resolve_page(&self, folder: &str) -> Result<PageInfo>;
}

impl<F> ContentLookup for F
where
    F: Fn(&str) -> Result<PageInfo>,
{
    fn resolve_page(&self, folder: &str) -> Result<PageInfo> {
        self(folder)
    }
}

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    title: Option<String>,
}

/// Page lookup backed by the page folders on disk
pub struct FilesystemPages {
    repo_root: PathBuf,
    pages_root: String,
    page_extension: String,
    site_url: String,
    home: String,
}

impl FilesystemPages {
    pub fn new(repo_root: impl Into<PathBuf>, config: &PushyConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            pages_root: config.pages_root.trim_end_matches('/').to_string(),
            page_extension: config.page_extension.trim_start_matches('.').to_string(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
            home: "home".to_string(),
        }
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = home.into();
        self
    }

    fn find_page_file(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.to_string_lossy() == self.page_extension)
            })
            .collect();
        candidates.sort();
        Ok(candidates.into_iter().next())
    }

    fn route_segments<'a>(&self, folder: &'a str) -> Vec<&'a str> {
        let relative = folder
            .trim_matches('/')
            .strip_prefix(self.pages_root.as_str())
            .unwrap_or(folder)
            .trim_matches('/');

        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(strip_order_prefix)
            .collect()
    }
}

impl ContentLookup for FilesystemPages {
    fn resolve_page(&self, folder: &str) -> Result<PageInfo> {
        let dir = self.repo_root.join(folder);
        if !dir.is_dir() {
            return Err(PushyError::page_not_found(folder));
        }
        let page_file = self
            .find_page_file(&dir)?
            .ok_or_else(|| PushyError::page_not_found(folder))?;

        let segments = self.route_segments(folder);
        let slug = segments.last().copied().unwrap_or(self.home.as_str());
        let is_module = slug.starts_with('_');

        let content = std::fs::read_to_string(&page_file)?;
        let title = match read_frontmatter(&content) {
            Ok(frontmatter) => frontmatter.title,
            Err(e) => {
                log::warn!("Ignoring frontmatter of {}: {e}", page_file.display());
                None
            }
        }
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| slug.trim_start_matches('_').to_string());

        let route = format!("/{}", segments.join("/"));
        let public_route = if segments.len() == 1 && segments[0] == self.home {
            "/".to_string()
        } else {
            route.clone()
        };

        Ok(PageInfo {
            title,
            is_module,
            url: format!("{}{}", self.site_url, public_route),
            route,
        })
    }
}

/// `01.blog` -> `blog`; folders without a numeric prefix are returned as is
fn strip_order_prefix(segment: &str) -> &str {
    match segment.split_once('.') {
        Some((order, rest))
            if !order.is_empty() && !rest.is_empty() && order.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest
        }
        _ => segment,
    }
}

fn read_frontmatter(content: &str) -> Result<Frontmatter> {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return Ok(Frontmatter::default());
    }

    let yaml: Vec<&str> = lines.take_while(|line| line.trim_end() != "---").collect();
    if yaml.iter().all(|line| line.trim().is_empty()) {
        return Ok(Frontmatter::default());
    }
    Ok(serde_yaml::from_str(&yaml.join("\n"))?)
}
