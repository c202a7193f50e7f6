//! Turning raw change records into UI-ready [`ChangedItem`]s.
//!
//! Rules, first match wins:
//! 1. a page file under the pages root is a Page (or a Module when the content
//!    repository says so); deleted pages are not looked up
//! 2. anything under the config root is Config, with an admin URL derived
//!    from the path
//! 3. everything else is Other, with a site URL for previewable media
//!
//! Only rule 1 talks to the outside world, and its failures are absorbed:
//! `classify` never fails.

use crate::core::config::PushyConfig;
use crate::core::content::ContentLookup;
use crate::core::registry::{ChangeSetRegistry, ChangedItem, ItemType};
use crate::core::status_parser::ChangeRecord;

pub const MODULE_TITLE_SUFFIX: &str = " (module)";

pub struct ChangeClassifier {
    pages_root: String,
    page_extension: String,
    config_root: String,
    plugin_config_root: String,
    site_url: String,
    admin_route: String,
    user_asset_path: String,
    preview_extensions: Vec<String>,
}

impl ChangeClassifier {
    pub fn new(config: &PushyConfig) -> Self {
        Self {
            pages_root: config.pages_root.clone(),
            page_extension: config.page_extension.clone(),
            config_root: config.config_root.clone(),
            plugin_config_root: config.plugin_config_root.clone(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
            admin_route: config.admin_route.trim_end_matches('/').to_string(),
            user_asset_path: config.user_asset_path.trim_matches('/').to_string(),
            preview_extensions: config
                .preview_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn classify(&self, record: ChangeRecord, lookup: &dyn ContentLookup) -> ChangedItem {
        if self.is_page(&record.path) {
            self.classify_page(record, lookup)
        } else if record.path.starts_with(self.config_root.as_str()) {
            self.classify_config(record)
        } else {
            self.classify_other(record)
        }
    }

    /// Classify every record into a fresh registry, keeping their order
    pub fn classify_all(
        &self,
        records: Vec<ChangeRecord>,
        lookup: &dyn ContentLookup,
    ) -> ChangeSetRegistry {
        let mut registry = ChangeSetRegistry::new();
        for record in records {
            let path = record.path.clone();
            registry.put(path, self.classify(record, lookup));
        }
        registry
    }

    fn is_page(&self, path: &str) -> bool {
        path.starts_with(self.pages_root.as_str()) && path.ends_with(self.page_extension.as_str())
    }

    fn classify_page(&self, record: ChangeRecord, lookup: &dyn ContentLookup) -> ChangedItem {
        if record.is_deleted() {
            return ChangedItem::bare(record, ItemType::Page);
        }

        let folder = parent_folder(&record.path).to_string();
        let page = match lookup.resolve_page(&folder) {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Could not resolve page for {}: {e}", record.path);
                return ChangedItem::bare(record, ItemType::Other);
            }
        };

        let admin_url = format!("{}{}/pages{}", self.site_url, self.admin_route, page.route);
        if page.is_module {
            ChangedItem::bare(record, ItemType::Module)
                .with_title(format!("{}{MODULE_TITLE_SUFFIX}", page.title))
                .with_admin_url(admin_url)
        } else {
            ChangedItem::bare(record, ItemType::Page)
                .with_title(page.title)
                .with_admin_url(admin_url)
                .with_site_url(page.url)
        }
    }

    fn classify_config(&self, record: ChangeRecord) -> ChangedItem {
        let relative = if record.path.starts_with(self.plugin_config_root.as_str()) {
            record
                .path
                .strip_prefix(self.config_root.as_str())
                .unwrap_or(&record.path)
        } else {
            record.path.as_str()
        };
        let admin_url = strip_extension(relative).to_string();
        ChangedItem::bare(record, ItemType::Config).with_admin_url(admin_url)
    }

    fn classify_other(&self, record: ChangeRecord) -> ChangedItem {
        let previewable = extension(&record.path)
            .map(|ext| ext.to_lowercase())
            .is_some_and(|ext| self.preview_extensions.contains(&ext));
        if !previewable {
            return ChangedItem::bare(record, ItemType::Other);
        }

        let site_url = [
            self.site_url.as_str(),
            self.user_asset_path.as_str(),
            record.path.trim_start_matches('/'),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
        ChangedItem::bare(record, ItemType::Other).with_site_url(site_url)
    }
}

fn parent_folder(path: &str) -> &str {
    path.rsplit_once('/').map(|(folder, _)| folder).unwrap_or("")
}

/// Extension of the last path segment, ignoring dotfiles such as `.gitkeep`
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&name[dot + 1..]),
    }
}

fn strip_extension(path: &str) -> &str {
    match extension(path) {
        Some(ext) => &path[..path.len() - ext.len() - 1],
        None => path,
    }
}
