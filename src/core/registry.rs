//! Classified change records and the ordered registry that holds them.
//!
//! # Public API
//! - [`ItemType`]: Page, Module, Config or Other
//! - [`ChangedItem`]: One classified, UI-ready changed path
//! - [`ChangeSetRegistry`]: Path to item mapping in git's discovery order
//!
//! The registry lives for one listing: built from a fresh `git status`,
//! serialized to the client, then dropped. Serialization writes a JSON object
//! whose keys appear in the order git reported the paths.

use crate::core::error::{PushyError, Result};
use crate::core::status_flag::StatusFlag;
use crate::core::status_parser::ChangeRecord;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Page,
    Module,
    Config,
    Other,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Page => "page",
            ItemType::Module => "module",
            ItemType::Config => "config",
            ItemType::Other => "other",
        }
    }
}

/// A changed path enriched with what the admin interface needs to show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedItem {
    working: StatusFlag,
    index: StatusFlag,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    orig_path: Option<String>,
    #[serde(rename = "type")]
    item_type: ItemType,
    title: String,
    #[serde(rename = "adminUrl")]
    admin_url: String,
    #[serde(rename = "siteUrl")]
    site_url: String,
}

impl ChangedItem {
    /// An item with empty title and URLs
    pub fn bare(record: ChangeRecord, item_type: ItemType) -> Self {
        Self {
            working: record.working,
            index: record.index,
            path: record.path,
            orig_path: record.orig_path,
            item_type,
            title: String::new(),
            admin_url: String::new(),
            site_url: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Self {
        self.admin_url = admin_url.into();
        self
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    pub fn working(&self) -> StatusFlag {
        self.working
    }

    pub fn index(&self) -> StatusFlag {
        self.index
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn orig_path(&self) -> Option<&str> {
        self.orig_path.as_deref()
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// The marker a listing shows: the staged state when there is one
    pub fn display_flag(&self) -> StatusFlag {
        match self.index {
            StatusFlag::Unmodified => self.working,
            index => index,
        }
    }
}

/// Ordered, key-unique mapping from path to [`ChangedItem`]
#[derive(Debug, Clone, Default)]
pub struct ChangeSetRegistry {
    entries: Vec<(String, ChangedItem)>,
    positions: HashMap<String, usize>,
}

impl ChangeSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item; a path seen before keeps its original position
    pub fn put(&mut self, path: impl Into<String>, item: ChangedItem) {
        let path = path.into();
        match self.positions.get(&path) {
            Some(&position) => {
                log::debug!("Replacing changed item for {path}");
                self.entries[position].1 = item;
            }
            None => {
                self.positions.insert(path.clone(), self.entries.len());
                self.entries.push((path, item));
            }
        }
    }

    pub fn get(&self, path: &str) -> Result<&ChangedItem> {
        self.positions
            .get(path)
            .map(|&position| &self.entries[position].1)
            .ok_or_else(|| PushyError::not_found(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChangedItem)> {
        self.entries
            .iter()
            .map(|(path, item)| (path.as_str(), item))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for ChangeSetRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, item) in &self.entries {
            map.serialize_entry(path, item)?;
        }
        map.end()
    }
}
