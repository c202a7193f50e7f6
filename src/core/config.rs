use crate::core::dirs::get_config_file;
use crate::core::error::{PushyError, Result};
use crate::core::status_flag::StatusFlag;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Path or name of the git binary
    pub bin: String,
    pub timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            bin: "git".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Configuration snapshot handed to the publishing core.
///
/// Loaded once per invocation; nothing in the core reads global state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PushyConfig {
    pub git: GitConfig,
    /// Tracked root folders, relative to the repository root
    pub folders: Vec<String>,
    /// Log every git invocation and its output
    pub logging: bool,
    /// Status markers a user should see
    pub status_select: String,
    pub pages_root: String,
    pub page_extension: String,
    pub config_root: String,
    pub plugin_config_root: String,
    pub site_url: String,
    pub admin_route: String,
    pub user_asset_path: String,
    pub preview_extensions: Vec<String>,
    pub author: AuthorConfig,
}

impl Default for PushyConfig {
    fn default() -> Self {
        Self {
            git: GitConfig::default(),
            folders: vec!["pages".to_string(), "config".to_string()],
            logging: false,
            status_select: "MTDRC?A".to_string(),
            pages_root: "pages/".to_string(),
            page_extension: ".md".to_string(),
            config_root: "config/".to_string(),
            plugin_config_root: "config/plugins".to_string(),
            site_url: String::new(),
            admin_route: "/admin".to_string(),
            user_asset_path: "user".to_string(),
            preview_extensions: ["jpg", "jpeg", "png", "gif", "svg", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            author: AuthorConfig::default(),
        }
    }
}

impl PushyConfig {
    /// Load from an explicit file, or from the default location when `path` is None.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_file = get_config_file()?;
                if default_file.exists() {
                    Self::load_from(&default_file)
                } else {
                    log::debug!(
                        "No config file at {}, using defaults",
                        default_file.display()
                    );
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PushyError::config_read_failed(path, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PushyError::config_parse_failed(path, e))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        get_config_file()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.git.timeout_secs)
    }

    pub fn selected_flags(&self) -> Vec<StatusFlag> {
        StatusFlag::parse_selection(&self.status_select)
    }
}
