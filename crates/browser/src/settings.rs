use crate::omnibox::DEFAULT_SEARCH_URL;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User settings, read from `settings.json` in the config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Prefix the search query is appended to.
    pub search_url: String,
    /// Directory containing `home.html`, `home.css` and `home.js`.
    pub home_assets_dir: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    /// Start in dark mode.
    pub dark_mode: bool,
    pub tab_title_max_chars: usize,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            home_assets_dir: None,
            download_dir: None,
            dark_mode: false,
            tab_title_max_chars: 20,
        }
    }
}

impl BrowserSettings {
    /// Loads settings from `path`. A missing file yields the defaults; a
    /// malformed one is reported and also yields the defaults.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(error) => {
                log::warn!("[browser] ignoring settings: {error:#}");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Option<Self>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error).with_context(|| format!("reading {}", path.display()));
            }
        };
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(settings))
    }

    pub fn home_assets_dir(&self) -> PathBuf {
        self.home_assets_dir
            .clone()
            .unwrap_or_else(paths::home_assets_dir)
    }
}
