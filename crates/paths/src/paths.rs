//! Paths to locations used by Adapta.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};

static CUSTOM_DATA_DIR: RwLock<Option<PathBuf>> = RwLock::new(None);
static CUSTOM_CONFIG_DIR: RwLock<Option<PathBuf>> = RwLock::new(None);

const APP_DIR_NAME: &str = "adapta";

/// Overrides the data directory, e.g. from a `--data-dir` flag.
/// Must be called before anything reads a data path.
pub fn set_custom_data_dir(dir: impl Into<PathBuf>) {
    let dir = dir.into();
    log::info!("[paths] using custom data dir {}", dir.display());
    *CUSTOM_DATA_DIR.write() = Some(dir);
}

pub fn set_custom_config_dir(dir: impl Into<PathBuf>) {
    let dir = dir.into();
    log::info!("[paths] using custom config dir {}", dir.display());
    *CUSTOM_CONFIG_DIR.write() = Some(dir);
}

/// Returns the path to the user's home directory.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the directory bookmarks and other persisted state live in.
pub fn data_dir() -> PathBuf {
    if let Some(custom) = CUSTOM_DATA_DIR.read().clone() {
        return custom;
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| home_dir().join(format!(".{APP_DIR_NAME}")))
}

pub fn config_dir() -> PathBuf {
    if let Some(custom) = CUSTOM_CONFIG_DIR.read().clone() {
        return custom;
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| home_dir().join(format!(".{APP_DIR_NAME}")))
}

pub fn bookmarks_file() -> PathBuf {
    data_dir().join("bookmarks.json")
}

pub fn settings_file() -> PathBuf {
    config_dir().join("settings.json")
}

/// Directory holding `home.html`, `home.css` and `home.js`.
pub fn home_assets_dir() -> PathBuf {
    config_dir().join("home")
}

pub fn downloads_dir() -> PathBuf {
    home_dir().join("Downloads")
}

pub fn fallback_downloads_dir() -> PathBuf {
    data_dir().join("downloads")
}

/// Where the synthesized home page is written for the engine to load.
pub fn home_page_file(temp_dir: &Path) -> PathBuf {
    temp_dir.join("adapta_home.html")
}
