//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "MVCM_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "mvcm.db";

/// Optional settings read from `config.toml`
///
/// Every key is optional; a missing file or missing key falls back to
/// command-line, environment, or compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Folder holding the database file
    pub root_folder: Option<PathBuf>,
    /// HTTP listen port
    pub port: Option<u16>,
    /// Default tracing filter (e.g. "info", "mvcm_catalog=debug")
    pub log_level: Option<String>,
    /// Populate an empty movie table with sample records
    pub seed: Option<bool>,
}

impl TomlConfig {
    /// Parse a config file at `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// Create the root folder if missing and return the database path inside it
pub fn prepare_root_folder(root_folder: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root_folder)?;
    Ok(root_folder.join(DATABASE_FILE))
}

/// Locate the platform config file, if any
///
/// Checks the user config directory first, then `/etc/mvcm` on Linux.
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("mvcm").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/mvcm/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/mvcm
        dirs::data_local_dir()
            .map(|d| d.join("mvcm"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/mvcm"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("mvcm"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/mvcm"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("mvcm"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\mvcm"))
    } else {
        PathBuf::from("./mvcm_data")
    }
}
