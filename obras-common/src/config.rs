//! Configuration loading and database URL resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the database connection URL
pub const DATABASE_URL_ENV: &str = "OBRAS_DATABASE_URL";

/// Compiled default database URL (SQLite file in the working directory)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://obras.db";

/// Bootstrap configuration read from the TOML config file
///
/// Every key is optional; anything missing falls through to the next tier.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct TomlConfig {
    /// Database connection URL
    #[serde(default)]
    pub database_url: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// Load `.env` from the working directory (or a parent) into the process environment
///
/// Variables already set in the environment are left alone. Returns the
/// path of the file that was loaded, if any. Call before tracing is
/// initialized so `RUST_LOG` in `.env` takes effect.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load a specific env file into the process environment
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .map_err(|e| Error::Config(format!("Invalid env file {}: {}", path.display(), e)))
}

/// Database URL resolution, priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (including values loaded from `.env`)
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve_database_url(cli_arg: Option<&str>, env_var_name: &str) -> Result<String> {
    let config_file = find_config_file();
    resolve_database_url_from(cli_arg, env_var_name, config_file.as_deref())
}

/// Same as [`resolve_database_url`] with an explicit config file location
pub fn resolve_database_url_from(
    cli_arg: Option<&str>,
    env_var_name: &str,
    config_file: Option<&Path>,
) -> Result<String> {
    // Priority 1: Command-line argument
    if let Some(url) = cli_arg.map(str::trim).filter(|u| !u.is_empty()) {
        debug!("Database URL from command line");
        return Ok(url.to_string());
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(env_var_name) {
        let url = url.trim();
        if !url.is_empty() {
            debug!("Database URL from environment variable {}", env_var_name);
            return Ok(url.to_string());
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = config_file {
        let config = TomlConfig::load(path)?;
        if let Some(url) = config.database_url.filter(|u| !u.trim().is_empty()) {
            debug!("Database URL from config file {}", path.display());
            return Ok(url.trim().to_string());
        }
    }

    // Priority 4: compiled default
    Ok(DEFAULT_DATABASE_URL.to_string())
}

/// Locate the config file for the platform, if one exists
///
/// Linux checks `~/.config/obras/config.toml` first, then `/etc/obras/config.toml`.
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("obras").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/obras/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
