//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing config file is not an error: the service logs a warning and
//! starts with compiled defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "RECIPEBOX_ROOT_FOLDER";

/// Environment variable overriding the config file location
pub const CONFIG_FILE_ENV: &str = "RECIPEBOX_CONFIG";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "recipebox.db";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Two weeks
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 336;
/// Ten years
pub const MAX_SESSION_TTL_HOURS: i64 = 87_600;
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub bind_addr: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub session_ttl_hours: Option<i64>,
    pub page_size: Option<i64>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Load a config file, falling back to defaults when it does not exist
    ///
    /// A file that exists but cannot be parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file not found at {}, using compiled defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config file: {}", path.display());
        Ok(config)
    }
}

/// Locate the config file: explicit path, then env var, then platform default
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("recipebox").join("config.toml"))
}

/// Resolve the root folder following the documented priority order
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("recipebox"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\recipebox"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("recipebox"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/recipebox"))
    } else {
        // ~/.local/share/recipebox (or /var/lib/recipebox without a home)
        dirs::data_local_dir()
            .map(|d| d.join("recipebox"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/recipebox"))
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    pub log_level: String,
    pub session_ttl_hours: i64,
    pub page_size: i64,
}

impl ServiceConfig {
    /// Merge a TOML config with compiled defaults and validate ranges
    pub fn resolve(cli_root_folder: Option<&Path>, toml_config: &TomlConfig) -> Result<Self> {
        let session_ttl_hours = toml_config
            .session_ttl_hours
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS);
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(Error::Config(format!(
                "session_ttl_hours must be between 1 and {} (got {})",
                MAX_SESSION_TTL_HOURS, session_ttl_hours
            )));
        }

        let page_size = toml_config.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=500).contains(&page_size) {
            return Err(Error::Config(format!(
                "page_size must be between 1 and 500 (got {})",
                page_size
            )));
        }

        Ok(Self {
            root_folder: resolve_root_folder(cli_root_folder, toml_config),
            bind_addr: toml_config
                .bind_addr
                .clone()
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port: toml_config.port.unwrap_or(DEFAULT_PORT),
            log_level: toml_config
                .log_level
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            session_ttl_hours,
            page_size,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    /// Create the root folder if it is missing
    pub fn ensure_root_folder(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml() {
        let config = TomlConfig::from_toml_str("port = 8080\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.root_folder.is_none());
    }

    #[test]
    fn test_parse_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cli_root_folder_wins() {
        let toml_config = TomlConfig {
            root_folder: Some(PathBuf::from("/from/toml")),
            ..Default::default()
        };
        let resolved = resolve_root_folder(Some(Path::new("/from/cli")), &toml_config);
        assert_eq!(resolved, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_service_config_defaults() {
        let config =
            ServiceConfig::resolve(Some(Path::new("/tmp/rb")), &TomlConfig::default()).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/rb/recipebox.db"));
    }

    #[test]
    fn test_service_config_rejects_bad_ranges() {
        let toml_config = TomlConfig {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(ServiceConfig::resolve(Some(Path::new("/tmp")), &toml_config).is_err());

        for ttl in [-1, 0, MAX_SESSION_TTL_HOURS + 1, i64::MAX] {
            let toml_config = TomlConfig {
                session_ttl_hours: Some(ttl),
                ..Default::default()
            };
            assert!(
                ServiceConfig::resolve(Some(Path::new("/tmp")), &toml_config).is_err(),
                "ttl {} accepted",
                ttl
            );
        }

        let toml_config = TomlConfig {
            session_ttl_hours: Some(MAX_SESSION_TTL_HOURS),
            ..Default::default()
        };
        let config = ServiceConfig::resolve(Some(Path::new("/tmp")), &toml_config).unwrap();
        assert_eq!(config.session_ttl_hours, MAX_SESSION_TTL_HOURS);
    }
}
