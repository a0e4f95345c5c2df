//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a small TOML file. The root folder (where the
//! catalog, playlists, audio and artwork live) is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "STREAMIFY_ROOT_FOLDER";

/// Default HTTP port for streamify-ui
pub const DEFAULT_PORT: u16 = 5790;

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional in the file; a missing file yields the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding metadata.json, playlists/, music/ and album_art/
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: default_port(),
            bind: default_bind(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the platform config file, falling back to defaults
    ///
    /// A missing config file is normal. An unreadable one is logged and
    /// ignored so startup still proceeds.
    pub fn load_or_default() -> Self {
        let path = match config_file_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("No config file: {}", e);
                return Self::default();
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Resolve the root folder from CLI, environment, TOML, then OS default
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get default configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("streamify").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/streamify/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("streamify"))
        .unwrap_or_else(|| PathBuf::from("./streamify_data"))
}

/// File layout under the root folder
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    root: PathBuf,
}

impl LibraryPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Song metadata table, keyed by song id
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join("metadata.json")
    }

    /// Named playlist table
    pub fn playlists_path(&self) -> PathBuf {
        self.root.join("playlists").join("playlists.json")
    }

    /// Folder holding one audio file per song id
    pub fn music_dir(&self) -> PathBuf {
        self.root.join("music")
    }

    /// Folder holding optional cover images
    pub fn artwork_dir(&self) -> PathBuf {
        self.root.join("album_art")
    }
}
