//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main.rs)          │
//! │     --db ./shop.db                                                     │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TESSERA_DB_PATH=./shop.db                                          │
//! │     TESSERA_MAX_BARCODE_TRIES=50                                       │
//! │     TESSERA_STOCK_UOMS="шт, Nos"                                       │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/tessera/tessera.toml (Linux)                             │
//! │     ~/Library/Application Support/com.tessera.tessera/tessera.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/tessera/tessera.db"
//! max_connections = 5
//!
//! [barcode]
//! max_tries = 20
//!
//! [stock]
//! uom_candidates = ["шт", "Nos"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use tessera_core::{BatchOptions, DEFAULT_MAX_BARCODE_TRIES};

const CONFIG_FILE_NAME: &str = "tessera.toml";
const DATABASE_FILE_NAME: &str = "tessera.db";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file; the platform data directory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeSettings {
    /// Attempts per minted barcode before accepting a possible duplicate.
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,
}

fn default_max_tries() -> u32 {
    DEFAULT_MAX_BARCODE_TRIES
}

impl Default for BarcodeSettings {
    fn default() -> Self {
        BarcodeSettings {
            max_tries: default_max_tries(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSettings {
    /// Preferred stock units, first one defined in the database wins.
    #[serde(default = "default_uom_candidates")]
    pub uom_candidates: Vec<String>,
}

fn default_uom_candidates() -> Vec<String> {
    BatchOptions::default().stock_uom_candidates
}

impl Default for StockSettings {
    fn default() -> Self {
        StockSettings {
            uom_candidates: default_uom_candidates(),
        }
    }
}

// =============================================================================
// TesseraConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TesseraConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub barcode: BarcodeSettings,

    #[serde(default)]
    pub stock: StockSettings,
}

impl TesseraConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tessera.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.barcode.max_tries == 0 {
            return Err(ConfigError::Invalid(
                "barcode.max_tries must be greater than 0".into(),
            ));
        }

        if self.stock.uom_candidates.iter().any(|u| u.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "stock.uom_candidates must not contain blank entries".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `TESSERA_*` overrides from `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("TESSERA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(tries) = lookup("TESSERA_MAX_BARCODE_TRIES") {
            match tries.parse::<u32>() {
                Ok(t) => self.barcode.max_tries = t,
                Err(_) => warn!(value = %tries, "Ignoring invalid TESSERA_MAX_BARCODE_TRIES"),
            }
        }

        if let Some(uoms) = lookup("TESSERA_STOCK_UOMS") {
            self.stock.uom_candidates = uoms
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tessera", "tessera")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Database file to open.
    ///
    /// Falls back to `./tessera.db` when no platform data directory exists.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database.path {
            return path.clone();
        }

        directories::ProjectDirs::from("com", "tessera", "tessera")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            max_barcode_tries: self.barcode.max_tries,
            stock_uom_candidates: self.stock.uom_candidates.clone(),
        }
    }
}
