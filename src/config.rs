//! Tool configuration. Loaded from JSON; command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How to invoke Volatility
    pub volatility: VolatilityConfig,
    /// Dump discovery when scanning a directory
    pub scan: ScanConfig,
    /// Restrict extraction to these modules (builtin order is kept); all when unset
    pub modules: Option<Vec<String>>,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityConfig {
    /// Executable name or path
    pub exe: String,
    /// `--profile` passed to every module run
    pub profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension (without dot) of memory dumps
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            exe: "volatility".to_string(),
            profile: "Win7SP1x86".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "dmp".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default.
    /// Logging is not up yet at this point, so problems go to stderr.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path).map(|data| serde_json::from_str::<AppConfig>(&data)) {
            Ok(Ok(c)) => c,
            Ok(Err(e)) => {
                eprintln!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
            Err(e) => {
                eprintln!("ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// `<config dir>/memdump-features/config.json`, or `config.json` in the working directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("memdump-features").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }
}
