//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use es_core::{MAX_PLAUSIBLE_GAP_MINUTES, ReconstructConfig};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Longest gap between events that still counts as a measured dwell.
    pub max_gap_minutes: u32,

    /// Equipment used when `--equipment` is omitted.
    #[serde(default)]
    pub default_equipment: Option<String>,

    /// Operator recorded when `--operator` is omitted.
    pub default_operator: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("max_gap_minutes", &self.max_gap_minutes)
            .field("default_equipment", &self.default_equipment)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("eqs.db"),
            max_gap_minutes: MAX_PLAUSIBLE_GAP_MINUTES,
            default_equipment: None,
            default_operator: "unknown".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (EQS_*)
        figment = figment.merge(Env::prefixed("EQS_"));

        figment.extract()
    }

    /// Interval reconstruction settings derived from this config.
    pub const fn reconstruct_config(&self) -> ReconstructConfig {
        ReconstructConfig {
            max_gap_minutes: self.max_gap_minutes,
        }
    }
}

/// Returns the platform-specific config directory for eqs.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("eqs"))
}

/// Returns the platform-specific data directory for eqs.
///
/// On Linux: `~/.local/share/eqs`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("eqs"))
}
