//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// UTC offset used to interpret export timestamps, e.g. `+09:00`.
    pub utc_offset: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("utc_offset", &self.utc_offset)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset: "+09:00".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

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

        // Load from environment variables (PIYO_*)
        figment = figment.merge(Env::prefixed("PIYO_"));

        figment.extract()
    }

    /// Parses the configured UTC offset.
    pub fn offset(&self) -> Result<FixedOffset, chrono::ParseError> {
        self.utc_offset.parse()
    }
}

/// Returns the platform-specific config directory for piyo.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("piyo"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offset_is_utc_plus_nine() {
        let config = Config::default();
        assert_eq!(
            config.offset().unwrap(),
            FixedOffset::east_opt(9 * 3600).unwrap()
        );
    }

    #[test]
    fn offset_parses_negative_offsets() {
        let config = Config {
            utc_offset: "-05:00".to_string(),
        };
        assert_eq!(
            config.offset().unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
    }

    #[test]
    fn offset_rejects_garbage() {
        let config = Config {
            utc_offset: "tokyo".to_string(),
        };
        assert!(config.offset().is_err());
    }

    #[test]
    fn load_from_reads_a_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "utc_offset = \"+02:00\"\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.utc_offset, "+02:00");
    }
}
