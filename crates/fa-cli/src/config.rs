//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// All file discovery is rooted at `data_dir`; nothing reads or changes the
/// process working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base directory holding the `scans/` candidate logs, monthly record
    /// files, and report outputs.
    pub data_dir: PathBuf,

    /// Roster file path; defaults to `employees.csv` under `data_dir`.
    pub roster_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir,
            roster_path: None,
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

        // Load from environment variables (FA_*)
        figment = figment.merge(Env::prefixed("FA_"));

        figment.extract()
    }

    /// The effective roster file path.
    #[must_use]
    pub fn roster_path(&self) -> PathBuf {
        self.roster_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("employees.csv"))
    }
}

/// Returns the platform-specific config directory for fa.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fa"))
}

/// Returns the platform-specific data directory for fa.
///
/// On Linux: `~/.local/share/fa`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("fa"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_dir_ends_with_fa() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "fa");
    }

    #[test]
    fn roster_path_defaults_under_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/fa-test"),
            roster_path: None,
        };
        assert_eq!(config.roster_path(), PathBuf::from("/tmp/fa-test/employees.csv"));
    }

    #[test]
    fn explicit_roster_path_wins() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/fa-test"),
            roster_path: Some(PathBuf::from("/elsewhere/staff.csv")),
        };
        assert_eq!(config.roster_path(), PathBuf::from("/elsewhere/staff.csv"));
    }
}
