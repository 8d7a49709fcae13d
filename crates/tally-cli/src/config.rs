//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tally_core::TargetHours;

/// Seconds between recalculations in `tally watch`.
const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hours the total is compared against when neither `--target` nor a
    /// saved session provides one.
    pub target_hours: TargetHours,

    /// Seconds between recalculations in watch mode.
    pub update_interval_secs: u64,

    /// Scratch file holding the last saved input and target.
    pub session_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = dirs_state_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            target_hours: TargetHours::DEFAULT,
            update_interval_secs: DEFAULT_UPDATE_INTERVAL_SECS,
            session_path: state_dir.join("session.json"),
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

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // TALLY_TARGET_HOURS, TALLY_UPDATE_INTERVAL_SECS, TALLY_SESSION_PATH
        figment = figment.merge(Env::prefixed("TALLY_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tally.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tally"))
}

/// Returns the platform-specific state directory for tally.
///
/// On Linux: `~/.local/state/tally`. Platforms without a state directory
/// fall back to the data directory.
pub fn dirs_state_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_dir)
        .map(|p| p.join("tally"))
}
