use crate::Result;
use crate::poller::{DEFAULT_API_BASE_URL, DEFAULT_FETCH_TIMEOUT};
use crate::samples::TrackedKey;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use directories::BaseDirs;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "playtrack.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Games whose statistics are sampled
    #[serde(default)]
    pub tracked_games: Vec<TrackedKey>,

    /// Minutes between two samples of the same game
    #[serde(default = "default_poll_interval_minutes")]
    pub poll_interval_minutes: u64,

    /// Upper bound on a single request to the statistics API
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// Endpoint of the statistics API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory holding the per-game histories
    #[serde(default)]
    pub data_dir: Option<Utf8PathBuf>,

    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with the dashboard's static files
    #[serde(default)]
    pub public_dir: Option<Utf8PathBuf>,
}

const fn default_poll_interval_minutes() -> u64 {
    10
}

const fn default_fetch_timeout() -> Duration {
    DEFAULT_FETCH_TIMEOUT
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `playtrack.toml` in `base_dir` is used if present.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading playtrack configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading playtrack configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_minutes == 0 {
            bail!("poll_interval_minutes must be at least 1");
        }

        if self.fetch_timeout.is_zero() {
            bail!("fetch_timeout must be greater than zero");
        }

        let url = Url::parse(&self.api_base_url).into_app_err_with(|| format!("api_base_url '{}' is not a valid URL", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api_base_url must use http or https, got '{}'", url.scheme());
        }

        let mut seen = HashSet::new();
        for key in &self.tracked_games {
            if !seen.insert(key) {
                bail!("game {key} is listed more than once in tracked_games");
            }
        }

        Ok(())
    }

    /// Fail unless at least one game is tracked
    pub fn require_games(&self) -> Result<&[TrackedKey]> {
        if self.tracked_games.is_empty() {
            bail!("no games to track; add their identifiers to tracked_games in {DEFAULT_CONFIG_FILE}");
        }

        Ok(&self.tracked_games)
    }

    /// Time between two samples of the same game
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_minutes.saturating_mul(60))
    }

    /// Directory holding the per-game histories
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.as_std_path().to_path_buf());
        }

        Ok(BaseDirs::new()
            .ok_or_else(|| app_err!("could not determine data directory; set data_dir in {DEFAULT_CONFIG_FILE}"))?
            .data_dir()
            .join("playtrack"))
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
