use crate::{error::Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scraper settings. Every field has a default, so a config file only needs
/// to name what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Pause after each request while scraping season pages
    pub season_delay_secs: f64,
    /// Pause after each request while scraping the draft class
    pub rookie_delay_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.pro-football-reference.com".to_string(),
            data_dir: PathBuf::from("data"),
            user_agent: concat!("pfr/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            season_delay_secs: 1.0,
            rookie_delay_secs: 10.0,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects delays that cannot be slept for.
    pub fn validate(&self) -> Result<()> {
        check_delay("season_delay_secs", self.season_delay_secs)?;
        check_delay("rookie_delay_secs", self.rookie_delay_secs)?;
        Ok(())
    }

    /// URL of a season-level page, e.g. `season_url(2023, "fantasy")`
    pub fn season_url(&self, year: u16, page: &str) -> String {
        format!(
            "{}/years/{}/{}.htm",
            self.base_url.trim_end_matches('/'),
            year,
            page
        )
    }

    pub fn season_delay(&self) -> Result<Duration> {
        check_delay("season_delay_secs", self.season_delay_secs)
    }

    pub fn rookie_delay(&self) -> Result<Duration> {
        check_delay("rookie_delay_secs", self.rookie_delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn check_delay(name: &'static str, secs: f64) -> Result<Duration> {
    // Also rejects NaN and values too large for a Duration.
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidDelay { name, secs })
}
