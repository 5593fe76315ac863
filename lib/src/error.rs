use polars::error::PolarsError;
use std::io::Error as IoError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid {name} {secs}: expected a finite, non-negative number of seconds")]
    InvalidDelay { name: &'static str, secs: f64 },

    #[error("{url} returned status {status}")]
    Fetch { url: String, status: u16 },

    #[error("No table `{0}` on page")]
    MissingTable(String),

    #[error("No career row in table `{0}`")]
    MissingCareerRow(String),

    #[error("Invalid or missing player link: {0:?}")]
    InvalidReference(String),
}
