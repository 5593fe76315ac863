use crate::{
    draft::draft_class,
    fetch::{Fetch, HttpFetcher, Throttled},
    output::{write_dataset, Dataset},
    reconcile::{enrich, season_table, RookieStatsDf},
    season::{self, PlayerStatsDf},
    Config, Result,
};
use scraper::Html;
use std::path::PathBuf;
use std::time::Duration;

/// Runs the season and rookie scrapes against a fetcher.
///
/// The fetcher sits behind one [`Throttled`] clock shared by every run, so
/// overlapping runs on the same pipeline still make one request at a time.
/// Each run waits its own configured delay after the previous request,
/// whichever run made it.
pub struct Pipeline<F> {
    fetcher: Throttled<F>,
    config: Config,
}

impl Pipeline<HttpFetcher> {
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Pipeline::new(fetcher, config))
    }
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(fetcher: F, config: Config) -> Self {
        Pipeline {
            fetcher: Throttled::new(fetcher, Duration::ZERO),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fantasy and advanced stats for every player of `year`.
    pub fn player_stats(&self, year: u16) -> Result<PlayerStatsDf> {
        let fetcher = self.fetcher.with_interval(self.config.season_delay()?);
        log::debug!("Season scrape for {}, {:?} between requests", year, fetcher.interval());
        season::player_stats(&fetcher, &self.config, year)
    }

    /// Draft class of `year` with college career stats for each
    /// fantasy-relevant draftee.
    pub fn rookie_stats(&self, year: u16) -> Result<RookieStatsDf> {
        let fetcher = self.fetcher.with_interval(self.config.rookie_delay()?);
        log::debug!("Rookie scrape for {}, {:?} between requests", year, fetcher.interval());

        let url = self.config.season_url(year, "draft");
        let draftees = match fetcher.fetch(&url) {
            Ok(html) => draft_class(&Html::parse_document(&html)),
            Err(e) => {
                log::error!("Error scraping {}: {}", url, e);
                Vec::new()
            }
        };
        let draftees = enrich(&fetcher, draftees);
        season_table(&draftees)
    }

    pub fn write_player_stats(&self, year: u16, stats: &PlayerStatsDf, split: bool) -> Result<Vec<PathBuf>> {
        write_dataset(&self.config.data_dir, Dataset::PlayerStats, year, stats, split)
    }

    pub fn write_rookie_stats(&self, year: u16, stats: &RookieStatsDf, split: bool) -> Result<Vec<PathBuf>> {
        write_dataset(&self.config.data_dir, Dataset::RookieStats, year, stats, split)
    }
}
