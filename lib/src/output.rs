use crate::{write_csv, PositionGroup, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Kinds of season files written to the data directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dataset {
    PlayerStats,
    RookieStats,
}

impl Dataset {
    fn stem(self) -> &'static str {
        match self {
            Dataset::PlayerStats => "playerstats",
            Dataset::RookieStats => "rookiestats",
        }
    }

    /// Column holding the position used to split files
    pub fn position_column(self) -> &'static str {
        match self {
            Dataset::PlayerStats => "FantPos",
            Dataset::RookieStats => "Pos",
        }
    }

    /// `{year}playerstats.csv`, or `{year}playerstats_{GROUP}.csv` for a split
    pub fn file_name(self, year: u16, group: Option<PositionGroup>) -> String {
        match group {
            Some(group) => format!("{}{}_{}.csv", year, self.stem(), group),
            None => format!("{}{}.csv", year, self.stem()),
        }
    }
}

/// Splits a table into one frame per position group, skipping empty groups.
pub fn split_by_position(df: &DataFrame, position_column: &str) -> Result<Vec<(PositionGroup, DataFrame)>> {
    if df.column(position_column).is_err() {
        log::warn!("No {} column, nothing to split", position_column);
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    for group in PositionGroup::ALL {
        let part = df
            .clone()
            .lazy()
            .filter(group.filter_expr(position_column))
            .collect()?;
        log::debug!("{} rows in {}", part.height(), group);
        if part.height() > 0 {
            parts.push((group, part));
        }
    }
    Ok(parts)
}

/// Writes the season table, plus one file per position group if `split`.
/// Returns the paths written.
pub fn write_dataset(
    data_dir: &Path,
    dataset: Dataset,
    year: u16,
    df: &DataFrame,
    split: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let path = data_dir.join(dataset.file_name(year, None));
    write_csv(&path, &mut df.clone())?;
    log::info!("Wrote {} rows to {}", df.height(), path.display());
    written.push(path);

    if split {
        for (group, mut part) in split_by_position(df, dataset.position_column())? {
            let path = data_dir.join(dataset.file_name(year, Some(group)));
            write_csv(&path, &mut part)?;
            log::info!("Wrote {} rows to {}", part.height(), path.display());
            written.push(path);
        }
    }
    Ok(written)
}
