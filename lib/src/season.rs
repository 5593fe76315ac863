use crate::{
    coerce::parse_stat,
    fetch::Fetch,
    table::{scrape_table, RawTable, TableRef},
    Config, Result,
};
use derive_deref::Deref;
use polars::prelude::*;

pub const FIRST_TEAM_ALL_PRO: &str = "FirstTeamAllPro";
pub const PRO_BOWL: &str = "SelectedToProBowl";

/// An advanced-stats page merged into the fantasy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancedPage {
    pub page: &'static str,
    /// Columns already present in the fantasy table
    pub drop: &'static [&'static str],
    /// Appended to clashing column names after the merge
    pub suffix: &'static str,
}

pub const FANTASY_PAGE: &str = "fantasy";

/// Merge order of the advanced pages.
pub const ADVANCED_PAGES: [AdvancedPage; 3] = [
    AdvancedPage {
        page: "passing_advanced",
        drop: &["Rk", "Team", "Age", "Pos", "G", "GS", "Awards", FIRST_TEAM_ALL_PRO, PRO_BOWL],
        suffix: "_pass",
    },
    AdvancedPage {
        page: "rushing_advanced",
        drop: &["Rk", "Team", "Age", "Pos", "G", "GS", "Awards", FIRST_TEAM_ALL_PRO, PRO_BOWL],
        suffix: "_rush",
    },
    AdvancedPage {
        page: "receiving_advanced",
        drop: &["Rk", "Team", "Age", "Pos", "G", "GS", FIRST_TEAM_ALL_PRO, PRO_BOWL],
        suffix: "_rec",
    },
];

/// Fantasy and advanced stats for every player of one season.
#[derive(Clone, Deref)]
pub struct PlayerStatsDf(DataFrame);

impl PlayerStatsDf {
    pub fn new(df: DataFrame) -> Self {
        PlayerStatsDf(df)
    }

    pub fn into_inner(self) -> DataFrame {
        self.0
    }
}

/// Strips honor markers from a player name: `+` for first-team All-Pro,
/// `*` for a Pro Bowl selection.
pub fn split_honors(name: &str) -> (&str, bool, bool) {
    let (name, all_pro) = match name.strip_suffix('+') {
        Some(stripped) => (stripped, true),
        None => (name, false),
    };
    let (name, pro_bowl) = match name.strip_suffix('*') {
        Some(stripped) => (stripped, true),
        None => (name, false),
    };
    (name, all_pro, pro_bowl)
}

/// Cleans player names and records their honors as 0/1 columns.
pub fn mark_honors(table: &mut RawTable) {
    let Some(idx) = table.column_index("Player") else {
        return;
    };
    let flag = |set: bool| u8::from(set).to_string();
    let (all_pro, pro_bowl): (Vec<String>, Vec<String>) = table
        .rows_mut()
        .map(|row| {
            let (name, all_pro, pro_bowl) = split_honors(&row[idx]);
            let name = name.to_string();
            row[idx] = name;
            (flag(all_pro), flag(pro_bowl))
        })
        .unzip();
    table.push_column(FIRST_TEAM_ALL_PRO, all_pro);
    table.push_column(PRO_BOWL, pro_bowl);
}

/// Scrapes the first table of a season page as a roster: honors marked,
/// one row per player.
pub fn roster_table<F: Fetch + ?Sized>(fetcher: &F, url: &str) -> RawTable {
    let mut table = scrape_table(fetcher, url, TableRef::First);
    mark_honors(&mut table);
    table.dedupe_by("Player");
    log::debug!("{} players from {}", table.len(), url);
    table
}

fn column_series(label: &str, cells: Vec<&str>) -> Series {
    let cells: Vec<Option<&str>> = cells
        .into_iter()
        .map(|cell| Some(cell.trim()).filter(|cell| !cell.is_empty()))
        .collect();
    let numeric: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(text) => parse_stat(text).map(Some),
        })
        .collect();

    match numeric {
        Some(values) if values.iter().any(Option::is_some) => Series::new(label, values),
        _ => Series::new(label, cells),
    }
}

/// Converts a raw table to a DataFrame. Columns whose non-blank cells are all
/// numeric become `Float64`, the rest stay strings; blanks are null.
pub fn table_frame(table: &RawTable) -> Result<DataFrame> {
    let columns = table
        .columns()
        .iter()
        .map(|label| column_series(label, table.column(label).unwrap_or_default()))
        .collect::<Vec<_>>();
    Ok(DataFrame::new(columns)?)
}

/// Left-joins advanced stats onto the fantasy table by player name and adds
/// the season year. Tables without a `Player` column are skipped.
pub fn merge_season(
    fantasy: DataFrame,
    advanced: Vec<(DataFrame, &str)>,
    year: u16,
) -> Result<PlayerStatsDf> {
    if fantasy.column("Player").is_err() {
        log::warn!("Fantasy table for {} is empty, nothing to merge", year);
        return Ok(PlayerStatsDf(DataFrame::default()));
    }

    let mut merged = fantasy;
    for (df, suffix) in advanced {
        if df.column("Player").is_err() {
            log::warn!("Skipping empty {} table", suffix.trim_start_matches('_'));
            continue;
        }
        let join_args = JoinArgs::new(JoinType::Left).with_suffix(Some(suffix.to_string()));
        merged = merged.join(&df, ["Player"], ["Player"], join_args)?;
    }

    let merged = merged
        .lazy()
        .with_column(lit(year as i32).alias("Year"))
        .collect()?;
    log::debug!("{} total players for {}", merged.height(), year);
    Ok(PlayerStatsDf(merged))
}

/// Scrapes the fantasy page and the three advanced pages for a season and
/// merges them into one table.
pub fn player_stats<F: Fetch + ?Sized>(fetcher: &F, config: &Config, year: u16) -> Result<PlayerStatsDf> {
    let steps = ADVANCED_PAGES.len() + 1;

    log::info!("1/{}: Scraping fantasy stats", steps);
    let fantasy = roster_table(fetcher, &config.season_url(year, FANTASY_PAGE));
    let fantasy = table_frame(&fantasy)?;

    let mut advanced = Vec::with_capacity(ADVANCED_PAGES.len());
    for (i, page) in ADVANCED_PAGES.iter().enumerate() {
        log::info!("{}/{}: Scraping {} stats", i + 2, steps, page.page);
        let mut table = roster_table(fetcher, &config.season_url(year, page.page));
        table.drop_columns(page.drop);
        advanced.push((table_frame(&table)?, page.suffix));
    }

    merge_season(fantasy, advanced, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn honors_are_split_from_names() {
        assert_eq!(split_honors("Tyreek Hill*+"), ("Tyreek Hill", true, true));
        assert_eq!(split_honors("Josh Allen*"), ("Josh Allen", false, true));
        assert_eq!(split_honors("CeeDee Lamb+"), ("CeeDee Lamb", true, false));
        assert_eq!(split_honors("Puka Nacua"), ("Puka Nacua", false, false));
    }

    #[test]
    fn honors_become_columns() {
        let mut table = raw(&["Player"], &[&["Tyreek Hill*+"], &["Puka Nacua"]]);
        mark_honors(&mut table);
        assert_eq!(table.get(0, "Player"), Some("Tyreek Hill"));
        assert_eq!(table.get(0, FIRST_TEAM_ALL_PRO), Some("1"));
        assert_eq!(table.get(1, PRO_BOWL), Some("0"));
    }

    #[test]
    fn numeric_columns_are_typed() {
        let table = raw(
            &["Player", "Yds", "Team"],
            &[&["A", "1,200", "BUF"], &["B", "", "MIA"]],
        );
        let df = table_frame(&table).unwrap();
        assert_eq!(df.column("Yds").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Yds").unwrap().f64().unwrap().get(0), Some(1200.0));
        assert_eq!(df.column("Yds").unwrap().null_count(), 1);
        assert_eq!(df.column("Team").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn advanced_stats_join_by_player_with_suffixes() {
        let fantasy = table_frame(&raw(
            &["Player", "FantPos", "Yds"],
            &[&["A", "QB", "4000"], &["B", "RB", "1200"]],
        ))
        .unwrap();
        let passing = table_frame(&raw(&["Player", "Yds", "IAY"], &[&["A", "4100", "3000"]])).unwrap();
        let empty = table_frame(&RawTable::default()).unwrap();

        let merged = merge_season(fantasy, vec![(passing, "_pass"), (empty, "_rush")], 2023).unwrap();
        assert_eq!(merged.height(), 2);
        assert_eq!(
            merged.get_column_names(),
            ["Player", "FantPos", "Yds", "Yds_pass", "IAY", "Year"]
        );
        let iay = merged.column("IAY").unwrap().f64().unwrap();
        assert_eq!(iay.get(0), Some(3000.0));
        assert_eq!(iay.get(1), None);
        assert_eq!(merged.column("Year").unwrap().i32().unwrap().get(1), Some(2023));
    }

    #[test]
    fn missing_fantasy_table_gives_empty_result() {
        let empty = table_frame(&RawTable::default()).unwrap();
        let merged = merge_season(empty, vec![], 2023).unwrap();
        assert_eq!(merged.height(), 0);
    }
}
