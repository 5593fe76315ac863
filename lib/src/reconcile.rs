use crate::{draft::DraftRow, fetch::Fetch, player::college_career_stats, Result};
use derive_deref::Deref;
use polars::prelude::*;

/// Draft class joined with college career stats, one row per draftee.
#[derive(Clone, Deref)]
pub struct RookieStatsDf(DataFrame);

impl RookieStatsDf {
    pub fn new(df: DataFrame) -> Self {
        RookieStatsDf(df)
    }

    pub fn into_inner(self) -> DataFrame {
        self.0
    }
}

/// Gathers college career stats for each draftee, in draft order.
///
/// The fetcher is expected to carry the throttle; one page is requested per
/// draftee.
pub fn enrich<F: Fetch + ?Sized>(fetcher: &F, rows: Vec<DraftRow>) -> Vec<DraftRow> {
    let total = rows.len();
    rows.into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            log::info!("{}/{}: {}", i + 1, total, row.player());
            row.stats = college_career_stats(fetcher, &row.link);
            row
        })
        .collect()
}

fn push_unseen(seen: &mut Vec<String>, label: &str) {
    if !seen.iter().any(|s| s == label) {
        seen.push(label.to_string());
    }
}

/// Assembles the season table: draft columns first, then every career field
/// seen on any player, in first-seen order. Players lacking a field hold null.
pub fn season_table(rows: &[DraftRow]) -> Result<RookieStatsDf> {
    let mut draft_columns = Vec::new();
    let mut stat_columns = Vec::new();
    for row in rows {
        for (label, _) in &row.values {
            push_unseen(&mut draft_columns, label);
        }
        for (field, _) in row.stats.iter() {
            push_unseen(&mut stat_columns, field);
        }
    }

    let mut columns: Vec<Series> = draft_columns
        .iter()
        .map(|label| {
            let values: Vec<Option<&str>> = rows.iter().map(|row| row.value(label)).collect();
            Series::new(label, values)
        })
        .collect();
    columns.extend(stat_columns.iter().map(|field| {
        let values: Vec<Option<f64>> = rows
            .iter()
            .map(|row| row.stats.value(field).flatten())
            .collect();
        Series::new(field, values)
    }));

    let df = DataFrame::new(columns)?;
    log::debug!(
        "Season table: {} players, {} draft columns, {} career columns",
        df.height(),
        draft_columns.len(),
        stat_columns.len()
    );
    Ok(RookieStatsDf(df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{player::PlayerRecord, Position};

    fn draftee(player: &str, pos: Position, stats: &[(&str, Option<f64>)]) -> DraftRow {
        DraftRow {
            values: vec![
                ("Player".to_string(), player.to_string()),
                ("Pos".to_string(), pos.to_string()),
            ],
            position: pos,
            link: format!("http://example.com/{}.html", player),
            stats: stats
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<PlayerRecord>(),
        }
    }

    #[test]
    fn columns_are_the_union_of_fields() {
        let rows = vec![
            draftee("A", Position::Qb, &[("Coll_pass_yds", Some(3000.0))]),
            draftee(
                "B",
                Position::Wr,
                &[("Coll_rec_yds", Some(1234.0)), ("Coll_rec_td", None)],
            ),
        ];
        let df = season_table(&rows).unwrap();
        assert_eq!(
            df.get_column_names(),
            ["Player", "Pos", "Coll_pass_yds", "Coll_rec_yds", "Coll_rec_td"]
        );

        let pass_yds = df.column("Coll_pass_yds").unwrap().f64().unwrap();
        assert_eq!(pass_yds.get(0), Some(3000.0));
        assert_eq!(pass_yds.get(1), None);

        let rec_yds = df.column("Coll_rec_yds").unwrap().f64().unwrap();
        assert_eq!(rec_yds.get(1), Some(1234.0));
        assert_eq!(df.column("Coll_rec_td").unwrap().null_count(), 2);
    }

    #[test]
    fn no_draftees_means_empty_table() {
        let df = season_table(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }

    #[test]
    fn enrich_skips_invalid_links_without_fetching() {
        struct Unreachable;
        impl Fetch for Unreachable {
            fn fetch(&self, url: &str) -> Result<String> {
                panic!("unexpected fetch of {url}");
            }
        }

        let mut row = draftee("C", Position::Te, &[]);
        row.link = String::new();
        let rows = enrich(&Unreachable, vec![row]);
        assert!(rows[0].stats.is_empty());
    }
}
