use crate::{
    fetch::is_valid_reference,
    player::PlayerRecord,
    table::{cell_text, selector, unique_labels},
    Position,
};
use scraper::{ElementRef, Html};

/// Label given to the unlabeled final column holding the college page link.
pub const LINK: &str = "Link";

/// One draftee, with the college stats gathered for them.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    /// Draft table cells keyed by column label, in table order
    pub values: Vec<(String, String)>,
    pub position: Position,
    pub link: String,
    pub stats: PlayerRecord,
}

impl DraftRow {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn player(&self) -> &str {
        self.value("Player").unwrap_or("")
    }
}

fn draft_headers(row: ElementRef<'_>) -> Vec<String> {
    let labels = row
        .select(&selector("th"))
        .skip(1)
        .map(cell_text)
        .map(|label| if label.is_empty() { LINK.to_string() } else { label })
        .collect();
    unique_labels(labels)
}

/// Cell values of a body row. The final cell contributes only the href of
/// its link, or nothing if it has none.
fn row_values(row: ElementRef<'_>) -> Vec<String> {
    let cells: Vec<ElementRef<'_>> = row.select(&selector("td")).collect();
    let last = cells.len().saturating_sub(1);
    cells
        .into_iter()
        .enumerate()
        .filter_map(|(i, cell)| {
            if i == last {
                cell.select(&selector("a"))
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(str::to_string)
            } else {
                Some(cell.text().collect())
            }
        })
        .collect()
}

/// Reads the season draft table, keeping fantasy-relevant draftees that have
/// a usable college page link.
pub fn draft_class(document: &Html) -> Vec<DraftRow> {
    let rows: Vec<ElementRef<'_>> = document.select(&selector("tr")).collect();
    let Some(header_row) = rows.get(1) else {
        log::warn!("Draft page has no header row");
        return Vec::new();
    };
    let headers = draft_headers(*header_row);

    let mut draftees = Vec::new();
    let mut dropped = 0;
    for row in &rows {
        if row.value().classes().any(|class| class == "thead") {
            continue;
        }
        let values: Vec<(String, String)> = headers.iter().cloned().zip(row_values(*row)).collect();
        if values.is_empty() {
            continue;
        }

        let position = values
            .iter()
            .find(|(label, _)| label == "Pos")
            .and_then(|(_, pos)| pos.trim().parse::<Position>().ok())
            .filter(|pos| pos.is_fantasy_relevant());
        let link = values
            .iter()
            .find(|(label, _)| label == LINK)
            .map(|(_, link)| link.clone())
            .filter(|link| is_valid_reference(link));

        match (position, link) {
            (Some(position), Some(link)) => draftees.push(DraftRow {
                values,
                position,
                link,
                stats: PlayerRecord::default(),
            }),
            _ => dropped += 1,
        }
    }

    log::info!(
        "{} fantasy-relevant draftees with college links ({} rows dropped)",
        draftees.len(),
        dropped
    );
    draftees
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = r#"<html><body><table id="drafts">
        <thead>
          <tr class="over_header"><th colspan="5"></th><th>Passing</th><th></th></tr>
          <tr><th>Rnd</th><th>Pick</th><th>Tm</th><th>Player</th><th>Pos</th><th>Yds</th><th>College/Univ</th><th></th></tr>
        </thead>
        <tbody>
          <tr><th>1</th><td>1</td><td>CHI</td><td>Caleb Williams</td><td>QB</td><td>0</td><td>USC</td>
              <td><a href="http://www.sports-reference.com/cfb/players/caleb-williams-3.html">College Stats</a></td></tr>
          <tr><th>1</th><td>3</td><td>NWE</td><td>Drake Maye</td><td>QB</td><td>0</td><td>North Carolina</td><td></td></tr>
          <tr class="thead"><th>Rnd</th><td>Pick</td><td>Tm</td><td>Player</td><td>Pos</td><td>Yds</td><td>College/Univ</td><td></td></tr>
          <tr><th>1</th><td>4</td><td>ARI</td><td>Marvin Harrison Jr.</td><td>WR</td><td></td><td>Ohio St.</td>
              <td><a href="https://www.sports-reference.com/cfb/players/marvin-harrison-2.html">College Stats</a></td></tr>
          <tr><th>5</th><td>150</td><td>KAN</td><td>Some Kicker</td><td>K</td><td></td><td>Utah</td>
              <td><a href="https://www.sports-reference.com/cfb/players/kicker-1.html">College Stats</a></td></tr>
          <tr><th>6</th><td>190</td><td>DET</td><td>Relative Link</td><td>TE</td><td></td><td>Iowa</td>
              <td><a href="/cfb/players/relative-1.html">College Stats</a></td></tr>
          <tr><th>7</th><td>220</td><td>DAL</td><td>Some Tackle</td><td>T</td><td></td><td>Texas</td>
              <td><a href="https://www.sports-reference.com/cfb/players/tackle-1.html">College Stats</a></td></tr>
        </tbody>
    </table></body></html>"#;

    fn players(rows: &[DraftRow]) -> Vec<&str> {
        rows.iter().map(DraftRow::player).collect()
    }

    #[test]
    fn keeps_fantasy_positions_with_links() {
        let rows = draft_class(&Html::parse_document(DRAFT));
        assert_eq!(players(&rows), ["Caleb Williams", "Marvin Harrison Jr."]);
        assert_eq!(rows[1].position, Position::Wr);
        assert_eq!(
            rows[1].link,
            "https://www.sports-reference.com/cfb/players/marvin-harrison-2.html"
        );
    }

    #[test]
    fn header_row_drops_rank_label() {
        let rows = draft_class(&Html::parse_document(DRAFT));
        let labels: Vec<&str> = rows[0].values.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            ["Pick", "Tm", "Player", "Pos", "Yds", "College/Univ", "Link"]
        );
        assert_eq!(rows[0].value("College/Univ"), Some("USC"));
    }

    #[test]
    fn kickers_are_never_kept() {
        let rows = draft_class(&Html::parse_document(DRAFT));
        assert!(rows.iter().all(|row| row.position != Position::K));
        assert!(!players(&rows).contains(&"Some Kicker"));
    }

    #[test]
    fn page_without_rows_is_empty() {
        let rows = draft_class(&Html::parse_document("<html><body><table><tr><th>Rk</th></tr></table></body></html>"));
        assert!(rows.is_empty());
    }
}
