use crate::{error::Error, table::selector, Result};
use scraper::ElementRef;

/// Text marking a career totals row
pub const CAREER: &str = "Career";

fn leading_header_text(row: ElementRef<'_>) -> Option<String> {
    row.select(&selector("th"))
        .next()
        .map(|th| th.text().collect::<String>().trim().to_string())
}

/// Finds the career totals row in a table footer.
///
/// The row with id `<table id>.Career` wins; `default_id` stands in when the
/// table has no id. Otherwise the first footer row whose leading `th` mentions
/// "Career" is used.
pub fn find_career_row<'a>(table: ElementRef<'a>, default_id: &str) -> Result<ElementRef<'a>> {
    let table_id = table.value().id().unwrap_or(default_id);
    let expected_id = format!("{}.{}", table_id, CAREER);

    let footer_rows: Vec<ElementRef<'a>> = table.select(&selector("tfoot tr")).collect();
    let by_id = footer_rows
        .iter()
        .find(|row| row.value().id() == Some(expected_id.as_str()))
        .cloned();
    let by_text = footer_rows
        .iter()
        .find(|row| leading_header_text(**row).is_some_and(|text| text.contains(CAREER)))
        .cloned();

    match (by_id, by_text) {
        (Some(row), Some(other)) if row.id() != other.id() => {
            log::warn!(
                "Career rows disagree in {}: id match {:?}, text match {:?}; using id match",
                table_id,
                row.value().id(),
                other.value().id()
            );
            Ok(row)
        }
        (Some(row), _) => Ok(row),
        (None, Some(row)) => {
            log::debug!("Manual search found career row in {}", table_id);
            Ok(row)
        }
        (None, None) => Err(Error::MissingCareerRow(table_id.to_string())),
    }
}
