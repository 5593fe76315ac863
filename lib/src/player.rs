use crate::{
    career::find_career_row,
    category::{CategorySpec, CATEGORIES},
    coerce::{coerce_row, StatValue},
    error::Error,
    fetch::{is_valid_reference, Fetch},
    table::{with_table, TableRef},
    Result,
};
use derive_deref::Deref;
use scraper::Html;

/// College career fields for one player, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Deref)]
pub struct PlayerRecord(Vec<(String, StatValue)>);

impl PlayerRecord {
    /// `None` if the field is absent, `Some(None)` if present but missing.
    pub fn value(&self, field: &str) -> Option<StatValue> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| *value)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|(name, _)| name == field)
    }

    /// Adds fields not already present; existing fields are never overwritten.
    pub fn merge(&mut self, fields: impl IntoIterator<Item = (String, StatValue)>) {
        for (name, value) in fields {
            if self.has_field(&name) {
                log::debug!("Keeping earlier value of {}", name);
            } else {
                self.0.push((name, value));
            }
        }
    }
}

impl FromIterator<(String, StatValue)> for PlayerRecord {
    fn from_iter<I: IntoIterator<Item = (String, StatValue)>>(iter: I) -> Self {
        let mut record = PlayerRecord::default();
        record.merge(iter);
        record
    }
}

fn category_stats(document: &Html, spec: &CategorySpec) -> Result<Vec<(String, StatValue)>> {
    with_table(document, TableRef::Id(spec.table_id), |table| {
        find_career_row(table, spec.table_id).map(|row| coerce_row(row, spec))
    })
    .unwrap_or_else(|| Err(Error::MissingTable(spec.table_id.to_string())))
}

/// Merges the career rows of every stat category found on a player page.
/// Categories without a table or career row contribute nothing.
pub fn career_stats(document: &Html) -> PlayerRecord {
    let mut record = PlayerRecord::default();
    for spec in &CATEGORIES {
        match category_stats(document, spec) {
            Ok(fields) => {
                log::trace!("{} {} fields", fields.len(), spec.category);
                record.merge(fields);
            }
            Err(e) => log::info!("No {} stats: {}", spec.category, e),
        }
    }
    record
}

/// Fetches a college player page once and returns its career stats.
pub fn try_college_career_stats<F: Fetch + ?Sized>(
    fetcher: &F,
    reference: &str,
) -> Result<PlayerRecord> {
    if !is_valid_reference(reference) {
        return Err(Error::InvalidReference(reference.to_string()));
    }
    log::info!("Fetching college data from {}", reference);
    let html = fetcher.fetch(reference)?;
    let record = career_stats(&Html::parse_document(&html));
    log::debug!("Extracted {} career fields from {}", record.len(), reference);
    Ok(record)
}

/// Like [`try_college_career_stats`], but failures yield an empty record.
pub fn college_career_stats<F: Fetch + ?Sized>(fetcher: &F, reference: &str) -> PlayerRecord {
    try_college_career_stats(fetcher, reference).unwrap_or_else(|e| {
        log::warn!("{}", e);
        PlayerRecord::default()
    })
}
