//! Extraction of HTML stat tables into labeled rows.
//!
//! Tables on the site carry an optional "over header" row grouping columns
//! (e.g. `Passing`, `Rushing`) above the row of column labels. Both levels are
//! flattened into a single label per column: `Passing_Yds`, `Rushing_Yds`.

use crate::fetch::Fetch;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

/// Marker given to header cells that have no label of their own.
pub const UNNAMED: &str = "Unnamed";

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

pub(crate) fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Which table on a page to read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableRef<'a> {
    /// The `<table>` whose `id` attribute matches
    Id(&'a str),
    /// The first `<table>` in the document
    First,
}

impl std::fmt::Display for TableRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableRef::Id(id) => write!(f, "#{id}"),
            TableRef::First => write!(f, "first table"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Rows are padded with blanks or truncated to the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        RawTable { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    pub fn get(&self, row: usize, label: &str) -> Option<&str> {
        let idx = self.column_index(label)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    pub fn column(&self, label: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(label)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut Vec<String>> {
        self.rows.iter_mut()
    }

    /// Appends a column, or replaces the values of an existing one.
    pub fn push_column(&mut self, label: &str, mut values: Vec<String>) {
        values.resize(self.rows.len(), String::new());
        match self.column_index(label) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(label.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Removes the named columns; labels not present are ignored.
    pub fn drop_columns(&mut self, labels: &[&str]) {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !labels.contains(&c.as_str()))
            .collect();
        let retain = |values: &mut Vec<String>| {
            let mut flags = keep.iter();
            values.retain(|_| *flags.next().unwrap_or(&true));
        };
        retain(&mut self.columns);
        self.rows.iter_mut().for_each(retain);
    }

    /// Drops body rows that repeat the header, i.e. whose first cell equals
    /// the first column label.
    pub fn drop_repeated_headers(&mut self) {
        let Some(first) = self.columns.first() else {
            return;
        };
        let before = self.rows.len();
        self.rows.retain(|row| row.first() != Some(first));
        if self.rows.len() < before {
            log::trace!("Dropped {} repeated header rows", before - self.rows.len());
        }
    }

    /// Keeps the first row for each distinct value of `label`.
    pub fn dedupe_by(&mut self, label: &str) {
        let Some(idx) = self.column_index(label) else {
            return;
        };
        let rows = std::mem::take(&mut self.rows);
        self.rows = rows.into_iter().unique_by(|row| row[idx].clone()).collect();
    }
}

/// Flattens a two-level header into one label.
pub fn flatten_header(outer: &str, inner: &str) -> String {
    if outer.contains(UNNAMED) {
        inner.trim().to_string()
    } else {
        format!("{}_{}", outer, inner).trim().to_string()
    }
}

/// Disambiguates repeated labels as `Yds`, `Yds.1`, `Yds.2`, ...
pub fn unique_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let mut candidate = label.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", label, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

fn colspan(cell: ElementRef<'_>) -> usize {
    cell.value()
        .attr("colspan")
        .and_then(|span| span.trim().parse().ok())
        .unwrap_or(1)
        .max(1)
}

fn header_cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&selector("th, td"))
        .flat_map(|cell| std::iter::repeat(cell_text(cell)).take(colspan(cell)))
        .collect()
}

fn header_labels(table: ElementRef<'_>) -> Vec<String> {
    let levels: Vec<Vec<String>> = table
        .select(&selector("thead tr"))
        .map(header_cells)
        .filter(|cells| !cells.is_empty())
        .collect();

    let labels = match levels.as_slice() {
        [] => Vec::new(),
        [single] => single.clone(),
        [outer, .., inner] => inner
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let outer = match outer.get(i) {
                    Some(text) if !text.is_empty() => text.clone(),
                    _ => format!("{}: {}_level_0", UNNAMED, i),
                };
                flatten_header(&outer, label)
            })
            .collect(),
    };
    unique_labels(labels)
}

/// Reads a `<table>` element into a [`RawTable`], dropping repeated header
/// rows from the body.
pub fn read_table(table: ElementRef<'_>) -> RawTable {
    let columns = header_labels(table);
    let rows = table
        .select(&selector("tbody tr"))
        .map(|row| row.select(&selector("th, td")).map(cell_text).collect_vec())
        .filter(|cells| !cells.is_empty())
        .collect();

    let mut raw = RawTable::new(columns, rows);
    raw.drop_repeated_headers();
    raw
}

fn find_table<'a>(document: &'a Html, target: TableRef<'_>) -> Option<ElementRef<'a>> {
    let table_selector = selector("table");
    let mut tables = document.select(&table_selector);
    match target {
        TableRef::Id(id) => tables.find(|table| table.value().id() == Some(id)),
        TableRef::First => tables.next(),
    }
}

/// Runs `f` on the target table, if present.
///
/// The site ships some secondary tables inside HTML comments, so a table
/// requested by id is also searched for in comment bodies.
pub fn with_table<T>(
    document: &Html,
    target: TableRef<'_>,
    f: impl FnOnce(ElementRef<'_>) -> T,
) -> Option<T> {
    if let Some(table) = find_table(document, target) {
        return Some(f(table));
    }

    let TableRef::Id(id) = target else {
        return None;
    };
    // Other comments may mention the id without holding the table.
    let fragment = document
        .tree
        .values()
        .filter_map(|node| node.as_comment())
        .filter(|comment| comment.contains(id))
        .map(|comment| Html::parse_fragment(comment))
        .find(|fragment| find_table(fragment, target).is_some())?;
    log::trace!("Found table #{} inside a comment", id);
    find_table(&fragment, target).map(f)
}

/// Extracts the target table, or an empty table if it is absent.
pub fn extract_table(document: &Html, target: TableRef<'_>) -> RawTable {
    with_table(document, target, read_table).unwrap_or_else(|| {
        log::warn!("Could not find {} on page", target);
        RawTable::default()
    })
}

/// Fetches a page and extracts one table from it. Fetch failures are logged
/// and produce an empty table.
pub fn scrape_table<F: Fetch + ?Sized>(fetcher: &F, url: &str, target: TableRef<'_>) -> RawTable {
    match fetcher.fetch(url) {
        Ok(html) => extract_table(&Html::parse_document(&html), target),
        Err(e) => {
            log::error!("Error scraping {}: {}", url, e);
            RawTable::default()
        }
    }
}
