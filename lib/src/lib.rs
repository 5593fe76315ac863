use parse_display::{Display, FromStr};
use polars::prelude::*;
use std::path::Path;

pub mod career;
pub mod category;
pub mod coerce;
pub mod config;
pub mod draft;
mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod player;
pub mod reconcile;
pub mod season;
pub mod table;

pub use config::Config;
pub use error::Error;
pub use pipeline::Pipeline;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Display, FromStr)]
#[display(style = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Fb,
    Wr,
    Te,
    K,
}

impl Position {
    /// Positions kept for fantasy analysis.
    pub const FANTASY: [Position; 5] = [
        Position::Qb,
        Position::Rb,
        Position::Fb,
        Position::Wr,
        Position::Te,
    ];

    pub fn is_fantasy_relevant(self) -> bool {
        Self::FANTASY.contains(&self)
    }
}

/// Groups used when splitting output files by position. Fullbacks are
/// grouped with running backs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Display, FromStr)]
#[display(style = "SNAKE_CASE")]
pub enum PositionGroup {
    Qb,
    RbFb,
    Wr,
    Te,
}

impl PositionGroup {
    pub const ALL: [PositionGroup; 4] = [
        PositionGroup::Qb,
        PositionGroup::RbFb,
        PositionGroup::Wr,
        PositionGroup::Te,
    ];

    pub fn positions(self) -> &'static [Position] {
        match self {
            PositionGroup::Qb => &[Position::Qb],
            PositionGroup::RbFb => &[Position::Rb, Position::Fb],
            PositionGroup::Wr => &[Position::Wr],
            PositionGroup::Te => &[Position::Te],
        }
    }

    /// Filter expression matching rows whose `position_column` is in this group
    pub fn filter_expr(self, position_column: &str) -> Expr {
        self.positions()
            .iter()
            .map(|position| col(position_column).eq(lit(position.to_string())))
            .reduce(|acc, expr| acc.or(expr))
            .unwrap_or_else(|| lit(false))
    }
}

pub fn write_csv<P: AsRef<Path>>(path: P, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}
