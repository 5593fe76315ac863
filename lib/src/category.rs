use parse_display::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[display(style = "lowercase")]
pub enum StatCategory {
    Passing,
    Rushing,
    Receiving,
}

/// How one stat category appears on a college player page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub category: StatCategory,
    /// `id` of the category's table; also the fallback when the table has none
    pub table_id: &'static str,
    /// Qualifier keeping this category's fields apart from the others'
    pub tag: &'static str,
    pub expected_fields: &'static [&'static str],
}

/// Prefix given to every college career field.
pub const FIELD_PREFIX: &str = "Coll_";

pub const CATEGORIES: [CategorySpec; 3] = [
    CategorySpec {
        category: StatCategory::Passing,
        table_id: "passing_standard",
        tag: "pass",
        expected_fields: &[
            "games",
            "pass_cmp",
            "pass_att",
            "pass_cmp_pct",
            "pass_yds",
            "pass_yds_per_att",
            "adj_pass_yds_per_att",
            "pass_td",
            "pass_int",
            "pass_rating",
        ],
    },
    CategorySpec {
        category: StatCategory::Rushing,
        table_id: "rushing_standard",
        tag: "rush",
        expected_fields: &[
            "games",
            "rush_att",
            "rush_yds",
            "rush_yds_per_att",
            "rush_td",
            "rec",
            "rec_yds",
            "rec_yds_per_rec",
            "rec_td",
            "scrim_att",
            "scrim_yds",
            "scrim_yds_per_att",
            "scrim_td",
        ],
    },
    CategorySpec {
        category: StatCategory::Receiving,
        table_id: "receiving_standard",
        tag: "rec",
        expected_fields: &[
            "games",
            "rec",
            "rec_yds",
            "rec_yds_per_rec",
            "rec_td",
            "rush_att",
            "rush_yds",
            "rush_yds_per_att",
            "rush_td",
            "scrim_att",
            "scrim_yds",
            "scrim_yds_per_att",
            "scrim_td",
        ],
    },
];

impl StatCategory {
    pub fn spec(self) -> &'static CategorySpec {
        match self {
            StatCategory::Passing => &CATEGORIES[0],
            StatCategory::Rushing => &CATEGORIES[1],
            StatCategory::Receiving => &CATEGORIES[2],
        }
    }
}

impl CategorySpec {
    /// Output name for a `data-stat` label of this category.
    ///
    /// Labels already carrying the category tag keep their name
    /// (`rec_yds` -> `Coll_rec_yds`), others are qualified by it
    /// (`games` -> `Coll_rec_games`), so every field reads
    /// `Coll_{tag}_...` and two categories never share a key.
    pub fn field_name(&self, stat: &str) -> String {
        let tagged = stat
            .strip_prefix(self.tag)
            .is_some_and(|rest| rest.starts_with('_'));
        if tagged {
            format!("{}{}", FIELD_PREFIX, stat)
        } else {
            format!("{}{}_{}", FIELD_PREFIX, self.tag, stat)
        }
    }

    pub fn expects(&self, stat: &str) -> bool {
        self.expected_fields.contains(&stat)
    }
}
