use crate::category::CategorySpec;
use scraper::ElementRef;

/// A coerced stat; `None` marks a cell that held no number.
pub type StatValue = Option<f64>;

/// `data-stat` labels that never hold numbers.
pub const EXCLUDED_STATS: [&str; 4] = ["year_id", "year", "pos", "awards"];

/// Parses cell text as a finite number, ignoring surrounding whitespace and
/// thousands separators.
pub fn parse_stat(text: &str) -> StatValue {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Converts every labeled cell of a career row into a prefixed field, in
/// document order.
pub fn coerce_row(row: ElementRef<'_>, spec: &CategorySpec) -> Vec<(String, StatValue)> {
    let mut fields = Vec::new();
    for cell in row.select(&crate::table::selector("th, td")) {
        let Some(stat) = cell.value().attr("data-stat") else {
            continue;
        };
        if EXCLUDED_STATS.contains(&stat) {
            continue;
        }
        if !spec.expects(stat) {
            log::debug!("Unexpected {} stat `{}`", spec.category, stat);
        }

        let raw = cell.text().collect::<String>();
        let value = parse_stat(&raw);
        if value.is_none() {
            if raw.trim().is_empty() {
                log::debug!("Blank {} stat `{}`", spec.category, stat);
            } else {
                log::warn!(
                    "Could not convert {} stat `{}` value {:?}",
                    spec.category,
                    stat,
                    raw.trim()
                );
            }
        }
        fields.push((spec.field_name(stat), value));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::StatCategory;
    use scraper::Html;

    fn coerce(html: &str, category: StatCategory) -> Vec<(String, StatValue)> {
        let document = Html::parse_document(html);
        let row = document
            .select(&crate::table::selector("tr"))
            .next()
            .unwrap();
        coerce_row(row, category.spec())
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_stat(" 1234 "), Some(1234.0));
        assert_eq!(parse_stat("1,234"), Some(1234.0));
        assert_eq!(parse_stat("-3.5"), Some(-3.5));
        assert_eq!(parse_stat(".625"), Some(0.625));
    }

    #[test]
    fn non_numbers_are_missing() {
        assert_eq!(parse_stat(""), None);
        assert_eq!(parse_stat("Alabama"), None);
        assert_eq!(parse_stat("NaN"), None);
        assert_eq!(parse_stat("inf"), None);
    }

    #[test]
    fn excluded_labels_never_appear() {
        let fields = coerce(
            r#"<table><tr>
                <th data-stat="year_id">Career</th>
                <td data-stat="pos">WR</td>
                <td data-stat="awards">AA</td>
                <td data-stat="rec_yds">1234</td>
            </tr></table>"#,
            StatCategory::Receiving,
        );
        assert_eq!(fields, vec![("Coll_rec_yds".to_string(), Some(1234.0))]);
        assert!(fields.iter().all(|(name, _)| !name.contains("awards")));
    }

    #[test]
    fn text_cells_become_missing() {
        let fields = coerce(
            r#"<table><tr>
                <td data-stat="school_name">LSU</td>
                <td data-stat="rush_att"></td>
                <td data-stat="rush_yds">  2,017 </td>
                <td>no label</td>
            </tr></table>"#,
            StatCategory::Rushing,
        );
        assert_eq!(
            fields,
            vec![
                ("Coll_rush_school_name".to_string(), None),
                ("Coll_rush_att".to_string(), None),
                ("Coll_rush_yds".to_string(), Some(2017.0)),
            ]
        );
    }
}
