use crate::domain::model::{EventRecord, YearGroup};
use std::cmp::Ordering;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Ordinal used for unrecognized month names; sorts after December.
pub const UNKNOWN_MONTH: u8 = 13;

/// Maps a month field to 1..=12 from its leading token ("March 15" → 3).
///
/// Lossy on purpose: the token must be the exact English month name, so
/// "Mar", "march" or an empty field all map to [`UNKNOWN_MONTH`].
pub fn month_ordinal(month: &str) -> u8 {
    let token = month.split(' ').next().unwrap_or("");
    MONTHS
        .iter()
        .position(|name| *name == token)
        .map(|idx| idx as u8 + 1)
        .unwrap_or(UNKNOWN_MONTH)
}

/// Approximates `String.prototype.localeCompare` for plain titles:
/// case-insensitive first, then lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

pub fn compare_events(a: &EventRecord, b: &EventRecord) -> Ordering {
    month_ordinal(&a.month)
        .cmp(&month_ordinal(&b.month))
        .then_with(|| locale_compare(&a.title, &b.title))
}

/// Newest year first, events in calendar order, empty years dropped.
pub fn order_year_groups(groups: &[YearGroup]) -> Vec<YearGroup> {
    let mut ordered: Vec<YearGroup> = groups
        .iter()
        .filter(|group| !group.events.is_empty())
        .cloned()
        .collect();

    ordered.sort_by(|a, b| b.year.cmp(&a.year));
    for group in &mut ordered {
        group.events.sort_by(compare_events);
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(month: &str, title: &str) -> EventRecord {
        EventRecord {
            month: month.to_string(),
            title: title.to_string(),
            slides_url: None,
        }
    }

    #[test]
    fn test_month_ordinal() {
        assert_eq!(month_ordinal("January"), 1);
        assert_eq!(month_ordinal("March 15"), 3);
        assert_eq!(month_ordinal("December 1-3"), 12);
        assert_eq!(month_ordinal("march"), UNKNOWN_MONTH);
        assert_eq!(month_ordinal("Sept 4"), UNKNOWN_MONTH);
        assert_eq!(month_ordinal(""), UNKNOWN_MONTH);
        assert_eq!(month_ordinal(" March"), UNKNOWN_MONTH);
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Same", "Same"), Ordering::Equal);
    }

    #[test]
    fn test_order_year_groups_example() {
        let groups = vec![
            YearGroup {
                year: 2024,
                events: vec![event("March", "B"), event("January", "A"), event("March", "A")],
            },
            YearGroup {
                year: 2025,
                events: vec![event("February", "Only")],
            },
        ];

        let ordered = order_year_groups(&groups);

        assert_eq!(ordered.iter().map(|g| g.year).collect::<Vec<_>>(), vec![2025, 2024]);
        let titles: Vec<(&str, &str)> = ordered[1]
            .events
            .iter()
            .map(|e| (e.month.as_str(), e.title.as_str()))
            .collect();
        assert_eq!(titles, vec![("January", "A"), ("March", "A"), ("March", "B")]);
    }

    #[test]
    fn test_unknown_months_sort_last() {
        let groups = vec![YearGroup {
            year: 2023,
            events: vec![event("TBD", "A"), event("December", "Z"), event("", "B")],
        }];

        let ordered = order_year_groups(&groups);
        let months: Vec<&str> = ordered[0].events.iter().map(|e| e.month.as_str()).collect();
        assert_eq!(months, vec!["December", "TBD", ""]);
    }

    #[test]
    fn test_empty_years_are_dropped() {
        let groups = vec![
            YearGroup { year: 2022, events: vec![] },
            YearGroup { year: 2021, events: vec![event("May", "x")] },
        ];
        let ordered = order_year_groups(&groups);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].year, 2021);
    }

    #[test]
    fn test_years_strictly_descending_and_months_non_decreasing() {
        let groups: Vec<YearGroup> = (2018..2026)
            .rev()
            .chain(2015..2018)
            .map(|year| YearGroup {
                year,
                events: vec![
                    event("October", "c"),
                    event("Unknown", "a"),
                    event("April 2", "b"),
                    event("April", "a"),
                ],
            })
            .collect();

        let ordered = order_year_groups(&groups);
        for pair in ordered.windows(2) {
            assert!(pair[0].year > pair[1].year);
        }
        for group in &ordered {
            for pair in group.events.windows(2) {
                assert!(month_ordinal(&pair[0].month) <= month_ordinal(&pair[1].month));
            }
            assert_eq!(group.events.last().unwrap().month, "Unknown");
        }
    }
}
