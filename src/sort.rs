//! Row ordering: known snappers first, then by name.

use std::cmp::Ordering;

use clap::ValueEnum;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::ResultRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortDirection {
    #[default]
    #[value(name = "asc", alias = "a-z")]
    Ascending,
    #[value(name = "desc", alias = "z-a")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "A-Z",
            SortDirection::Descending => "Z-A",
        }
    }
}

/// Base letters only: decomposed, accents dropped, lowercased.
fn primary_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collation-style name order: base letters first, then accents, then
/// case with lowercase ahead of uppercase. Only identical names compare
/// equal.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Return a sorted copy of `rows`. Unknown snappers always trail known
/// ones; `direction` only flips the name comparison within each group.
#[must_use]
pub fn sort_results(rows: &[ResultRow], direction: SortDirection) -> Vec<ResultRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        a.is_unknown.cmp(&b.is_unknown).then_with(|| {
            let by_name = compare_names(&a.snapper, &b.snapper);
            match direction {
                SortDirection::Ascending => by_name,
                SortDirection::Descending => by_name.reverse(),
            }
        })
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Aggregate;

    fn row(name: &str, unknown: bool) -> ResultRow {
        ResultRow::new(name, unknown, Aggregate::default())
    }

    fn names(rows: &[ResultRow]) -> Vec<&str> {
        rows.iter().map(|r| r.snapper.as_str()).collect()
    }

    #[test]
    fn test_ascending() {
        let rows = vec![row("carl", false), row("Ann", false), row("bob", false)];
        assert_eq!(
            names(&sort_results(&rows, SortDirection::Ascending)),
            ["Ann", "bob", "carl"]
        );
    }

    #[test]
    fn test_descending() {
        let rows = vec![row("carl", false), row("Ann", false), row("bob", false)];
        assert_eq!(
            names(&sort_results(&rows, SortDirection::Descending)),
            ["carl", "bob", "Ann"]
        );
    }

    #[test]
    fn test_unknown_always_last() {
        let rows = vec![row("Ann", true), row("Zed", false), row("Bea", true)];
        assert_eq!(
            names(&sort_results(&rows, SortDirection::Ascending)),
            ["Zed", "Ann", "Bea"]
        );
        assert_eq!(
            names(&sort_results(&rows, SortDirection::Descending)),
            ["Zed", "Bea", "Ann"]
        );
    }

    #[test]
    fn test_source_untouched() {
        let rows = vec![row("b", false), row("a", false)];
        let _ = sort_results(&rows, SortDirection::Ascending);
        assert_eq!(names(&rows), ["b", "a"]);
    }

    #[test]
    fn test_duplicate_names_keep_input_order() {
        let mut first = row("Dup", false);
        first.stats.alerts = 1;
        let mut second = row("Dup", false);
        second.stats.alerts = 2;
        let rows = vec![first, row("Ann", false), second];

        for dir in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort_results(&rows, dir);
            let dups: Vec<u64> = sorted
                .iter()
                .filter(|r| r.snapper == "Dup")
                .map(|r| r.stats.alerts)
                .collect();
            assert_eq!(dups, [1, 2]);
        }
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        let rows = vec![row("Zed", false), row("Émile", false), row("Dan", false)];
        assert_eq!(
            names(&sort_results(&rows, SortDirection::Ascending)),
            ["Dan", "Émile", "Zed"]
        );
        assert_eq!(
            names(&sort_results(&rows, SortDirection::Descending)),
            ["Zed", "Émile", "Dan"]
        );
    }

    #[test]
    fn test_compare_names_accent_after_plain() {
        assert_eq!(compare_names("emile", "Émile"), Ordering::Less);
        assert_eq!(compare_names("Émile", "Emma"), Ordering::Less);
        assert_eq!(compare_names("Ångström", "Anna"), Ordering::Less);
    }

    #[test]
    fn test_compare_names_case_tie_break() {
        assert_eq!(compare_names("ann", "Ann"), Ordering::Less);
        assert_eq!(compare_names("ann", "BOB"), Ordering::Less);
        assert_eq!(compare_names("Ann", "Ann"), Ordering::Equal);
    }
}
