mod common;

use snapview::cli::{self, ShowOptions, Style};
use snapview::loader::Source;
use snapview::sort::SortDirection;
use snapview::state::{DisplayState, ViewModel};

fn loaded_state() -> (tempfile::TempDir, snapview::state::AppState) {
    let (dir, path) = common::write_document(&common::sample_document().to_string());
    let state = cli::load_state(&Source::File(path));
    (dir, state)
}

#[test]
fn load_selects_first_report_and_lists_labels() {
    let (_dir, state) = loaded_state();

    assert_eq!(state.display(), DisplayState::Loaded);
    assert_eq!(state.current_index(), 0);
    let labels: Vec<String> = state.picker_labels().into_iter().map(|p| p.label).collect();
    assert_eq!(labels, ["01 Mar 2024 - 31 Mar 2024", "29/02/2024"]);
}

#[test]
fn unknown_snapper_sorts_last_even_when_lexically_first() {
    let (_dir, state) = loaded_state();

    let ViewModel::Loaded { table, .. } = state.view() else {
        panic!("expected a loaded view");
    };
    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["bob", "Zed", "Ann *"]);
    assert_eq!(table.rows[1].cells[10].style, Some("cell-green"));
    assert_eq!(table.rows[2].cells[10].style, Some("cell-red"));
}

#[test]
fn out_of_range_selection_leaves_view_unchanged() {
    let (_dir, mut state) = loaded_state();
    let before = state.view();

    assert!(!state.select("5"));
    assert!(!state.select("one"));

    assert_eq!(state.view(), before);
}

#[test]
fn summary_rows_are_never_styled() {
    let (_dir, state) = loaded_state();

    let ViewModel::Loaded { table, .. } = state.view() else {
        panic!("expected a loaded view");
    };
    // Totals accuracy 80.0 and errors 3 would both be flagged on a snapper row.
    assert_eq!(table.summary[0].cells[10].text, "80.0%");
    assert_eq!(table.summary[0].cells[9].text, "3");
    assert!(table
        .summary
        .iter()
        .flat_map(|r| r.cells.iter())
        .all(|c| c.style.is_none()));
}

#[test]
fn show_html_for_second_report_descending() {
    let (_dir, mut state) = loaded_state();
    let opts = ShowOptions {
        report: Some("1".to_string()),
        direction: SortDirection::Descending,
    };

    let html = cli::cmd_show(&mut state, &opts, Style::Html, false).unwrap();

    assert!(html.contains("<li class=\"active\">29/02/2024</li>"));
    assert!(html.contains("Last updated: 29/02/2024"));
    assert!(!html.contains("dateRangeHeader"));
    assert!(html.contains("<td class=\"cell-light-green\">96.0%</td>"));
}

#[test]
fn show_fails_with_notice_when_source_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = cli::load_state(&Source::File(dir.path().join("missing.json")));

    let err = cli::cmd_show(&mut state, &ShowOptions::default(), Style::Text, false).unwrap_err();

    assert_eq!(state.display(), DisplayState::Error);
    assert!(err.to_string().contains("Unable to load report data"));
}
