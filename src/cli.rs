//! Command handler functions for the snapview CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use crate::loader::{self, Source};
use crate::render::{HtmlFormatter, MarkdownFormatter, ReportFormatter, TextFormatter};
use crate::sort::SortDirection;
use crate::state::{AppState, DisplayState, ERROR_NOTICE};

/// Output style for the `show` command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Style {
    #[default]
    Text,
    Markdown,
    Html,
}

impl Style {
    pub fn formatter(self, color: bool) -> Box<dyn ReportFormatter> {
        match self {
            Style::Text => Box::new(TextFormatter { color }),
            Style::Markdown => Box::new(MarkdownFormatter),
            Style::Html => Box::new(HtmlFormatter),
        }
    }
}

/// Options shared by `show` and `export`.
#[derive(Clone, Debug, Default)]
pub struct ShowOptions {
    /// Picker value to select; invalid values leave the first report shown.
    pub report: Option<String>,
    pub direction: SortDirection,
}

/// Run the single load and hand the outcome to a fresh state.
pub fn load_state(source: &Source) -> AppState {
    let mut state = AppState::new();
    state.on_load(loader::load(source));
    state
}

fn ensure_loaded(state: &AppState) -> Result<()> {
    if state.display() != DisplayState::Loaded {
        bail!(ERROR_NOTICE);
    }
    Ok(())
}

fn apply_options(state: &mut AppState, opts: &ShowOptions) {
    if let Some(ref value) = opts.report {
        if !state.select(value) {
            tracing::warn!(
                report = %value,
                available = state.reports().len(),
                "no such report, keeping the current selection"
            );
        }
    }
    state.set_sort_direction(opts.direction);
}

pub fn cmd_reports(state: &AppState) -> Result<String> {
    ensure_loaded(state)?;
    let mut out = String::new();
    writeln!(out, "{:<6} REPORT", "INDEX").unwrap();
    writeln!(out, "{}", "-".repeat(40)).unwrap();
    for entry in state.picker_labels() {
        let marker = if entry.index == state.current_index() {
            "*"
        } else {
            " "
        };
        writeln!(out, "{:<5}{} {}", entry.index, marker, entry.label).unwrap();
    }
    Ok(out)
}

pub fn cmd_show(
    state: &mut AppState,
    opts: &ShowOptions,
    style: Style,
    color: bool,
) -> Result<String> {
    ensure_loaded(state)?;
    apply_options(state, opts);
    Ok(state.view().format(style.formatter(color).as_ref()))
}

pub fn cmd_export(state: &mut AppState, opts: &ShowOptions, out: &Path) -> Result<String> {
    ensure_loaded(state)?;
    apply_options(state, opts);
    let html = state.view().format(&HtmlFormatter);
    std::fs::write(out, html).with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(format!("Wrote {}\n", out.display()))
}
