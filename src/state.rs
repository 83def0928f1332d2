//! Viewer state and the transitions the controls drive.
//!
//! The display moves from `Loading` to either `Loaded` or `Error` exactly
//! once. Selection and sort changes report whether a re-render is due.

use crate::error::ViewerError;
use crate::label::report_label;
use crate::model::{Report, ReportCollection};
use crate::sort::SortDirection;
use crate::view::{build_table, TableView};

/// Generic notice shown when the report data cannot be displayed.
pub const ERROR_NOTICE: &str = "Unable to load report data. Please try again later.";
pub const LOADING_NOTICE: &str = "Loading report data...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerEntry {
    pub index: usize,
    pub label: String,
}

/// Everything a formatter needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    Loading,
    Error(&'static str),
    Loaded {
        picker: Vec<PickerEntry>,
        selected: usize,
        direction: SortDirection,
        table: TableView,
    },
}

#[derive(Debug)]
pub struct AppState {
    reports: ReportCollection,
    current_index: usize,
    sort_direction: SortDirection,
    display: DisplayState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
            current_index: 0,
            sort_direction: SortDirection::default(),
            display: DisplayState::Loading,
        }
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// The report being displayed, once loaded.
    pub fn current_report(&self) -> Option<&Report> {
        match self.display {
            DisplayState::Loaded => self.reports.get(self.current_index),
            _ => None,
        }
    }

    /// Apply the outcome of the one load attempt. Ignored unless still
    /// loading. An empty collection is treated as a failure.
    pub fn on_load(&mut self, result: Result<ReportCollection, ViewerError>) {
        if self.display != DisplayState::Loading {
            tracing::warn!(state = ?self.display, "ignoring load result outside Loading state");
            return;
        }
        match result {
            Ok(reports) if !reports.is_empty() => {
                self.reports = reports;
                self.current_index = 0;
                self.display = DisplayState::Loaded;
            }
            Ok(_) => {
                let e = ViewerError::EmptyData;
                tracing::error!(error = %e, "error loading data");
                self.display = DisplayState::Error;
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading data");
                self.display = DisplayState::Error;
            }
        }
    }

    /// Select a report by its picker value. Returns `true` when the
    /// selection changed the displayed report and a render is due.
    pub fn select(&mut self, value: &str) -> bool {
        let Ok(index) = value.trim().parse::<usize>() else {
            tracing::debug!(value, "ignoring non-numeric report selection");
            return false;
        };
        self.select_index(index)
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if self.display != DisplayState::Loaded || index >= self.reports.len() {
            tracing::debug!(index, "ignoring out-of-range report selection");
            return false;
        }
        self.current_index = index;
        true
    }

    /// Switch sort direction. Returns `true` when a report is on screen
    /// and must be redrawn.
    pub fn set_sort_direction(&mut self, direction: SortDirection) -> bool {
        self.sort_direction = direction;
        self.current_report().is_some()
    }

    /// One label per report, in document order.
    pub fn picker_labels(&self) -> Vec<PickerEntry> {
        self.reports
            .iter()
            .enumerate()
            .map(|(index, report)| PickerEntry {
                index,
                label: report_label(report, index),
            })
            .collect()
    }

    pub fn view(&self) -> ViewModel {
        match (self.display, self.current_report()) {
            (DisplayState::Loaded, Some(report)) => ViewModel::Loaded {
                picker: self.picker_labels(),
                selected: self.current_index,
                direction: self.sort_direction,
                table: build_table(report, self.sort_direction),
            },
            (DisplayState::Error, _) => ViewModel::Error(ERROR_NOTICE),
            _ => ViewModel::Loading,
        }
    }
}
