//! Declarative description of the table, built without touching any
//! output surface. Formatters in [`crate::render`] turn it into text.

use crate::classify::{cell_style, Metric};
use crate::label::period_header;
use crate::model::{Aggregate, Report};
use crate::sort::{sort_results, SortDirection};

pub const NAME_HEADER: &str = "Snapper";
pub const TOTAL_LABEL: &str = "Total/Avg";
pub const TOTAL_EX_LABEL: &str = "Total/Avg (ex. Turbo, PLX)";
pub const UNKNOWN_MARKER: &str = " *";

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub text: String,
    /// Style class from the classifier; `None` renders plain.
    pub style: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Name cell, including the unknown marker where applicable.
    pub label: String,
    pub unknown: bool,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub last_updated: Option<String>,
    pub period: Option<String>,
    pub rows: Vec<RowView>,
    /// `Total/Avg` then `Total/Avg (ex. Turbo, PLX)`.
    pub summary: [RowView; 2],
}

impl TableView {
    pub fn headers() -> Vec<&'static str> {
        std::iter::once(NAME_HEADER)
            .chain(Metric::ALL.iter().map(Metric::header))
            .collect()
    }
}

/// The value a metric column reads from an aggregate.
#[must_use]
pub fn metric_value(stats: &Aggregate, metric: Metric) -> f64 {
    match metric {
        Metric::Alerts => stats.alerts as f64,
        Metric::AdjAlerts => stats.adj_alerts as f64,
        Metric::FactGenie => stats.fact_genie as f64,
        Metric::FactGeniePercent => stats.fact_genie_percent,
        Metric::AvgTimeGap => stats.avg_time_gap,
        Metric::Snaps10 => stats.snaps10 as f64,
        Metric::Snaps20 => stats.snaps20 as f64,
        Metric::AvgLength => stats.avg_length,
        Metric::Snaps150 => stats.snaps150 as f64,
        Metric::Errors => stats.errors as f64,
        Metric::Accuracy => stats.accuracy,
    }
}

/// One decimal place, with exact ties rounded away from zero.
///
/// A binary float sits exactly halfway between two tenths only when it is
/// an odd multiple of 0.25, so those are rounded explicitly; every other
/// value already formats to its nearest tenth.
#[must_use]
pub fn fixed1(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

/// Counts print as-is; measures get one decimal, percentages a trailing `%`.
#[must_use]
pub fn format_metric(stats: &Aggregate, metric: Metric) -> String {
    match metric {
        Metric::Alerts => stats.alerts.to_string(),
        Metric::AdjAlerts => stats.adj_alerts.to_string(),
        Metric::FactGenie => stats.fact_genie.to_string(),
        Metric::Snaps10 => stats.snaps10.to_string(),
        Metric::Snaps20 => stats.snaps20.to_string(),
        Metric::Snaps150 => stats.snaps150.to_string(),
        Metric::Errors => stats.errors.to_string(),
        Metric::FactGeniePercent | Metric::AvgTimeGap | Metric::AvgLength | Metric::Accuracy => {
            let value = metric_value(stats, metric);
            if metric.is_percentage() {
                format!("{}%", fixed1(value))
            } else {
                fixed1(value)
            }
        }
    }
}

fn cells(stats: &Aggregate, styled: bool) -> Vec<CellView> {
    Metric::ALL
        .iter()
        .map(|&metric| CellView {
            text: format_metric(stats, metric),
            style: if styled {
                cell_style(metric_value(stats, metric), metric)
            } else {
                None
            },
        })
        .collect()
}

fn summary_row(label: &str, stats: &Aggregate) -> RowView {
    RowView {
        label: label.to_string(),
        unknown: false,
        cells: cells(stats, false),
    }
}

/// Build the table for `report` with rows ordered by `direction`.
#[must_use]
pub fn build_table(report: &Report, direction: SortDirection) -> TableView {
    let rows = sort_results(&report.results, direction)
        .into_iter()
        .map(|row| {
            let label = if row.is_unknown {
                format!("{}{UNKNOWN_MARKER}", row.snapper)
            } else {
                row.snapper.clone()
            };
            RowView {
                label,
                unknown: row.is_unknown,
                cells: cells(&row.stats, true),
            }
        })
        .collect();

    TableView {
        last_updated: report.date.clone().filter(|d| !d.is_empty()),
        period: period_header(report),
        rows,
        summary: [
            summary_row(TOTAL_LABEL, &report.totals),
            summary_row(TOTAL_EX_LABEL, &report.totals_ex_turbo_plx),
        ],
    }
}
