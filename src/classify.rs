//! Threshold lookup from (metric, value) to a cell style.
//!
//! Lower bounds are inclusive for the graded metrics and strict for the
//! warning metrics. Metrics without thresholds are always neutral.

/// The numeric columns of a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Alerts,
    AdjAlerts,
    FactGenie,
    FactGeniePercent,
    AvgTimeGap,
    Snaps10,
    Snaps20,
    AvgLength,
    Snaps150,
    Errors,
    Accuracy,
}

impl Metric {
    /// Column order of the table.
    pub const ALL: [Metric; 11] = [
        Metric::Alerts,
        Metric::AdjAlerts,
        Metric::FactGenie,
        Metric::FactGeniePercent,
        Metric::AvgTimeGap,
        Metric::Snaps10,
        Metric::Snaps20,
        Metric::AvgLength,
        Metric::Snaps150,
        Metric::Errors,
        Metric::Accuracy,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Metric::Alerts => "Alerts",
            Metric::AdjAlerts => "Adj. Alerts",
            Metric::FactGenie => "FactGenie",
            Metric::FactGeniePercent => "FactGenie %",
            Metric::AvgTimeGap => "Avg Time Gap",
            Metric::Snaps10 => "Snaps ≥10",
            Metric::Snaps20 => "Snaps ≥20",
            Metric::AvgLength => "Avg Length",
            Metric::Snaps150 => "Snaps ≥150",
            Metric::Errors => "Errors",
            Metric::Accuracy => "Accuracy %",
        }
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self, Metric::FactGeniePercent | Metric::Accuracy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Strong,
    Good,
    Weak,
    Poor,
    Warning,
    Neutral,
}

/// Map a value to its bucket for `metric`.
#[must_use]
pub fn classify(value: f64, metric: Metric) -> Bucket {
    match metric {
        Metric::FactGeniePercent => graded(value, [60.0, 40.0, 20.0]),
        Metric::Accuracy => graded(value, [99.0, 95.0, 90.0]),
        Metric::AvgLength => warn_above(value, 100.0),
        Metric::Snaps150 | Metric::Errors => warn_above(value, 0.0),
        _ => Bucket::Neutral,
    }
}

fn graded(value: f64, [strong, good, weak]: [f64; 3]) -> Bucket {
    if value >= strong {
        Bucket::Strong
    } else if value >= good {
        Bucket::Good
    } else if value >= weak {
        Bucket::Weak
    } else {
        Bucket::Poor
    }
}

fn warn_above(value: f64, limit: f64) -> Bucket {
    if value > limit {
        Bucket::Warning
    } else {
        Bucket::Neutral
    }
}

/// The style class for a value, or `None` when it renders unstyled.
///
/// Poor accuracy and warnings on length or errors are red; a poor
/// FactGenie share and any snap over 150 are only orange.
#[must_use]
pub fn cell_style(value: f64, metric: Metric) -> Option<&'static str> {
    match (classify(value, metric), metric) {
        (Bucket::Strong, _) => Some("cell-green"),
        (Bucket::Good, _) => Some("cell-light-green"),
        (Bucket::Weak, _) => Some("cell-yellow"),
        (Bucket::Poor, Metric::Accuracy) => Some("cell-red"),
        (Bucket::Poor, _) => Some("cell-orange"),
        (Bucket::Warning, Metric::Snaps150) => Some("cell-orange"),
        (Bucket::Warning, _) => Some("cell-red"),
        (Bucket::Neutral, _) => None,
    }
}
