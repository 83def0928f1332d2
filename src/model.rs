//! Serde representation of the report document. Field names follow the
//! camelCase keys emitted by the reporting pipeline.
//!
//! Every numeric field is required: a row or aggregate missing one fails
//! to deserialize rather than rendering a placeholder. Counts accept any
//! non-negative whole number, including ones written as `12.0`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// The full document: an ordered list of report snapshots, newest first.
pub type ReportCollection = Vec<Report>;

/// One dated snapshot of per-snapper statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub date: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Raw period, `dd/mm/yyyy-dd/mm/yyyy`.
    #[serde(default)]
    pub report_period: Option<String>,
    #[serde(default)]
    pub report_period_formatted: Option<String>,
    pub results: Vec<ResultRow>,
    pub totals: Aggregate,
    #[serde(rename = "totalsExTurboPLX")]
    pub totals_ex_turbo_plx: Aggregate,
}

/// Statistics for a single snapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub snapper: String,
    #[serde(default)]
    pub is_unknown: bool,
    #[serde(flatten)]
    pub stats: Aggregate,
}

/// The numeric shape shared by result rows and the precomputed totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    #[serde(deserialize_with = "count")]
    pub alerts: u64,
    #[serde(deserialize_with = "count")]
    pub adj_alerts: u64,
    #[serde(deserialize_with = "count")]
    pub fact_genie: u64,
    pub fact_genie_percent: f64,
    pub avg_time_gap: f64,
    #[serde(deserialize_with = "count")]
    pub snaps10: u64,
    #[serde(deserialize_with = "count")]
    pub snaps20: u64,
    pub avg_length: f64,
    #[serde(deserialize_with = "count")]
    pub snaps150: u64,
    #[serde(deserialize_with = "count")]
    pub errors: u64,
    pub accuracy: f64,
}

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative whole number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
        if v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 {
            Ok(v as u64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(CountVisitor)
}

impl ResultRow {
    pub fn new(snapper: impl Into<String>, is_unknown: bool, stats: Aggregate) -> Self {
        Self {
            snapper: snapper.into(),
            is_unknown,
            stats,
        }
    }
}
