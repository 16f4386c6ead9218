//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing raw time-series records and their aggregated form.

use serde::{Deserialize, Serialize};

/// One (timestamp, value) pair as delivered by the data source.
///
/// Records are immutable once fetched and kept in arrival order; the source
/// makes no promise that they are chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Timestamp string as delivered (ISO-8601 or a plain `YYYY-MM-DD` date)
    pub timestamp: String,
    /// Numeric measurement for this timestamp
    pub value: f64,
}

impl RawRecord {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// The time-bucketing resolution selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
    ];

    /// Label shown on the selector button for this granularity.
    pub fn button_label(self) -> &'static str {
        match self {
            Granularity::Daily => "Day",
            Granularity::Weekly => "Week",
            Granularity::Monthly => "Month",
        }
    }
}

/// Identity of a time bucket for a given granularity.
///
/// Two records land in the same bucket iff their derived keys are equal.
/// Daily keys carry the raw timestamp string, so distinct strings never
/// merge and identical strings always do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// Daily: the record's own timestamp string, unmodified
    Timestamp(String),
    /// Weekly: week-of-year number plus calendar year
    Week { week: u32, year: i32 },
    /// Monthly: zero-based month index plus calendar year
    Month { month: u32, year: i32 },
}

/// An aggregated group of records sharing a computed time key.
///
/// Created the first time its key is seen; `total` accumulates by addition
/// for every later record with the same key.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: BucketKey,
    /// Human-readable label for the bucket (axis category / slice name)
    pub label: String,
    /// Sum of the values of all records in this bucket
    pub total: f64,
}

/// The four chart widgets on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Scatter,
    ];

    /// Panel heading shown above the widget.
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
            ChartKind::Pie => "Pie",
            ChartKind::Scatter => "Scatter",
        }
    }

    /// Fixed filename used by the PNG export for this chart type.
    pub fn export_filename(self) -> &'static str {
        match self {
            ChartKind::Line => "line_chart.png",
            ChartKind::Bar => "bar_chart.png",
            ChartKind::Pie => "pie_chart.png",
            ChartKind::Scatter => "scatter_chart.png",
        }
    }
}
