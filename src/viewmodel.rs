//! Per-chart projections of the aggregated buckets.
//!
//! Each chart type wants the same buckets in a slightly different shape.
//! These are allocation-only transforms; they never fail and an empty
//! bucket list projects to an empty structure.

use crate::types::Bucket;

/// Index-aligned category labels and values, consumed by the line and bar
/// charts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

/// One pie slice: bucket label plus its share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

/// One scatter point: bucket position on the x axis, total on the y axis.
/// The label rides along for click reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: usize,
    pub y: f64,
    pub label: String,
}

/// Project buckets into the line/bar chart shape.
pub fn category_series(buckets: &[Bucket]) -> CategorySeries {
    CategorySeries {
        categories: buckets.iter().map(|b| b.label.clone()).collect(),
        values: buckets.iter().map(|b| b.total).collect(),
    }
}

/// Project buckets into pie slices, one per bucket, in bucket order.
pub fn pie_slices(buckets: &[Bucket]) -> Vec<PieSlice> {
    buckets
        .iter()
        .map(|b| PieSlice {
            name: b.label.clone(),
            value: b.total,
        })
        .collect()
}

/// Project buckets into scatter points, x = bucket index in output order.
pub fn scatter_points(buckets: &[Bucket]) -> Vec<ScatterPoint> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, b)| ScatterPoint {
            x: i,
            y: b.total,
            label: b.label.clone(),
        })
        .collect()
}
