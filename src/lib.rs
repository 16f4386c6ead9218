//! # Time-Series Chart Dashboard Library
//!
//! `chartdash` is a library for aggregating a time-series dataset by a
//! shared timeframe selection and rendering it through four chart widgets
//! (line, bar, pie, scatter). Every widget re-aggregates the same records
//! through one pipeline: bucket by calendar key, sum per bucket, project
//! into the shape the chart needs.
//!
//! ## Features
//!
//! - Daily / weekly / monthly bucketing with summed values
//! - First-seen bucket ordering (matches the feed's arrival order)
//! - Per-chart view-model projections over one shared aggregation
//! - JSON feed loading over HTTP or from a local file
//! - Plotters-rendered charts with PNG export at 2x pixel ratio
//!
//! ## Example
//!
//! ```
//! use chartdash::aggregate::aggregate;
//! use chartdash::types::{Granularity, RawRecord};
//! use chartdash::viewmodel::category_series;
//!
//! let records = vec![
//!     RawRecord::new("2024-01-01", 5.0),
//!     RawRecord::new("2024-01-08", 7.0),
//! ];
//! let buckets = aggregate(&records, Granularity::Weekly);
//! let series = category_series(&buckets);
//! assert_eq!(series.categories, vec!["Week 1-2024", "Week 2-2024"]);
//! assert_eq!(series.values, vec![5.0, 7.0]);
//! ```

pub mod aggregate;
pub mod app;
pub mod data;
pub mod error;
pub mod plotting;
pub mod types;
pub mod viewmodel;

// Re-export main types for convenience
pub use app::App as DashboardApp;
pub use error::DataError;
pub use types::{Bucket, ChartKind, Granularity, RawRecord};
