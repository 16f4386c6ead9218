//! PNG export of a rendered chart.
//!
//! Matches the dashboard's "Export as PNG" button: a fixed filename per
//! chart type, rendered at a fixed pixel ratio, written to a directory of
//! the caller's choosing (the working directory in the app).

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use super::chart::{draw_chart, PlotError, BASE_PLOT_SIZE};
use crate::types::{Bucket, ChartKind};

/// Exports render at twice the on-screen resolution.
pub const EXPORT_PIXEL_RATIO: u32 = 2;

/// Render `buckets` as `kind` and write the PNG into `dir`.
///
/// Returns the path of the written file
/// (e.g. `<dir>/line_chart.png`). An existing file is overwritten.
pub fn export_chart(kind: ChartKind, buckets: &[Bucket], dir: &Path) -> Result<PathBuf, PlotError> {
    let size = (
        BASE_PLOT_SIZE.0 * EXPORT_PIXEL_RATIO,
        BASE_PLOT_SIZE.1 * EXPORT_PIXEL_RATIO,
    );
    let path = dir.join(kind.export_filename());
    {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        draw_chart(kind, buckets, &root)?;
        root.present()?;
    }
    Ok(path)
}
