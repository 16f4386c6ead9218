//! Chart rendering with plotters.
//!
//! The app renders each widget's buckets into PNG bytes and uploads them as
//! an egui texture; exports reuse the same drawing code at a higher pixel
//! ratio.

mod chart;
mod export;
mod styles;


pub use chart::{draw_chart, generate_plot_async, render_plot_to_png, PlotError, BASE_PLOT_SIZE};
pub use export::{export_chart, EXPORT_PIXEL_RATIO};
pub use styles::{ChartStyle, ChartTheme, SERIES_PALETTE};
