use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use once_cell::sync::Lazy;
use std::error::Error;
use tokio::sync::Mutex as TokioMutex;

use super::styles::{ChartStyle, ChartTheme, SERIES_PALETTE};
use crate::types::{Bucket, ChartKind, Granularity};
use crate::viewmodel::{category_series, pie_slices, scatter_points};

pub type PlotError = Box<dyn Error + Send + Sync>;

/// Pixel size of the in-app plot; exports scale this up.
pub const BASE_PLOT_SIZE: (u32, u32) = (640, 480);

// Global plot cache with a 5-minute expiration
static PLOT_CACHE: Lazy<Arc<TokioMutex<LruCache<PlotCacheKey, (Vec<u8>, Instant)>>>> =
    Lazy::new(|| Arc::new(TokioMutex::new(LruCache::new(NonZeroUsize::new(10).unwrap()))));

#[derive(Hash, Eq, PartialEq)]
struct PlotCacheKey {
    kind: ChartKind,
    granularity: Granularity,
    data_hash: u64,
}

impl PlotCacheKey {
    fn new(kind: ChartKind, granularity: Granularity, buckets: &[Bucket]) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for bucket in buckets {
            bucket.label.hash(&mut hasher);
            bucket.total.to_bits().hash(&mut hasher);
        }
        Self {
            kind,
            granularity,
            data_hash: hasher.finish(),
        }
    }
}

/// Render a chart to PNG bytes, going through the plot cache.
///
/// Re-rendering the same buckets for the same widget (e.g. after a
/// granularity round-trip) hits the cache instead of re-drawing.
pub async fn generate_plot_async(
    kind: ChartKind,
    granularity: Granularity,
    buckets: Vec<Bucket>,
) -> Result<Vec<u8>, PlotError> {
    let cache_key = PlotCacheKey::new(kind, granularity, &buckets);

    if let Some((plot_data, timestamp)) = PLOT_CACHE.lock().await.get(&cache_key) {
        if timestamp.elapsed() < Duration::from_secs(300) {
            return Ok(plot_data.clone());
        }
    }

    let plot_data =
        tokio::task::spawn_blocking(move || render_plot_to_png(kind, &buckets, BASE_PLOT_SIZE))
            .await??;

    PLOT_CACHE
        .lock()
        .await
        .put(cache_key, (plot_data.clone(), Instant::now()));

    Ok(plot_data)
}

/// Render a chart into a PNG byte buffer at the given pixel size.
pub fn render_plot_to_png(
    kind: ChartKind,
    buckets: &[Bucket],
    size: (u32, u32),
) -> Result<Vec<u8>, PlotError> {
    let path = std::env::temp_dir().join(format!(
        "chartdash_{}_{}.png",
        std::process::id(),
        kind.export_filename()
    ));
    {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        draw_chart(kind, buckets, &root)?;
        root.present()?;
    }
    let buffer = std::fs::read(&path)?;
    let _ = std::fs::remove_file(&path);
    Ok(buffer)
}

/// Draw one chart onto a prepared drawing area.
///
/// An empty bucket list produces an empty styled chart, never an error.
pub fn draw_chart(
    kind: ChartKind,
    buckets: &[Bucket],
    root: &DrawingArea<BitMapBackend, Shift>,
) -> Result<(), PlotError> {
    let theme = ChartTheme::default();
    root.fill(&theme.background_color)?;

    if buckets.is_empty() {
        let (w, h) = root.dim_in_pixel();
        root.draw_text(
            "No data",
            &("sans-serif", 20).into_font().color(&theme.text_color),
            (w as i32 / 2 - 30, h as i32 / 2),
        )?;
        return Ok(());
    }

    match kind {
        ChartKind::Line => draw_line(buckets, root, &theme),
        ChartKind::Bar => draw_bar(buckets, root, &theme),
        ChartKind::Pie => draw_pie(buckets, root, &theme),
        ChartKind::Scatter => draw_scatter(buckets, root, &theme),
    }
}

/// Build the cartesian chart shared by line, bar and scatter.
fn build_cartesian<'a, 'b>(
    title: &str,
    categories: Vec<String>,
    values: &[f64],
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    theme: &ChartTheme,
) -> Result<ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>, PlotError>
{
    let style = ChartStyle::default();
    let n = categories.len() as f64;
    let (y_min, y_max) = value_range(values);

    let mut chart = ChartBuilder::on(root)
        .caption(
            title,
            ("sans-serif", 30).into_font().color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..n, y_min..y_max)?;

    let x_label_formatter = move |x: &f64| {
        let idx = *x as usize;
        if idx < categories.len() {
            // Show fewer labels to prevent overlap
            if idx == 0
                || idx == categories.len() - 1
                || (idx % (categories.len() / 4).max(1) == 0
                    && idx > 0
                    && idx < categories.len() - 1)
            {
                categories[idx].clone()
            } else {
                String::new()
            }
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&|y| {
            if y.abs() >= 1_000_000.0 {
                format!("{:.1}M", y / 1_000_000.0)
            } else if y.abs() >= 1_000.0 {
                format!("{:.1}K", y / 1_000.0)
            } else {
                format!("{:.0}", y)
            }
        })
        .draw()?;

    Ok(chart)
}

fn draw_line(
    buckets: &[Bucket],
    root: &DrawingArea<BitMapBackend, Shift>,
    theme: &ChartTheme,
) -> Result<(), PlotError> {
    let series = category_series(buckets);
    let mut chart = build_cartesian("Values Over Time", series.categories, &series.values, root, theme)?;

    let points: Vec<(f64, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    // Subtle glow under the main line
    let glow_color = RGBColor(100, 149, 237).mix(0.3);
    chart.draw_series(LineSeries::new(points.clone(), glow_color.stroke_width(4)))?;

    let line_color = RGBColor(135, 206, 250);
    chart.draw_series(LineSeries::new(points, line_color.stroke_width(2)))?;

    Ok(())
}

fn draw_bar(
    buckets: &[Bucket],
    root: &DrawingArea<BitMapBackend, Shift>,
    theme: &ChartTheme,
) -> Result<(), PlotError> {
    let series = category_series(buckets);
    let mut chart = build_cartesian("Values by Bucket", series.categories, &series.values, root, theme)?;

    let bar_width = 0.8;
    chart.draw_series(series.values.iter().enumerate().map(|(i, v)| {
        let x0 = i as f64;
        let x1 = x0 + bar_width;
        let color = SERIES_PALETTE[0].mix(0.7);
        Rectangle::new([(x0, 0.0), (x1, *v)], color.filled())
    }))?;

    Ok(())
}

fn draw_scatter(
    buckets: &[Bucket],
    root: &DrawingArea<BitMapBackend, Shift>,
    theme: &ChartTheme,
) -> Result<(), PlotError> {
    let points = scatter_points(buckets);
    let series = category_series(buckets);
    let mut chart = build_cartesian("Value Scatter", series.categories, &series.values, root, theme)?;

    let color = SERIES_PALETTE[2];
    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new((p.x as f64, p.y), 4, color.filled())),
    )?;

    Ok(())
}

fn draw_pie(
    buckets: &[Bucket],
    root: &DrawingArea<BitMapBackend, Shift>,
    theme: &ChartTheme,
) -> Result<(), PlotError> {
    let slices: Vec<_> = pie_slices(buckets)
        .into_iter()
        .filter(|s| s.value > 0.0)
        .collect();
    if slices.is_empty() {
        return Ok(());
    }

    let root = root.titled(
        "Value Share",
        ("sans-serif", 30).into_font().color(&theme.text_color),
    )?;

    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = (w.min(h) as f64) * 0.35;

    let sizes: Vec<f64> = slices.iter().map(|s| s.value).collect();
    let labels: Vec<String> = slices.iter().map(|s| s.name.clone()).collect();
    let colors: Vec<RGBColor> = (0..slices.len())
        .map(|i| SERIES_PALETTE[i % SERIES_PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(
        ("sans-serif", 14)
            .into_font()
            .color(&theme.text_color),
    );
    root.draw(&pie)?;

    Ok(())
}

/// Padded y-axis range for a value series, always non-degenerate.
fn value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let lo = if min < 0.0 { min * 1.1 } else { 0.0 };
    let hi = if max > 0.0 { max * 1.1 } else { 1.0 };
    if lo < hi {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}
