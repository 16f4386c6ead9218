use eframe::App as EApp;
use egui::TextureHandle;
use std::sync::{Arc, Mutex};

use crate::aggregate::aggregate;
use crate::types::{Bucket, ChartKind, Granularity, RawRecord};

/// The shared timeframe selection.
///
/// `select` replaces the granularity and bumps the epoch; widgets compare
/// the epoch they last recomputed against to notice the change (egui is
/// immediate-mode, so staleness polling stands in for callbacks).
#[derive(Debug, Clone)]
pub struct SelectionState {
    current: Granularity,
    epoch: u64,
}

impl SelectionState {
    pub fn new(initial: Granularity) -> Self {
        Self {
            current: initial,
            epoch: 0,
        }
    }

    pub fn select(&mut self, granularity: Granularity) {
        self.current = granularity;
        self.epoch += 1;
    }

    pub fn current(&self) -> Granularity {
        self.current
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(Granularity::Daily)
    }
}

/// State owned by one chart panel.
///
/// Each widget holds its own fetched copy of the records and recomputes its
/// buckets from scratch whenever the shared selection changes. Loading
/// happens once at mount; a failed fetch leaves the widget empty with an
/// error message until remount.
pub struct ChartWidget {
    pub kind: ChartKind,
    pub records: Vec<RawRecord>,
    pub buckets: Vec<Bucket>,
    /// Rendered PNG bytes of the current plot, if any
    pub plot_png: Option<Vec<u8>>,
    pub plot_texture: Option<TextureHandle>,
    /// Buckets changed; the plot needs re-rendering
    pub plot_dirty: bool,
    /// `plot_png` changed; the texture needs re-uploading
    pub texture_dirty: bool,
    pub is_loading: bool,
    pub is_rendering: bool,
    pub error_message: Option<String>,
    seen_epoch: Option<u64>,
}

impl ChartWidget {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            buckets: Vec::new(),
            plot_png: None,
            plot_texture: None,
            plot_dirty: false,
            texture_dirty: false,
            is_loading: true,
            is_rendering: false,
            error_message: None,
            seen_epoch: None,
        }
    }

    /// Install the fetched record set and run the first aggregation.
    pub fn on_data_loaded(&mut self, records: Vec<RawRecord>, selection: &SelectionState) {
        self.records = records;
        self.is_loading = false;
        self.error_message = None;
        self.recompute(selection);
    }

    /// Record a fetch failure; the widget renders an empty chart.
    pub fn on_load_failed(&mut self, message: String, selection: &SelectionState) {
        self.records = Vec::new();
        self.is_loading = false;
        self.error_message = Some(message);
        self.recompute(selection);
    }

    /// Recompute the buckets if the selection moved since we last looked.
    pub fn sync(&mut self, selection: &SelectionState) {
        if self.is_loading {
            return;
        }
        if self.seen_epoch != Some(selection.epoch()) {
            self.recompute(selection);
        }
    }

    fn recompute(&mut self, selection: &SelectionState) {
        self.buckets = aggregate(&self.records, selection.current());
        self.seen_epoch = Some(selection.epoch());
        self.plot_dirty = true;
    }

    /// Bucket under a click at normalized horizontal position `frac` (0..1)
    /// across the chart area. Returns the bucket's (label, total).
    pub fn bucket_at_fraction(&self, frac: f32) -> Option<(String, f64)> {
        if self.buckets.is_empty() {
            return None;
        }
        let n = self.buckets.len();
        let i = ((frac.clamp(0.0, 1.0) * n as f32) as usize).min(n - 1);
        let bucket = &self.buckets[i];
        Some((bucket.label.clone(), bucket.total))
    }
}

/// Main application state.
pub struct App {
    /// URL or file path of the JSON feed
    pub data_source: String,
    pub selection: SelectionState,
    pub widgets: Vec<ChartWidget>,
    /// Informational popup text (chart click), dismissed with OK
    pub alert: Option<String>,
    /// One-line status after a PNG export
    pub status: Option<String>,
    /// Set once the per-widget fetches have been spawned
    pub fetch_started: bool,
}

impl App {
    pub fn new(data_source: String) -> Self {
        Self {
            data_source,
            selection: SelectionState::default(),
            widgets: ChartKind::ALL.iter().map(|&k| ChartWidget::new(k)).collect(),
            alert: None,
            status: None,
            fetch_started: false,
        }
    }

    /// Switch the shared timeframe; every widget recomputes on its next
    /// frame.
    pub fn select_granularity(&mut self, granularity: Granularity) {
        self.selection.select(granularity);
    }

    pub fn widget_mut(&mut self, kind: ChartKind) -> &mut ChartWidget {
        self.widgets
            .iter_mut()
            .find(|w| w.kind == kind)
            .expect("one widget per chart kind")
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new("data.json".to_string())
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            eprintln!("Failed to acquire app lock in update");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loaded_widget(selection: &SelectionState) -> ChartWidget {
        let mut widget = ChartWidget::new(ChartKind::Line);
        widget.on_data_loaded(
            vec![
                RawRecord::new("2024-01-01", 1.0),
                RawRecord::new("2024-01-02", 2.0),
                RawRecord::new("2024-02-01", 4.0),
            ],
            selection,
        );
        widget
    }

    #[test]
    fn test_data_load_runs_first_aggregation() {
        let selection = SelectionState::default();
        let widget = loaded_widget(&selection);
        assert_eq!(widget.buckets.len(), 3);
        assert!(widget.plot_dirty);
        assert!(!widget.is_loading);
    }

    #[test]
    fn test_selection_change_triggers_recompute() {
        let mut selection = SelectionState::default();
        let mut widget = loaded_widget(&selection);

        selection.select(Granularity::Monthly);
        widget.sync(&selection);
        assert_eq!(widget.buckets.len(), 2);
        assert_eq!(widget.buckets[0].label, "January 2024");
        assert_eq!(widget.buckets[0].total, 3.0);
    }

    #[test]
    fn test_reselecting_same_granularity_is_idempotent() {
        let mut selection = SelectionState::default();
        let mut widget = loaded_widget(&selection);

        selection.select(Granularity::Weekly);
        widget.sync(&selection);
        let first = widget.buckets.clone();

        selection.select(Granularity::Weekly);
        widget.sync(&selection);
        assert_eq!(widget.buckets, first);
    }

    #[test]
    fn test_sync_without_change_does_not_recompute() {
        let selection = SelectionState::default();
        let mut widget = loaded_widget(&selection);
        widget.plot_dirty = false;

        widget.sync(&selection);
        assert!(!widget.plot_dirty);
    }

    #[test]
    fn test_failed_load_leaves_widget_empty() {
        let selection = SelectionState::default();
        let mut widget = ChartWidget::new(ChartKind::Pie);
        widget.on_load_failed("connection refused".to_string(), &selection);
        assert!(widget.buckets.is_empty());
        assert_eq!(widget.error_message.as_deref(), Some("connection refused"));
        assert!(!widget.is_loading);
    }

    #[test]
    fn test_bucket_at_fraction_maps_click_position() {
        let selection = SelectionState::default();
        let widget = loaded_widget(&selection);
        assert_eq!(
            widget.bucket_at_fraction(0.0),
            Some(("2024-01-01".to_string(), 1.0))
        );
        assert_eq!(
            widget.bucket_at_fraction(0.99),
            Some(("2024-02-01".to_string(), 4.0))
        );
    }

    #[test]
    fn test_click_on_empty_widget_reports_nothing() {
        let widget = ChartWidget::new(ChartKind::Scatter);
        assert_eq!(widget.bucket_at_fraction(0.5), None);
    }
}
