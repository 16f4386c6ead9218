use egui::{Color32, Context, RichText};
use image::ImageReader;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::state::App;
use crate::data::load_records;
use crate::plotting::{export_chart, generate_plot_async};
use crate::types::{ChartKind, Granularity};

const ACTIVE_BUTTON_FILL: Color32 = Color32::from_rgb(69, 163, 245);
const INACTIVE_BUTTON_FILL: Color32 = Color32::from_rgb(230, 235, 231);

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    // Kick off the one-time per-widget fetches on the first frame.
    if !app.fetch_started {
        app.fetch_started = true;
        spawn_fetches(app, app_arc.clone(), ctx.clone());
    }

    egui::TopBottomPanel::top("timeframe_bar").show(ctx, |ui| {
        ui.heading("Chart Analysis");
        ui.horizontal(|ui| {
            let current = app.selection.current();
            for granularity in Granularity::ALL {
                let fill = if granularity == current {
                    ACTIVE_BUTTON_FILL
                } else {
                    INACTIVE_BUTTON_FILL
                };
                let button = egui::Button::new(
                    RichText::new(granularity.button_label()).color(Color32::BLACK),
                )
                .fill(fill);
                if ui.add(button).clicked() {
                    app.select_granularity(granularity);
                }
            }
        });
        if let Some(status) = app.status.clone() {
            ui.label(status);
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in ChartKind::ALL.chunks(2) {
                ui.columns(row.len(), |columns| {
                    for (column, &kind) in columns.iter_mut().zip(row) {
                        draw_chart_panel(app, column, ctx, kind, app_arc.clone());
                    }
                });
            }
        });
    });

    // Blocking informational popup for chart clicks, dismissed with OK.
    let mut dismissed = false;
    if let Some(message) = app.alert.clone() {
        egui::Window::new("Chart")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
    }
    if dismissed {
        app.alert = None;
    }
}

/// One chart panel: heading, plot image, export button.
fn draw_chart_panel(
    app: &mut App,
    ui: &mut egui::Ui,
    ctx: &Context,
    kind: ChartKind,
    app_arc: Arc<Mutex<App>>,
) {
    let selection = app.selection.clone();
    let mut clicked_bucket: Option<(String, f64)> = None;
    let mut export_status: Option<String> = None;

    ui.group(|ui| {
        ui.heading(kind.title());

        let widget = app.widget_mut(kind);
        widget.sync(&selection);

        if widget.is_loading {
            ui.label("Loading data...");
            ui.spinner();
            return;
        }

        if let Some(error) = &widget.error_message {
            ui.colored_label(Color32::LIGHT_RED, format!("Error fetching data: {}", error));
        }

        // Re-render the plot off the UI thread when the buckets changed.
        if widget.plot_dirty && !widget.is_rendering {
            widget.plot_dirty = false;
            widget.is_rendering = true;
            let buckets = widget.buckets.clone();
            let granularity = selection.current();
            let task_arc = app_arc.clone();
            let task_ctx = ctx.clone();
            tokio::spawn(async move {
                match generate_plot_async(kind, granularity, buckets).await {
                    Ok(png) => {
                        let mut app = task_arc.lock().unwrap();
                        let widget = app.widget_mut(kind);
                        widget.plot_png = Some(png);
                        widget.texture_dirty = true;
                        widget.is_rendering = false;
                    }
                    Err(e) => {
                        eprintln!("Plotting error: {}", e);
                        task_arc.lock().unwrap().widget_mut(kind).is_rendering = false;
                    }
                }
                task_ctx.request_repaint();
            });
        }

        if widget.texture_dirty {
            load_plot_texture(widget, ctx);
        }

        if let Some(texture) = &widget.plot_texture {
            let response = ui.add(
                egui::Image::new(texture)
                    .max_width(ui.available_width())
                    .sense(egui::Sense::click()),
            );
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let rect = response.rect;
                    let frac = (pos.x - rect.left()) / rect.width();
                    clicked_bucket = widget.bucket_at_fraction(frac);
                }
            }
        }

        if ui.button("Export as PNG").clicked() {
            match export_chart(kind, &widget.buckets, Path::new(".")) {
                Ok(path) => {
                    export_status = Some(format!("Exported {}", path.display()));
                }
                Err(e) => {
                    eprintln!("Export error: {}", e);
                    export_status = Some(format!("Export failed: {}", e));
                }
            }
        }
    });

    if let Some((name, value)) = clicked_bucket {
        app.alert = Some(format!("Clicked: {} - {}", name, value));
    }
    if let Some(status) = export_status {
        app.status = Some(status);
    }
}

/// Spawn one fetch per chart widget; each widget owns its fetched copy.
fn spawn_fetches(app: &App, app_arc: Arc<Mutex<App>>, ctx: Context) {
    for kind in ChartKind::ALL {
        let source = app.data_source.clone();
        let task_arc = app_arc.clone();
        let task_ctx = ctx.clone();
        tokio::spawn(async move {
            let result = load_records(&source).await;
            let mut app = task_arc.lock().unwrap();
            let selection = app.selection.clone();
            match result {
                Ok(records) => app.widget_mut(kind).on_data_loaded(records, &selection),
                Err(e) => {
                    eprintln!("Error fetching data: {}", e);
                    app.widget_mut(kind).on_load_failed(e.to_string(), &selection);
                }
            }
            task_ctx.request_repaint();
        });
    }
}

fn load_plot_texture(widget: &mut super::state::ChartWidget, ctx: &Context) {
    let Some(png) = widget.plot_png.as_deref() else {
        return;
    };
    match ImageReader::new(Cursor::new(png))
        .with_guessed_format()
        .map_err(|e| e.to_string())
        .and_then(|r| r.decode().map_err(|e| e.to_string()))
    {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let pixels = image.to_rgba8();
            let pixels = pixels.as_flat_samples();
            let texture = ctx.load_texture(
                format!("{}_plot", widget.kind.title()),
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
                egui::TextureOptions::LINEAR,
            );
            widget.plot_texture = Some(texture);
            widget.texture_dirty = false;
        }
        Err(e) => {
            eprintln!("Failed to load plot image: {}", e);
            widget.texture_dirty = false;
        }
    }
}
