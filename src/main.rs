//! Time-Series Chart Dashboard
//!
//! A GUI application that fetches a JSON time-series feed and renders it
//! through four chart widgets with a shared Day/Week/Month selector.
//!
//! Usage: `chartdash [feed]` where `feed` is a URL or file path
//! (default `data.json`). Pass `--write-sample` to generate a demo
//! `data.json` first.

use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

use chartdash::app::{App, AppWrapper};

fn main() {
    let mut source = "data.json".to_string();
    for arg in std::env::args().skip(1) {
        if arg == "--write-sample" {
            if let Err(e) = chartdash::data::sample::write_sample_feed("data.json", 180) {
                eprintln!("Failed to write sample feed: {}", e);
                return;
            }
        } else {
            source = arg;
        }
    }

    // Initialize the Tokio runtime
    let rt = Runtime::new().expect("failed to start tokio runtime");
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title("Chart Analysis"),
            ..Default::default()
        };

        if let Err(e) = eframe::run_native(
            "Chart Analysis",
            options,
            Box::new(move |_cc| {
                let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::new(source)));
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        ) {
            eprintln!("Error running application: {}", e);
        }
    });
}
