//! Application state and egui UI.

mod state;
pub mod ui;

pub use state::{App, AppWrapper, ChartWidget, SelectionState};
