use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TitanicExplorerApp {
    pub state: AppState,
}

impl TitanicExplorerApp {
    /// Start with `path` already loaded (errors end up in the status bar).
    pub fn with_file(path: &std::path::Path) -> Self {
        let mut app = Self::default();
        panels::load_into(&mut app.state, path);
        app
    }
}

impl eframe::App for TitanicExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: chart selector + values ----
        egui::SidePanel::left("chart_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::chart_panel(ui, &self.state);
        });
    }
}
