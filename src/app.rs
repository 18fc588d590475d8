use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DarkRatioApp {
    pub state: AppState,
}

impl eframe::App for DarkRatioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: channel editors ----
        egui::SidePanel::left("channel_panel")
            .default_width(420.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: analysis charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::analysis_plots(ui, &self.state);
        });
    }
}
