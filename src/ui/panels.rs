use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use crate::data::channel::Channel;
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Left side panel – channel editors with live previews
// ---------------------------------------------------------------------------

/// Render the channel editors: dark channels first, then measurements.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Dark");
            ui.separator();
            for channel in Channel::ALL.into_iter().filter(|c| c.is_dark()) {
                channel_editor(ui, state, channel);
            }

            ui.add_space(8.0);
            ui.heading("Measurement");
            ui.separator();
            for channel in Channel::ALL.into_iter().filter(|c| !c.is_dark()) {
                channel_editor(ui, state, channel);
            }
        });
}

fn channel_editor(ui: &mut Ui, state: &mut AppState, channel: Channel) {
    ui.strong(format!("Data {channel}:"));
    ui.horizontal(|ui: &mut Ui| {
        let editor = TextEdit::multiline(state.channels.get_mut(channel))
            .font(egui::TextStyle::Monospace)
            .desired_rows(4)
            .desired_width(ui.available_width() * 0.5);
        if ui.add(editor).changed() {
            state.refresh_preview(channel);
        }

        ui.vertical(|ui: &mut Ui| match state.previews.get(&channel) {
            Some(Ok(series)) if !series.is_empty() => {
                plot::preview_plot(ui, channel, series, state.colors.color_for(channel));
                ui.weak(format!("{} rows", series.len()));
            }
            Some(Ok(_)) | None => {
                ui.weak("no data");
            }
            Some(Err(e)) => {
                ui.label(RichText::new(e.to_string()).color(Color32::RED));
            }
        });
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("Plot").clicked() {
            state.run_analysis();
        }
        if ui.button("Save…").clicked() {
            save_file_dialog(state);
        }
        if ui.button("Load…").clicked() {
            open_file_dialog(state);
        }

        ui.separator();

        let can_export = state.analysis.as_ref().is_some_and(|a| !a.is_empty());
        if ui
            .add_enabled(can_export, egui::Button::new("Export CSV…"))
            .clicked()
        {
            export_file_dialog(state);
        }

        if let Some(a) = &state.analysis {
            ui.separator();
            ui.label(format!("{} samples", a.result.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save channel data")
        .add_filter("JSON", &["json"])
        .add_filter("All files", &["*"])
        .save_file();

    if let Some(path) = file {
        state.save_document(&path);
    }
}

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load channel data")
        .add_filter("JSON", &["json"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load_document(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export results")
        .add_filter("CSV", &["csv"])
        .set_file_name("results.csv")
        .save_file();

    if let Some(path) = file {
        state.export_csv(&path);
    }
}
