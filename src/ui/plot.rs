use eframe::egui::{Color32, Ui, Visuals};
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, PlotPoints, PlotUi};

use crate::data::analysis::{
    Analysis, DIFF_REF_LABEL, DIFF_REF_P_LABEL, DIFF_SIG_LABEL, DIFF_SIG_P_LABEL, LOG_LABEL,
};
use crate::data::channel::Channel;
use crate::data::parser::XySeries;
use crate::state::AppState;

/// Log values within ±this band count as balanced.
pub const LOG_THRESHOLD: f64 = 0.01;

pub const PREVIEW_HEIGHT: f32 = 80.0;

const X_AXIS_LABEL: &str = "DARK_ref column 1 (x)";

/// Colour of the main result lines: black on a light background, the
/// theme's text colour on a dark one.
pub fn primary_line_color(visuals: &Visuals) -> Color32 {
    if visuals.dark_mode {
        visuals.text_color()
    } else {
        Color32::BLACK
    }
}

// ---------------------------------------------------------------------------
// Gap handling
// ---------------------------------------------------------------------------

/// Split points into runs of finite values. NaN / infinite samples become
/// gaps between the runs.
pub fn finite_segments(points: &[[f64; 2]]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for &p in points {
        if p[0].is_finite() && p[1].is_finite() {
            current.push(p);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Draw one logical series; every segment shares the name so the legend
/// shows a single entry.
fn add_series(plot_ui: &mut PlotUi, name: &str, points: &[[f64; 2]], color: Color32, style: LineStyle) {
    for segment in finite_segments(points) {
        let line = Line::new(PlotPoints::from(segment))
            .name(name)
            .color(color)
            .style(style)
            .width(1.5);
        plot_ui.line(line);
    }
}

// ---------------------------------------------------------------------------
// Channel preview (side panel)
// ---------------------------------------------------------------------------

/// Small axis-less chart of one channel's raw (x, y) data.
pub fn preview_plot(ui: &mut Ui, channel: Channel, series: &XySeries, color: Color32) {
    Plot::new(("preview", channel.name()))
        .height(PREVIEW_HEIGHT)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            add_series(plot_ui, channel.name(), &series.points(), color, LineStyle::Solid);
        });
}

// ---------------------------------------------------------------------------
// Analysis charts (central panel)
// ---------------------------------------------------------------------------

/// Render the log-ratio chart above the two difference charts.
pub fn analysis_plots(ui: &mut Ui, state: &AppState) {
    let analysis = match &state.analysis {
        Some(a) => a,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Enter channel data, then press Plot");
            });
            return;
        }
    };

    let primary = primary_line_color(ui.visuals());
    let secondary = Color32::GRAY;
    let height = (ui.available_height() - 3.0 * ui.spacing().item_spacing.y).max(300.0);

    ui.strong("LOG result");
    Plot::new("log_plot")
        .height(height * 0.5)
        .legend(Legend::default())
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label("LOG value")
        .show(ui, |plot_ui| {
            add_series(
                plot_ui,
                LOG_LABEL,
                &analysis.points(&analysis.result.log_values),
                primary,
                LineStyle::Solid,
            );
            for y in [LOG_THRESHOLD, -LOG_THRESHOLD] {
                plot_ui.hline(
                    HLine::new(y)
                        .color(Color32::RED)
                        .style(LineStyle::dashed_dense()),
                );
            }
        });

    ui.strong("ref and ref_p");
    diff_plot(
        ui,
        "ref_diff_plot",
        height * 0.25,
        analysis,
        [
            (DIFF_REF_LABEL, &analysis.result.diff_ref, primary, LineStyle::Solid),
            (DIFF_REF_P_LABEL, &analysis.result.diff_ref_p, secondary, LineStyle::dashed_loose()),
        ],
    );

    ui.strong("sig and sig_p");
    diff_plot(
        ui,
        "sig_diff_plot",
        height * 0.25,
        analysis,
        [
            (DIFF_SIG_LABEL, &analysis.result.diff_sig, primary, LineStyle::Solid),
            (DIFF_SIG_P_LABEL, &analysis.result.diff_sig_p, secondary, LineStyle::dashed_loose()),
        ],
    );
}

fn diff_plot(
    ui: &mut Ui,
    id: &str,
    height: f32,
    analysis: &Analysis,
    series: [(&str, &Vec<f64>, Color32, LineStyle); 2],
) {
    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label("Difference")
        .show(ui, |plot_ui| {
            for (name, values, color, style) in series {
                add_series(plot_ui, name, &analysis.points(values), color, style);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_finite_values() {
        let pts = [
            [0.0, 1.0],
            [1.0, f64::NAN],
            [2.0, 2.0],
            [3.0, 3.0],
            [4.0, f64::NEG_INFINITY],
        ];
        assert_eq!(
            finite_segments(&pts),
            vec![vec![[0.0, 1.0]], vec![[2.0, 2.0], [3.0, 3.0]]]
        );
    }

    #[test]
    fn result_lines_are_black_on_light_theme() {
        assert_eq!(primary_line_color(&Visuals::light()), Color32::BLACK);
        let dark = Visuals::dark();
        assert_eq!(primary_line_color(&dark), dark.text_color());
        assert_ne!(primary_line_color(&dark), Color32::BLACK);
    }

    #[test]
    fn all_gaps_give_no_segments() {
        assert!(finite_segments(&[[0.0, f64::NAN], [1.0, f64::NAN]]).is_empty());
        assert!(finite_segments(&[]).is_empty());
    }
}
