use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart_plot(ui: &mut Ui, state: &AppState) {
    let Some((chart, colors)) = &state.current else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a results file to view charts  (File → Open…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
        if chart.is_empty() {
            ui.label(RichText::new("No matching measurements").weak());
        }
    });

    // One plot id per chart so each keeps its own zoom.
    Plot::new(("results_plot", state.selected))
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series.points.iter().copied().collect();

                let line = Line::new(points)
                    .name(&series.label)
                    .color(colors.color_for(&series.label))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
