use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart list
// ---------------------------------------------------------------------------

/// Render the left chart panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No results loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let types = table.array_types().to_vec();
    let plan = state.plan.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, kind) in plan.iter().enumerate() {
                let is_selected = idx == state.selected;
                if ui
                    .selectable_label(is_selected, kind.to_string())
                    .clicked()
                {
                    state.select(idx);
                }

                // Type picker under the selected chart.
                let Some(current_type) = kind.array_type().filter(|_| is_selected) else {
                    continue;
                };
                ui.indent(("type_picker", idx), |ui: &mut Ui| {
                    egui::ComboBox::from_id_salt(("array_type", idx))
                        .selected_text(current_type)
                        .show_ui(ui, |ui: &mut Ui| {
                            for t in &types {
                                if ui.selectable_label(current_type == t, t).clicked() {
                                    state.set_chart_type(idx, t);
                                }
                            }
                        });
                    if !types.iter().any(|t| t == current_type) {
                        ui.label(
                            RichText::new(format!("'{current_type}' not in this file"))
                                .color(Color32::YELLOW),
                        );
                    }
                });
            }

            ui.separator();
            ui.strong("Algorithms");
            if let Some(table) = &state.table {
                for algorithm in table.algorithms() {
                    ui.label(algorithm);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(source)) = (&state.table, &state.source) {
            ui.label(format!(
                "{} measurements from {}",
                table.len(),
                source.display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open benchmark results")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // Failures are logged and shown in the status bar by `load_path`.
        let _ = state.load_path(&path);
    }
}
