use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::export::export_matrix;
use crate::analysis::ranking::display_label;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – display size and feature ranking
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Correlations");
    ui.separator();

    let Some(analysis) = &state.analysis else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label(format!(
        "{} rows · {} numeric · {} excluded",
        analysis.row_count,
        analysis.numeric_count(),
        analysis.excluded_count()
    ));

    let rejected: Vec<(String, f64)> = analysis
        .rejected()
        .map(|c| (c.name.clone(), c.coverage))
        .collect();
    let ranking = analysis.ranking.clone();
    let selected = analysis.selection.len();
    ui.add_space(6.0);

    // ---- Display size ----
    let options = state.display_options();
    if !options.is_empty() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Top features:");
            let mut chosen = state.display_size;
            egui::ComboBox::from_id_salt("display_size")
                .selected_text(chosen.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for n in &options {
                        ui.selectable_value(&mut chosen, *n, n.to_string());
                    }
                });
            state.set_display_size(chosen);
        });
        ui.label(RichText::new("Hover cells to see correlation value").small().weak());
        ui.separator();
    }

    // ---- Feature ranking ----
    ui.strong("Mean |r| ranking");
    ui.push_id("ranking_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(320.0)
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::auto())
            .header(18.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Feature");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Score");
                });
            })
            .body(|mut body| {
                for (rank, feature) in ranking.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        let shown = rank < state.display_size;
                        let kept = rank < selected;
                        let style = |text: String| {
                            let t = RichText::new(text);
                            if shown {
                                t.strong()
                            } else if kept {
                                t
                            } else {
                                t.weak()
                            }
                        };
                        row.col(|ui: &mut Ui| {
                            ui.label(style(format!("{}", rank + 1)));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(style(display_label(&feature.name)))
                                .on_hover_text(&feature.name);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(style(format!("{:.3}", feature.score)));
                        });
                    });
                }
            });
    });

    // ---- Columns below the coverage threshold ----
    if !rejected.is_empty() {
        ui.separator();
        egui::CollapsingHeader::new(format!("Non-numeric columns ({})", rejected.len()))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ScrollArea::vertical().max_height(200.0).show(ui, |ui: &mut Ui| {
                    for (name, coverage) in &rejected {
                        ui.label(format!("{name}  ({:.0}% numeric)", coverage * 100.0));
                    }
                });
            });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            let can_export = state.analysis.as_ref().is_some_and(|a| a.has_grid());
            if ui
                .add_enabled(can_export, egui::Button::new("Export top-K matrix…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(job) = &state.job {
            ui.spinner();
            ui.label(format!("Loading {}…", job.path.display()));
        } else if let Some(a) = &state.analysis {
            if let Some(src) = &a.source {
                ui.label(src.display().to_string());
            }
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

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        let ctx = ctx.clone();
        state.start_load(path, move || ctx.request_repaint());
    }
}

fn save_file_dialog(state: &mut AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export correlation matrix")
        .set_file_name(format!("correlation_matrix_top{}.csv", analysis.selection.len()))
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };
    match export_matrix(&analysis.selection, &path) {
        Ok(()) => {
            log::info!("Exported {} features to {}", analysis.selection.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export matrix: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
