use eframe::egui::{self, Align2, Color32, Key, RichText, Ui};

use crate::analysis::detail::{CorrelationDetail, PEARSON_FORMULA, STRENGTH_GUIDE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Detail window for the clicked cell
// ---------------------------------------------------------------------------

/// Show the detail window while a cell is selected. Closing it (button,
/// Escape or the window's close box) only clears the selection.
pub fn detail_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(selection) = &state.selection else {
        return;
    };
    let detail = selection.detail();

    let mut open = true;
    let mut close_clicked = false;

    egui::Window::new("Correlation Analysis")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            detail_body(ui, &detail);
            ui.separator();
            close_clicked = ui.button("Close").clicked();
        });

    let escape = ctx.input(|i| i.key_pressed(Key::Escape));
    if !open || close_clicked || escape {
        state.clear_selection();
    }
}

fn badge_color(detail: &CorrelationDetail) -> Color32 {
    let [r, g, b] = detail.magnitude.rgb();
    Color32::from_rgb(r, g, b)
}

fn detail_body(ui: &mut Ui, detail: &CorrelationDetail) {
    ui.heading("Variables");
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&detail.row);
        ui.label("↔");
        ui.strong(&detail.col);
    });
    ui.add_space(6.0);

    ui.heading("Correlation Value");
    let color = badge_color(detail);
    ui.label(RichText::new(format!("{:.4}", detail.value)).size(28.0).color(color));
    ui.label(RichText::new(detail.headline()).strong().color(color));
    ui.add_space(6.0);

    ui.heading("Interpretation");
    ui.label(detail.interpretation());
    ui.label(detail.trend());
    ui.add_space(6.0);

    ui.heading("Calculation Method");
    ui.label("The correlation coefficient was calculated using Pearson's correlation formula:");
    ui.monospace(PEARSON_FORMULA);
    ui.label(
        "This measures the linear relationship strength between the two variables on a scale from -1 to +1.",
    );
    ui.add_space(6.0);

    ui.heading("Strength Guide");
    egui::Grid::new("strength_guide")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for band in &STRENGTH_GUIDE {
                let [r, g, b] = band.magnitude.rgb();
                let text = RichText::new(band.range).color(Color32::from_rgb(r, g, b));
                if band.magnitude == detail.magnitude {
                    ui.label(text.strong());
                } else {
                    ui.label(text);
                }
                ui.label(band.description);
                ui.end_row();
            }
        });
}
