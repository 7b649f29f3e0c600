use std::path::PathBuf;

use eframe::egui;

use crate::config::EngineConfig;
use crate::state::AppState;
use crate::ui::{detail, grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CorrScopeApp {
    pub state: AppState,
}

impl CorrScopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: EngineConfig, data: Option<PathBuf>) -> Self {
        // Labels and the neutral colour are tuned for a light background.
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut state = AppState::new(config);
        if let Some(path) = data {
            let ctx = cc.egui_ctx.clone();
            state.start_load(path, move || ctx.request_repaint());
        }
        Self { state }
    }
}

impl eframe::App for CorrScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: display size + ranking ----
        egui::SidePanel::left("feature_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: heatmap ----
        egui::CentralPanel::default().show(ctx, |ui| {
            grid::correlation_grid(ui, &mut self.state);
        });

        // ---- Detail window for the clicked cell ----
        detail::detail_window(ctx, &mut self.state);
    }
}
