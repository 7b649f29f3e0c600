use std::path::PathBuf;

use crate::analysis::CorrelationAnalysis;
use crate::analysis::ranking::{SelectionView, display_size_options};
use crate::config::EngineConfig;
use crate::interaction::{CellSelection, LegendFill, TooltipState};
use crate::loading::LoadJob;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: EngineConfig,

    /// Result of the last successful load (None until one completes).
    pub analysis: Option<CorrelationAnalysis>,

    /// Load in flight, if any.
    pub job: Option<LoadJob>,

    /// How many of the selected features the grid shows.
    pub display_size: usize,

    /// Hovered cell text and cursor position.
    pub tooltip: Option<TooltipState>,

    /// Clicked cell driving the detail window.
    pub selection: Option<CellSelection>,

    /// Legend entrance animation, plays once per app instance.
    pub legend: LegendFill,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        let display_size = config.default_display_size();
        Self {
            config,
            analysis: None,
            job: None,
            display_size,
            tooltip: None,
            selection: None,
            legend: LegendFill::default(),
            status_message: None,
        }
    }

    // -- loading --

    /// Start a background load. Any load still running is abandoned and its
    /// result will never be applied.
    pub fn start_load<F>(&mut self, path: PathBuf, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(old) = self.job.take() {
            log::debug!("Abandoning load of {}", old.path.display());
        }
        log::info!("Loading {}", path.display());
        self.analysis = None;
        self.tooltip = None;
        self.selection = None;
        self.status_message = None;
        self.job = Some(LoadJob::spawn(path, self.config.clone(), notify));
    }

    pub fn is_loading(&self) -> bool {
        self.job.is_some()
    }

    /// Apply a finished load. Returns `true` when state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(result) = self.job.as_ref().and_then(LoadJob::poll) else {
            return false;
        };
        let job = self.job.take();

        match result {
            Ok(analysis) => self.set_analysis(analysis),
            Err(e) => {
                let path = job.map(|j| j.path.display().to_string()).unwrap_or_default();
                log::error!("Failed to load {path}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
        true
    }

    /// Ingest a finished analysis and reset the display size to fit it.
    pub fn set_analysis(&mut self, analysis: CorrelationAnalysis) {
        let options = display_size_options(&self.config.display_sizes, analysis.selection.len());
        let wanted = self.config.default_display_size();
        self.display_size = options
            .iter()
            .copied()
            .filter(|&s| s <= wanted)
            .max()
            .or_else(|| options.first().copied())
            .unwrap_or(0);

        self.status_message = analysis.issue.as_ref().map(|e| format!("No chart: {e}"));
        self.tooltip = None;
        self.selection = None;
        self.analysis = Some(analysis);
    }

    // -- display size --

    pub fn display_options(&self) -> Vec<usize> {
        let selected = self.analysis.as_ref().map_or(0, |a| a.selection.len());
        display_size_options(&self.config.display_sizes, selected)
    }

    /// Re-slice the grid. Never recomputes correlations.
    pub fn set_display_size(&mut self, n: usize) {
        if n == self.display_size || !self.display_options().contains(&n) {
            return;
        }
        self.display_size = n;
        self.tooltip = None;
        self.legend.settle();
    }

    /// The square block currently shown, `None` when there is no grid.
    pub fn current_view(&self) -> Option<SelectionView<'_>> {
        let analysis = self.analysis.as_ref()?;
        let view = analysis.selection.view(self.display_size);
        (!view.is_empty()).then_some(view)
    }

    // -- pointer interaction --

    pub fn hover_cell(&mut self, row: usize, col: usize, pointer: eframe::egui::Pos2) {
        self.tooltip = self
            .current_view()
            .filter(|v| row < v.len() && col < v.len())
            .map(|v| TooltipState::for_cell(v.label(row), v.label(col), v.value(row, col), pointer));
    }

    pub fn clear_hover(&mut self) {
        self.tooltip = None;
    }

    pub fn select_cell(&mut self, row: usize, col: usize) {
        let Some(view) = self.current_view() else {
            return;
        };
        if row >= view.len() || col >= view.len() {
            return;
        }
        let selection = CellSelection {
            row: view.label(row).to_string(),
            col: view.label(col).to_string(),
            value: view.value(row, col),
        };
        log::debug!("Selected {} × {}", selection.row, selection.col);
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}
