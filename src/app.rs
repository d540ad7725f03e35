use std::path::Path;

use eframe::egui;

use crate::data::loader;
use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ArtboardApp {
    pub state: AppState,
}

impl Default for ArtboardApp {
    fn default() -> Self {
        let mut state = AppState::default();

        // Startup convenience: pick up the default dataset if it is present
        // in the working directory, through the load-once accessor.
        let default_path = Path::new(loader::DEFAULT_DATASET);
        if default_path.exists() {
            match loader::shared_table(default_path) {
                Ok(table) => {
                    log::info!(
                        "Loaded {} with {} artists",
                        loader::DEFAULT_DATASET,
                        table.len()
                    );
                    state.set_dataset(table);
                }
                Err(e) => {
                    log::error!("Failed to load {}: {e:#}", loader::DEFAULT_DATASET);
                    state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }

        Self { state }
    }
}

impl eframe::App for ArtboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &self.state);
        });
    }
}
