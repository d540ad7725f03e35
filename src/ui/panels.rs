use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::SortKey;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone bounds and the country list so query edits below don't fight
    // the dataset borrow.
    let countries = dataset.countries.clone();
    let (rank_lo, rank_hi) = dataset.rank_bounds;
    let (ca_lo, ca_hi) = dataset.ca_bounds;

    let mut changed = false;
    let mut reset = false;

    {
        let Some(query) = state.query.as_mut() else {
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                // ---- Country ----
                ui.strong("Country");
                let selected = query
                    .country
                    .clone()
                    .unwrap_or_else(|| "All countries".to_string());
                egui::ComboBox::from_id_salt("country_filter")
                    .selected_text(selected)
                    .show_ui(ui, |ui: &mut Ui| {
                        if ui
                            .selectable_label(query.country.is_none(), "All countries")
                            .clicked()
                        {
                            query.country = None;
                            changed = true;
                        }
                        for country in &countries {
                            let is_selected = query.country.as_deref() == Some(country.as_str());
                            if ui.selectable_label(is_selected, country).clicked() {
                                query.country = Some(country.clone());
                                changed = true;
                            }
                        }
                    });
                ui.separator();

                // ---- Rank range ----
                ui.strong("Rank");
                ui.horizontal(|ui: &mut Ui| {
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut query.rank_min)
                                .range(rank_lo..=rank_hi)
                                .prefix("min "),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut query.rank_max)
                                .range(rank_lo..=rank_hi)
                                .prefix("max "),
                        )
                        .changed();
                });
                ui.separator();

                // ---- Revenue range ----
                ui.strong("Revenue");
                let speed = ((ca_hi - ca_lo) / 200.0).max(1.0);
                ui.horizontal(|ui: &mut Ui| {
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut query.ca_min)
                                .range(ca_lo..=ca_hi)
                                .speed(speed)
                                .prefix("min $"),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut query.ca_max)
                                .range(ca_lo..=ca_hi)
                                .speed(speed)
                                .prefix("max $"),
                        )
                        .changed();
                });
                ui.separator();

                // ---- Ordering ----
                ui.strong("Sort by");
                egui::ComboBox::from_id_salt("sort_key")
                    .selected_text(query.sort_key.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for key in [SortKey::Revenue, SortKey::Rank] {
                            if ui
                                .selectable_label(query.sort_key == key, key.label())
                                .clicked()
                            {
                                query.sort_key = key;
                                changed = true;
                            }
                        }
                    });
                ui.separator();

                // ---- Row limit ----
                ui.strong("Rows");
                changed |= ui
                    .add(egui::DragValue::new(&mut query.limit).range(1..=500))
                    .changed();
                ui.add_space(8.0);

                if ui.button("Reset filters").clicked() {
                    reset = true;
                }
            });
    }

    if reset {
        state.reset_filters();
    } else if changed {
        state.requery();
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
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} artists loaded, {} in leaderboard",
                ds.len(),
                state.leaderboard.len()
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
        .set_title("Open artists dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_table(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} artists across {} countries",
                    table.len(),
                    table.countries.len()
                );
                state.set_dataset(Arc::new(table));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
