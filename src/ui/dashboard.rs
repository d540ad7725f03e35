use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Plot};
use egui_extras::{Column, TableBuilder};

use crate::data::metrics::BIRTH_YEAR_BIN;
use crate::state::AppState;

/// How many countries the bar chart shows before cutting off the tail.
const MAX_COUNTRY_BARS: usize = 12;

// ---------------------------------------------------------------------------
// Central panel – metric cards, charts, leaderboard
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view the dashboard  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metric_cards(ui, state);
            ui.add_space(12.0);

            ui.heading("Artists by country");
            country_chart(ui, state);
            ui.add_space(12.0);

            ui.heading("Birth years");
            birth_histogram(ui, state);
            ui.add_space(12.0);

            ui.heading("Leaderboard");
            leaderboard_table(ui, state);
        });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn metric_cards(ui: &mut Ui, state: &AppState) {
    let Some(metrics) = &state.metrics else {
        return;
    };

    let dash = "–".to_string();
    let top_country = metrics
        .top_countries
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| dash.clone());
    let mean_birth_year = metrics
        .birth_years
        .as_ref()
        .map(|stats| format!("{:.0}", stats.mean))
        .unwrap_or_else(|| dash.clone());

    let cards: [(&str, String); 6] = [
        ("Artists", format_count(metrics.distinct_artists)),
        (
            "Average revenue",
            metrics
                .mean_revenue
                .map(format_money)
                .unwrap_or_else(|| dash.clone()),
        ),
        (
            "Top medium",
            metrics.top_medium.clone().unwrap_or_else(|| dash.clone()),
        ),
        (
            "Average rank",
            metrics
                .mean_rank
                .map(|r| format!("{r:.2}"))
                .unwrap_or_else(|| dash.clone()),
        ),
        ("Average birth year", mean_birth_year),
        ("Top country", top_country),
    ];

    for row in cards.chunks(3) {
        ui.columns(row.len(), |cols| {
            for (col, (title, value)) in cols.iter_mut().zip(row) {
                metric_card(col, title, value);
            }
        });
        ui.add_space(4.0);
    }
}

fn metric_card(ui: &mut Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).small().weak());
            ui.label(RichText::new(value).heading());
        });
}

// ---------------------------------------------------------------------------
// Country chart
// ---------------------------------------------------------------------------

/// Artist counts by canonical country name, coloured by the sequential
/// count scale. Countries past the cutoff are still in `state.map_counts`,
/// only the chart truncates.
fn country_chart(ui: &mut Ui, state: &AppState) {
    let shown = &state.map_counts[..state.map_counts.len().min(MAX_COUNTRY_BARS)];
    if shown.is_empty() {
        ui.label("No country data.");
        return;
    }

    let bars: Vec<Bar> = shown
        .iter()
        .enumerate()
        .map(|(i, (country, count))| {
            let color = state
                .count_scale
                .as_ref()
                .map(|scale| scale.color_for(*count))
                .unwrap_or(egui::Color32::LIGHT_BLUE);
            Bar::new(i as f64, *count as f64)
                .width(0.7)
                .fill(color)
                .name(country)
        })
        .collect();

    let labels: Vec<String> = shown.iter().map(|(country, _)| country.clone()).collect();

    Plot::new("country_chart")
        .height(220.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_axis_label("Artists")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Birth-year histogram
// ---------------------------------------------------------------------------

fn birth_histogram(ui: &mut Ui, state: &AppState) {
    if state.histogram.is_empty() {
        ui.label("No birth-year data.");
        return;
    }

    let bin = f64::from(BIRTH_YEAR_BIN);
    let bars: Vec<Bar> = state
        .histogram
        .iter()
        .map(|(start, count)| {
            Bar::new(f64::from(*start) + bin / 2.0, *count as f64)
                .width(bin * 0.9)
                .name(format!("{start}–{}", start + BIRTH_YEAR_BIN - 1))
        })
        .collect();

    Plot::new("birth_histogram")
        .height(200.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Year of birth")
        .y_axis_label("Artists")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Leaderboard table
// ---------------------------------------------------------------------------

fn leaderboard_table(ui: &mut Ui, state: &AppState) {
    if state.leaderboard.is_empty() {
        ui.label("No artists match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Artist");
            });
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong("Rank");
            });
            header.col(|ui| {
                ui.strong("Revenue");
            });
        })
        .body(|mut body| {
            for row in &state.leaderboard {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.artist_name);
                    });
                    table_row.col(|ui| {
                        ui.label(&row.main_country);
                    });
                    table_row.col(|ui| {
                        ui.label(row.rank.to_string());
                    });
                    table_row.col(|ui| {
                        ui.label(format_money(row.ca));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

fn format_count(n: usize) -> String {
    group_thousands(&n.to_string())
}

fn format_money(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
