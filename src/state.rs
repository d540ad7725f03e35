use std::sync::Arc;

use crate::color::CountScale;
use crate::data::countries::CountryMap;
use crate::data::filter::{leaderboard, LeaderboardQuery, LeaderboardRow};
use crate::data::metrics::{self, DashboardMetrics, BIRTH_YEAR_BIN};
use crate::data::model::ArtistTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The loaded table is immutable; everything below it (metrics, map counts,
/// histogram, leaderboard) is a derived view recomputed from parameters.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<ArtistTable>>,

    /// Country-name normalization table, loaded once at startup.
    pub countries: CountryMap,

    /// Leaderboard parameters (None until a dataset provides bounds).
    pub query: Option<LeaderboardQuery>,

    /// Leaderboard rows for the current query (cached).
    pub leaderboard: Vec<LeaderboardRow>,

    /// Metric-card bundle for the current dataset (cached).
    pub metrics: Option<DashboardMetrics>,

    /// Artist counts by canonical country name, for the map view.
    pub map_counts: Vec<(String, usize)>,

    /// Colour scale over `map_counts`.
    pub count_scale: Option<CountScale>,

    /// Birth-year histogram bins.
    pub histogram: Vec<(i32, usize)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            countries: CountryMap::load(),
            query: None,
            leaderboard: Vec::new(),
            metrics: None,
            map_counts: Vec::new(),
            count_scale: None,
            histogram: Vec::new(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: derive metrics and chart data once,
    /// reset the query to span the table's bounds, and fill the leaderboard.
    pub fn set_dataset(&mut self, table: Arc<ArtistTable>) {
        self.metrics = Some(metrics::compute(&table));
        self.map_counts = metrics::canonical_country_counts(&table, &self.countries);
        self.count_scale = CountScale::new(&self.map_counts);
        self.histogram = metrics::birth_year_histogram(&table, BIRTH_YEAR_BIN);
        self.query = Some(LeaderboardQuery::spanning(&table));

        self.dataset = Some(table);
        self.status_message = None;
        self.loading = false;
        self.requery();
    }

    /// Recompute the leaderboard after a parameter change. Parameters are
    /// clamped to the table bounds first, so the pipeline's range check
    /// cannot trip from UI input.
    pub fn requery(&mut self) {
        let (Some(table), Some(query)) = (&self.dataset, &mut self.query) else {
            return;
        };
        clamp_query(query, table);

        match leaderboard(table, query) {
            Ok(rows) => self.leaderboard = rows,
            Err(err) => {
                log::warn!("Leaderboard query rejected: {err}");
                self.status_message = Some(format!("Error: {err}"));
                self.leaderboard.clear();
            }
        }
    }

    /// Reset all filters to span the loaded table.
    pub fn reset_filters(&mut self) {
        if let Some(table) = &self.dataset {
            self.query = Some(LeaderboardQuery::spanning(table));
            self.requery();
        }
    }
}

/// Clamp query parameters into the table's bounds and repair inverted
/// ranges, keeping min ≤ max as the pipeline requires.
fn clamp_query(query: &mut LeaderboardQuery, table: &ArtistTable) {
    let (rank_lo, rank_hi) = table.rank_bounds;
    query.rank_min = query.rank_min.clamp(rank_lo, rank_hi);
    query.rank_max = query.rank_max.clamp(rank_lo, rank_hi);
    if query.rank_min > query.rank_max {
        std::mem::swap(&mut query.rank_min, &mut query.rank_max);
    }

    let (ca_lo, ca_hi) = table.ca_bounds;
    query.ca_min = query.ca_min.clamp(ca_lo, ca_hi);
    query.ca_max = query.ca_max.clamp(ca_lo, ca_hi);
    if query.ca_min > query.ca_max {
        std::mem::swap(&mut query.ca_min, &mut query.ca_max);
    }

    query.limit = query.limit.max(1);
}
