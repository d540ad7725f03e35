use std::collections::BTreeSet;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// ArtistRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single artist (one row of the source CSV).
///
/// `artist_id` is the grouping key for the distinct-count metric; the raw
/// file may repeat it across rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRecord {
    pub artist_id: i64,
    pub artist_name: String,
    /// Free-text country name in the source locale (French).
    pub main_country: String,
    pub main_medium: String,
    /// Sale rank, lower = better. Ties allowed.
    pub rank: i64,
    /// Revenue figure ("chiffre d'affaires"), non-negative.
    pub ca: f64,
    /// Birth year, may be missing in the source data.
    pub year_birth: Option<i32>,
}

// ---------------------------------------------------------------------------
// ArtistTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table, immutable after load, with bounds derived at load
/// time. Downstream views (metrics, leaderboard) are read-only projections.
#[derive(Debug, Clone)]
pub struct ArtistTable {
    /// All artists (rows), in file order.
    pub records: Vec<ArtistRecord>,
    /// Sorted unique `main_country` values, for the filter dropdown.
    pub countries: Vec<String>,
    /// Inclusive min/max of `rank` actually present in the table.
    pub rank_bounds: (i64, i64),
    /// Inclusive min/max of `ca` actually present in the table.
    pub ca_bounds: (f64, f64),
}

impl ArtistTable {
    /// Build the table and its filter bounds from loaded records.
    pub fn from_records(records: Vec<ArtistRecord>) -> Self {
        let mut countries: BTreeSet<String> = BTreeSet::new();
        let mut rank_bounds = (i64::MAX, i64::MIN);
        let mut ca_bounds = (f64::INFINITY, f64::NEG_INFINITY);

        for rec in &records {
            if !rec.main_country.is_empty() {
                countries.insert(rec.main_country.clone());
            }
            rank_bounds.0 = rank_bounds.0.min(rec.rank);
            rank_bounds.1 = rank_bounds.1.max(rec.rank);
            ca_bounds.0 = ca_bounds.0.min(rec.ca);
            ca_bounds.1 = ca_bounds.1.max(rec.ca);
        }

        if records.is_empty() {
            rank_bounds = (0, 0);
            ca_bounds = (0.0, 0.0);
        }

        ArtistTable {
            records,
            countries: countries.into_iter().collect(),
            rank_bounds,
            ca_bounds,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: i64,
        name: &str,
        country: &str,
        medium: &str,
        rank: i64,
        ca: f64,
        year_birth: Option<i32>,
    ) -> ArtistRecord {
        ArtistRecord {
            artist_id: id,
            artist_name: name.to_string(),
            main_country: country.to_string(),
            main_medium: medium.to_string(),
            rank,
            ca,
            year_birth,
        }
    }

    #[test]
    fn bounds_and_countries_derived_from_rows() {
        let table = ArtistTable::from_records(vec![
            record(1, "A", "France", "peinture", 3, 120.0, Some(1950)),
            record(2, "B", "Espagne", "sculpture", 1, 80.5, None),
            record(3, "C", "France", "peinture", 7, 310.0, Some(1962)),
        ]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.countries, vec!["Espagne", "France"]);
        assert_eq!(table.rank_bounds, (1, 7));
        assert_eq!(table.ca_bounds, (80.5, 310.0));
    }

    #[test]
    fn empty_table_has_zero_bounds() {
        let table = ArtistTable::from_records(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.rank_bounds, (0, 0));
        assert_eq!(table.ca_bounds, (0.0, 0.0));
    }
}
