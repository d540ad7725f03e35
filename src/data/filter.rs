use thiserror::Error;

use super::model::{ArtistRecord, ArtistTable};

// ---------------------------------------------------------------------------
// Leaderboard query parameters
// ---------------------------------------------------------------------------

/// Which column orders the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Descending by `ca`.
    Revenue,
    /// Ascending by `rank`.
    Rank,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Revenue => "Revenue",
            SortKey::Rank => "Rank",
        }
    }
}

/// Conjunction of filters plus ordering and truncation for the leaderboard.
/// Range ends are inclusive on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardQuery {
    /// Exact-match country filter; `None` means all countries.
    pub country: Option<String>,
    pub rank_min: i64,
    pub rank_max: i64,
    pub ca_min: f64,
    pub ca_max: f64,
    pub sort_key: SortKey,
    pub limit: usize,
}

impl LeaderboardQuery {
    /// Default limit for a fresh query.
    pub const DEFAULT_LIMIT: usize = 50;

    /// A query spanning the table's full rank and revenue ranges.
    pub fn spanning(table: &ArtistTable) -> Self {
        LeaderboardQuery {
            country: None,
            rank_min: table.rank_bounds.0,
            rank_max: table.rank_bounds.1,
            ca_min: table.ca_bounds.0,
            ca_max: table.ca_bounds.1,
            sort_key: SortKey::Revenue,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// A projected leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub artist_name: String,
    pub main_country: String,
    pub rank: i64,
    pub ca: f64,
}

/// A filter range whose minimum exceeds its maximum.
///
/// The UI clamps its range controls, so the app never issues an inverted
/// range; the pipeline still signals one explicitly instead of returning an
/// empty result.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field} range: min {min} is greater than max {max}")]
pub struct InvalidRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// The pipeline
// ---------------------------------------------------------------------------

/// Filter, sort, and truncate the table into leaderboard rows.
///
/// Keeps rows matching the country filter exactly (case-sensitive) and lying
/// inside both inclusive ranges, stable-sorts by the chosen key (ties keep
/// table order), truncates to `limit`, and projects the display columns.
/// The source table is never mutated.
pub fn leaderboard(
    table: &ArtistTable,
    query: &LeaderboardQuery,
) -> Result<Vec<LeaderboardRow>, InvalidRange> {
    if query.rank_min > query.rank_max {
        return Err(InvalidRange {
            field: "rank",
            min: query.rank_min as f64,
            max: query.rank_max as f64,
        });
    }
    if query.ca_min > query.ca_max {
        return Err(InvalidRange {
            field: "revenue",
            min: query.ca_min,
            max: query.ca_max,
        });
    }

    let mut rows: Vec<&ArtistRecord> = table
        .records
        .iter()
        .filter(|rec| match &query.country {
            Some(country) => rec.main_country == *country,
            None => true,
        })
        .filter(|rec| query.rank_min <= rec.rank && rec.rank <= query.rank_max)
        .filter(|rec| query.ca_min <= rec.ca && rec.ca <= query.ca_max)
        .collect();

    // Vec::sort_by is stable, so equal keys preserve table order.
    match query.sort_key {
        SortKey::Revenue => rows.sort_by(|a, b| b.ca.total_cmp(&a.ca)),
        SortKey::Rank => rows.sort_by(|a, b| a.rank.cmp(&b.rank)),
    }
    rows.truncate(query.limit);

    Ok(rows
        .into_iter()
        .map(|rec| LeaderboardRow {
            artist_name: rec.artist_name.clone(),
            main_country: rec.main_country.clone(),
            rank: rec.rank,
            ca: rec.ca,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ArtistRecord, ArtistTable};

    fn rec(id: i64, name: &str, country: &str, rank: i64, ca: f64) -> ArtistRecord {
        ArtistRecord {
            artist_id: id,
            artist_name: name.to_string(),
            main_country: country.to_string(),
            main_medium: "peinture".to_string(),
            rank,
            ca,
            year_birth: None,
        }
    }

    fn sample_table() -> ArtistTable {
        ArtistTable::from_records(vec![
            rec(1, "A", "France", 1, 100.0),
            rec(2, "B", "France", 2, 50.0),
            rec(3, "C", "Spain", 1, 200.0),
        ])
    }

    fn query(table: &ArtistTable) -> LeaderboardQuery {
        LeaderboardQuery::spanning(table)
    }

    #[test]
    fn country_and_range_filters_with_revenue_sort() {
        let table = sample_table();
        let q = LeaderboardQuery {
            country: Some("France".to_string()),
            rank_min: 1,
            rank_max: 2,
            ca_min: 0.0,
            ca_max: 1000.0,
            sort_key: SortKey::Revenue,
            limit: 10,
        };

        let rows = leaderboard(&table, &q).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].artist_name, "A");
        assert_eq!(rows[0].ca, 100.0);
        assert_eq!(rows[1].artist_name, "B");
        assert_eq!(rows[1].ca, 50.0);
    }

    #[test]
    fn rank_sort_is_ascending_and_stable() {
        let table = sample_table();
        let mut q = query(&table);
        q.sort_key = SortKey::Rank;

        let rows = leaderboard(&table, &q).unwrap();
        let ranks: Vec<i64> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 1, 2]);
        // A and C share rank 1; A comes first in the table and stays first.
        assert_eq!(rows[0].artist_name, "A");
        assert_eq!(rows[1].artist_name, "C");
    }

    #[test]
    fn revenue_sort_is_non_increasing() {
        let table = sample_table();
        let rows = leaderboard(&table, &query(&table)).unwrap();
        assert!(rows.windows(2).all(|w| w[0].ca >= w[1].ca));
    }

    #[test]
    fn limit_truncates_after_sort() {
        let table = sample_table();
        let mut q = query(&table);
        q.limit = 1;

        let rows = leaderboard(&table, &q).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].artist_name, "C");
    }

    #[test]
    fn inclusive_range_bounds() {
        let table = sample_table();
        let mut q = query(&table);
        q.ca_min = 50.0;
        q.ca_max = 100.0;

        let rows = leaderboard(&table, &q).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.artist_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let table = sample_table();

        let mut q = query(&table);
        q.rank_min = 5;
        q.rank_max = 2;
        let err = leaderboard(&table, &q).unwrap_err();
        assert_eq!(err.field, "rank");

        let mut q = query(&table);
        q.ca_min = 10.0;
        q.ca_max = 1.0;
        let err = leaderboard(&table, &q).unwrap_err();
        assert_eq!(err.field, "revenue");
    }

    #[test]
    fn identical_parameters_are_idempotent() {
        let table = sample_table();
        let q = query(&table);
        assert_eq!(
            leaderboard(&table, &q).unwrap(),
            leaderboard(&table, &q).unwrap()
        );
    }

    #[test]
    fn narrowing_a_range_never_grows_the_result() {
        let table = sample_table();
        let wide = query(&table);
        let baseline = leaderboard(&table, &wide).unwrap().len();

        for (rank_min, rank_max, ca_min, ca_max) in
            [(1, 1, 0.0, 1000.0), (1, 2, 60.0, 1000.0), (2, 2, 0.0, 60.0)]
        {
            let mut q = wide.clone();
            q.rank_min = rank_min;
            q.rank_max = rank_max;
            q.ca_min = ca_min;
            q.ca_max = ca_max;
            assert!(leaderboard(&table, &q).unwrap().len() <= baseline);
        }
    }

    #[test]
    fn output_rows_come_from_the_table() {
        let table = sample_table();
        let rows = leaderboard(&table, &query(&table)).unwrap();
        assert!(rows.len() <= table.len());
        for row in &rows {
            assert!(table
                .records
                .iter()
                .any(|rec| rec.artist_name == row.artist_name
                    && rec.main_country == row.main_country
                    && rec.rank == row.rank
                    && rec.ca == row.ca));
        }
    }
}
