use std::collections::{BTreeMap, HashMap};

use super::countries::CountryMap;
use super::model::{ArtistRecord, ArtistTable};

// ---------------------------------------------------------------------------
// DashboardMetrics – the metric-card bundle
// ---------------------------------------------------------------------------

/// Summary statistics for the metric cards. Pure function of the table,
/// recomputed on demand; callers may cache.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    /// Distinct `artist_id` count.
    pub distinct_artists: usize,
    /// Mean revenue over non-missing values.
    pub mean_revenue: Option<f64>,
    /// Most frequent medium. Ties resolve to the lexicographically lowest
    /// label, so the result is deterministic.
    pub top_medium: Option<String>,
    /// Top five countries by row frequency, descending; ties keep the
    /// first-seen order of the table.
    pub top_countries: Vec<(String, usize)>,
    /// Mean sale rank.
    pub mean_rank: Option<f64>,
    /// Descriptive statistics of `year_birth` over non-missing values.
    pub birth_years: Option<Describe>,
}

/// Count / mean / sample std / min / quartiles / max of a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Compute the full metric bundle for the dashboard cards.
pub fn compute(table: &ArtistTable) -> DashboardMetrics {
    let records = &table.records;
    DashboardMetrics {
        distinct_artists: distinct_artists(records),
        mean_revenue: mean(records.iter().map(|r| r.ca).filter(|v| !v.is_nan())),
        top_medium: mode_medium(records),
        top_countries: top_countries(records, 5),
        mean_rank: mean(records.iter().map(|r| r.rank as f64)),
        birth_years: describe(
            records
                .iter()
                .filter_map(|r| r.year_birth)
                .map(f64::from)
                .collect(),
        ),
    }
}

/// Number of distinct `artist_id` values.
pub fn distinct_artists(records: &[ArtistRecord]) -> usize {
    let mut seen: Vec<i64> = records.iter().map(|r| r.artist_id).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Most frequent `main_medium`. Rows with an empty medium are excluded.
/// Ties break to the lexicographically lowest label.
pub fn mode_medium(records: &[ArtistRecord]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in records {
        if !rec.main_medium.is_empty() {
            *counts.entry(rec.main_medium.as_str()).or_default() += 1;
        }
    }
    let best = counts.values().copied().max()?;
    // BTreeMap iterates in key order, so the first hit is the tie-break.
    counts
        .iter()
        .find(|(_, &n)| n == best)
        .map(|(medium, _)| medium.to_string())
}

/// Top `n` countries by row frequency, descending count, ties broken by
/// first-seen order in the table. Empty country cells are excluded.
pub fn top_countries(records: &[ArtistRecord], n: usize) -> Vec<(String, usize)> {
    ranked_counts(records.iter().map(|r| r.main_country.as_str()), n)
}

/// Per-country artist counts keyed by canonical English name, for the map
/// view. Source names sharing a canonical name are merged; unmapped names
/// keep their original label (the hover-label fallback).
pub fn canonical_country_counts(table: &ArtistTable, map: &CountryMap) -> Vec<(String, usize)> {
    ranked_counts(
        table
            .records
            .iter()
            .map(|r| map.normalize(r.main_country.as_str())),
        usize::MAX,
    )
}

fn ranked_counts<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.enumerate() {
        if value.is_empty() {
            continue;
        }
        let entry = counts.entry(value).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(value, count, _)| (value.to_string(), count))
        .collect()
}

/// Arithmetic mean, `None` for an empty sequence.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (mut sum, mut count) = (0.0, 0usize);
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Descriptive statistics of `values`, `None` when empty.
///
/// Std is the sample standard deviation (N−1 denominator); quartiles use
/// linear interpolation between order statistics. With a single value the
/// std is NaN, matching the usual describe semantics.
pub fn describe(mut values: Vec<f64>) -> Option<Describe> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Some(Describe {
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    })
}

/// Linear-interpolation quantile of an ascending-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Default bin width for the birth-year histogram.
pub const BIRTH_YEAR_BIN: i32 = 5;

/// Bin non-missing birth years into fixed-width bins aligned to multiples of
/// `bin_years`. Returns `(bin_start, count)` ascending, zero-count bins
/// included so the chart has a contiguous axis.
pub fn birth_year_histogram(table: &ArtistTable, bin_years: i32) -> Vec<(i32, usize)> {
    debug_assert!(bin_years > 0);
    let years: Vec<i32> = table.records.iter().filter_map(|r| r.year_birth).collect();
    let (Some(&min), Some(&max)) = (years.iter().min(), years.iter().max()) else {
        return Vec::new();
    };

    let first = min.div_euclid(bin_years) * bin_years;
    let last = max.div_euclid(bin_years) * bin_years;
    let n_bins = ((last - first) / bin_years + 1) as usize;

    let mut bins = vec![0usize; n_bins];
    for year in years {
        let slot = ((year.div_euclid(bin_years) * bin_years - first) / bin_years) as usize;
        bins[slot] += 1;
    }

    bins.into_iter()
        .enumerate()
        .map(|(i, count)| (first + i as i32 * bin_years, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ArtistRecord;

    fn rec(id: i64, country: &str, medium: &str, rank: i64, ca: f64, year: Option<i32>) -> ArtistRecord {
        ArtistRecord {
            artist_id: id,
            artist_name: format!("artist-{id}"),
            main_country: country.to_string(),
            main_medium: medium.to_string(),
            rank,
            ca,
            year_birth: year,
        }
    }

    #[test]
    fn distinct_artists_dedups_ids() {
        let records = vec![
            rec(1, "France", "peinture", 1, 10.0, None),
            rec(1, "France", "peinture", 2, 20.0, None),
            rec(2, "Espagne", "sculpture", 3, 30.0, None),
        ];
        assert_eq!(distinct_artists(&records), 2);
    }

    #[test]
    fn mode_ties_break_lexicographically() {
        let records = vec![
            rec(1, "France", "print", 1, 1.0, None),
            rec(2, "France", "print", 2, 1.0, None),
            rec(3, "France", "oil", 3, 1.0, None),
            rec(4, "France", "oil", 4, 1.0, None),
        ];
        assert_eq!(mode_medium(&records), Some("oil".to_string()));
    }

    #[test]
    fn top_countries_orders_by_count_then_first_seen() {
        let records = vec![
            rec(1, "Espagne", "oil", 1, 1.0, None),
            rec(2, "France", "oil", 2, 1.0, None),
            rec(3, "France", "oil", 3, 1.0, None),
            rec(4, "Italie", "oil", 4, 1.0, None),
            rec(5, "Japon", "oil", 5, 1.0, None),
        ];
        // France wins on count; Espagne/Italie/Japon tie at 1 and keep
        // their first appearance order.
        let top = top_countries(&records, 3);
        assert_eq!(
            top,
            vec![
                ("France".to_string(), 2),
                ("Espagne".to_string(), 1),
                ("Italie".to_string(), 1),
            ]
        );
    }

    #[test]
    fn canonical_counts_merge_on_english_names() {
        let map = crate::data::countries::CountryMap::builtin();
        let table = crate::data::model::ArtistTable::from_records(vec![
            rec(1, "Allemagne", "oil", 1, 1.0, None),
            rec(2, "Allemagne", "oil", 2, 1.0, None),
            rec(3, "Atlantis", "oil", 3, 1.0, None),
        ]);
        let counts = canonical_country_counts(&table, &map);
        assert_eq!(
            counts,
            vec![("Germany".to_string(), 2), ("Atlantis".to_string(), 1)]
        );
    }

    #[test]
    fn describe_matches_known_values() {
        let d = describe(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(d.count, 4);
        assert!((d.mean - 2.5).abs() < 1e-12);
        assert!((d.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(d.min, 1.0);
        assert!((d.q25 - 1.75).abs() < 1e-12);
        assert!((d.median - 2.5).abs() < 1e-12);
        assert!((d.q75 - 3.25).abs() < 1e-12);
        assert_eq!(d.max, 4.0);
    }

    #[test]
    fn describe_of_nothing_is_none() {
        assert!(describe(Vec::new()).is_none());
    }

    #[test]
    fn missing_years_are_excluded() {
        let table = crate::data::model::ArtistTable::from_records(vec![
            rec(1, "France", "oil", 1, 1.0, Some(1950)),
            rec(2, "France", "oil", 2, 1.0, None),
            rec(3, "France", "oil", 3, 1.0, Some(1960)),
        ]);
        let metrics = compute(&table);
        let stats = metrics.birth_years.unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.mean - 1955.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_bins_align_and_fill_gaps() {
        let table = crate::data::model::ArtistTable::from_records(vec![
            rec(1, "France", "oil", 1, 1.0, Some(1901)),
            rec(2, "France", "oil", 2, 1.0, Some(1904)),
            rec(3, "France", "oil", 3, 1.0, Some(1923)),
            rec(4, "France", "oil", 4, 1.0, None),
        ]);
        let bins = birth_year_histogram(&table, 10);
        assert_eq!(bins, vec![(1900, 2), (1910, 0), (1920, 1)]);
    }

    #[test]
    fn mean_revenue_over_empty_table_is_none() {
        let table = crate::data::model::ArtistTable::from_records(Vec::new());
        let metrics = compute(&table);
        assert!(metrics.mean_revenue.is_none());
        assert!(metrics.mean_rank.is_none());
        assert!(metrics.top_medium.is_none());
        assert_eq!(metrics.distinct_artists, 0);
    }
}
