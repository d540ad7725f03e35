use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::{bail, Context, Result};

use super::model::{ArtistRecord, ArtistTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Dataset file the app looks for in the working directory on startup.
pub const DEFAULT_DATASET: &str = "artists.csv";

/// Columns the CSV must carry. Extra columns are ignored; the schema is
/// fixed, not self-describing.
const REQUIRED_COLUMNS: [&str; 7] = [
    "artist_id",
    "artist_name",
    "main_country",
    "main_medium",
    "rank",
    "ca",
    "year_birth",
];

/// Parse the artists CSV at `path` into an [`ArtistTable`].
///
/// Any missing required column or unparseable cell aborts the load with an
/// error naming the offending column or row; there is no partial load.
/// `year_birth` cells may be empty.
pub fn load_table(path: &Path) -> Result<ArtistTable> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<ArtistRecord>().enumerate() {
        let record: ArtistRecord = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    if records.is_empty() {
        log::warn!("{} parsed but contains no rows", path.display());
    }

    Ok(ArtistTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Process-wide memoized load
// ---------------------------------------------------------------------------

static SHARED: OnceLock<Arc<ArtistTable>> = OnceLock::new();

/// Load-once accessor for the startup dataset.
///
/// The first successful load is cached for the process lifetime; subsequent
/// calls return the same immutable table, which is safe to share across
/// readers. A failed load is not cached, so a fixed-up file can be retried.
pub fn shared_table(path: &Path) -> Result<Arc<ArtistTable>> {
    if let Some(table) = SHARED.get() {
        return Ok(Arc::clone(table));
    }
    let table = Arc::new(load_table(path)?);
    Ok(Arc::clone(SHARED.get_or_init(|| table)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "artist_id,artist_name,main_country,main_medium,rank,ca,year_birth";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        write!(file, "{body}").unwrap();
        file
    }

    #[test]
    fn loads_well_formed_rows() {
        let file = write_csv("11,Alice,France,peinture,2,1500.5,1951\n12,Bob,Espagne,sculpture,1,900.0,\n");
        let table = load_table(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        let alice = &table.records[0];
        assert_eq!(alice.artist_id, 11);
        assert_eq!(alice.artist_name, "Alice");
        assert_eq!(alice.main_country, "France");
        assert_eq!(alice.rank, 2);
        assert_eq!(alice.ca, 1500.5);
        assert_eq!(alice.year_birth, Some(1951));
        assert_eq!(table.records[1].year_birth, None);
    }

    #[test]
    fn missing_column_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "artist_id,artist_name,main_country,rank,ca,year_birth").unwrap();
        writeln!(file, "1,Alice,France,2,10.0,1950").unwrap();

        let err = load_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("main_medium"));
    }

    #[test]
    fn unparseable_cell_is_fatal() {
        let file = write_csv("1,Alice,France,peinture,not-a-rank,10.0,1950\n");
        let err = load_table(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("row 0"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER},notes").unwrap();
        writeln!(file, "1,Alice,France,peinture,2,10.0,1950,remark").unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_table(Path::new("/nonexistent/artists.csv")).is_err());
    }

    #[test]
    fn shared_table_returns_the_same_instance() {
        let file = write_csv("1,Alice,France,peinture,2,10.0,1950\n");
        let first = shared_table(file.path()).unwrap();
        let second = shared_table(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
