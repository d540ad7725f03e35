use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// CountryMap – locale country name → canonical English name
// ---------------------------------------------------------------------------

/// Embedded copy of the mapping asset, so the binary works without files
/// next to it. An edited `assets/countries.json` on disk takes precedence.
const BUILTIN_ASSET: &str = include_str!("../../assets/countries.json");

/// Default on-disk location of the editable mapping asset.
pub const ASSET_PATH: &str = "assets/countries.json";

/// Static lookup table translating the dataset's French country names to the
/// canonical English names the map view expects.
///
/// The mapping is data, not code: it lives in a flat JSON object
/// (`{"Allemagne": "Germany", ...}`) and can be extended without touching
/// the pipeline. Names without an entry pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct CountryMap {
    mapping: BTreeMap<String, String>,
}

impl CountryMap {
    /// Load the mapping from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading country map {}", path.display()))?;
        let mapping: BTreeMap<String, String> =
            serde_json::from_str(&text).context("parsing country map JSON")?;
        Ok(CountryMap { mapping })
    }

    /// Load the on-disk asset if present, else the embedded copy.
    pub fn load() -> Self {
        match Self::from_path(Path::new(ASSET_PATH)) {
            Ok(map) => {
                log::info!("Loaded country map with {} entries from {ASSET_PATH}", map.len());
                map
            }
            Err(err) => {
                log::debug!("Using embedded country map ({err:#})");
                Self::builtin()
            }
        }
    }

    /// The compiled-in mapping.
    pub fn builtin() -> Self {
        let mapping = serde_json::from_str(BUILTIN_ASSET).unwrap_or_else(|err| {
            log::error!("Embedded country map is invalid JSON: {err}");
            BTreeMap::new()
        });
        CountryMap { mapping }
    }

    /// Canonical English name for `name`, or `name` itself when unmapped.
    /// Unknown inputs are a defined fallback, never an error.
    pub fn normalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.mapping.get(name).map(String::as_str).unwrap_or(name)
    }

    /// All canonical names in the mapping's value set.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.mapping.values().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
