#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static TLC taxi zone directory.
//!
//! Maps a stable integer zone id to the zone's name, borough, and centroid
//! coordinates. The table ships embedded in the binary (the high-volume
//! zones of the official TLC lookup table); a full replacement table can be
//! loaded from a CSV file at startup.
//!
//! Not every zone id that appears in a dataset has an entry here — lookups
//! returning `None` are an expected outcome, not an error.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Embedded centroid table, `id,name,borough,latitude,longitude`.
const EMBEDDED_ZONES_CSV: &str = include_str!("../data/taxi_zones.csv");

/// A single taxi zone: TLC id, display names, and centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Stable TLC zone id.
    pub id: u16,
    /// Zone name (e.g. "Midtown Center").
    pub name: String,
    /// Borough name (e.g. "Manhattan").
    pub borough: String,
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
}

/// Errors that can occur while loading a zone table.
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error reading a zone table file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table parsed but contained no rows.
    #[error("Zone table contains no rows")]
    Empty,
}

/// Preloaded id -> [`ZoneRecord`] lookup.
///
/// Constructed once by the application shell and passed by reference to
/// everything that needs to resolve zone positions.
#[derive(Debug, Clone)]
pub struct ZoneDirectory {
    zones: BTreeMap<u16, ZoneRecord>,
}

impl ZoneDirectory {
    /// Loads the zone table embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError`] if the embedded CSV fails to parse. This only
    /// happens if the shipped table is corrupt.
    pub fn embedded() -> Result<Self, ZoneError> {
        Self::from_reader(EMBEDDED_ZONES_CSV.as_bytes())
    }

    /// Loads a replacement zone table from a CSV file with the header
    /// `id,name,borough,latitude,longitude`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError`] if the file cannot be read, fails to parse,
    /// or contains no rows.
    pub fn from_csv_path(path: &Path) -> Result<Self, ZoneError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    fn from_reader<R: Read>(reader: R) -> Result<Self, ZoneError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut zones = BTreeMap::new();
        for result in csv_reader.deserialize() {
            let record: ZoneRecord = result?;
            zones.insert(record.id, record);
        }

        if zones.is_empty() {
            return Err(ZoneError::Empty);
        }

        Ok(Self { zones })
    }

    /// Looks up a zone by id. `None` means the id has no entry in the
    /// table, which is expected for ids outside the shipped coverage.
    #[must_use]
    pub fn get(&self, id: u16) -> Option<&ZoneRecord> {
        self.zones.get(&id)
    }

    /// Number of zones in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the table is empty. Never true for a constructed directory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Iterates over all zones in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ZoneRecord> {
        self.zones.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let directory = ZoneDirectory::embedded().unwrap();
        assert!(directory.len() > 50);
    }

    #[test]
    fn looks_up_known_zone() {
        let directory = ZoneDirectory::embedded().unwrap();
        let zone = directory.get(161).unwrap();
        assert_eq!(zone.name, "Midtown Center");
        assert_eq!(zone.borough, "Manhattan");
        assert!((zone.latitude - 40.7549).abs() < 1e-6);
    }

    #[test]
    fn missing_zone_is_none() {
        let directory = ZoneDirectory::embedded().unwrap();
        assert!(directory.get(999).is_none());
    }

    #[test]
    fn parses_custom_table() {
        let csv = "id,name,borough,latitude,longitude\n\
                   5,Arden Heights,Staten Island,40.5560,-74.1827\n";
        let directory = ZoneDirectory::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get(5).unwrap().borough, "Staten Island");
    }

    #[test]
    fn rejects_empty_table() {
        let csv = "id,name,borough,latitude,longitude\n";
        assert!(matches!(
            ZoneDirectory::from_reader(csv.as_bytes()),
            Err(ZoneError::Empty)
        ));
    }

    #[test]
    fn rejects_malformed_row() {
        let csv = "id,name,borough,latitude,longitude\nnot-a-number,X,Y,1.0,2.0\n";
        assert!(matches!(
            ZoneDirectory::from_reader(csv.as_bytes()),
            Err(ZoneError::Csv(_))
        ));
    }
}
