//! Player statistics table loaded from the VNL CSV export.
//!
//! Only the columns the infographic reads are deserialized; every other
//! column in the export (player name, serve, set, dig, receive, ...) is
//! ignored by the header-based reader.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One row of the player statistics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Age in years; the export writes whole numbers but any numeric
    /// value such as `25.0` is accepted
    #[serde(rename = "Age")]
    pub age: f64,
    /// Three letter country code, e.g. "FRA"
    #[serde(rename = "Country")]
    pub country: String,
    /// Court position code, e.g. "OH", "L", "S"
    #[serde(rename = "Position")]
    pub position: String,
    /// Attack score
    #[serde(rename = "Attack")]
    pub attack: f64,
    /// Block score
    #[serde(rename = "Block")]
    pub block: f64,
}

impl PlayerRecord {
    /// Creates a record from its five statistics
    pub fn new(
        age: impl Into<f64>,
        country: impl Into<String>,
        position: impl Into<String>,
        attack: f64,
        block: f64,
    ) -> Self {
        Self {
            age: age.into(),
            country: country.into(),
            position: position.into(),
            attack,
            block,
        }
    }
}

/// Immutable, ordered collection of player records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<PlayerRecord>,
}

impl Table {
    /// Wraps already parsed records, preserving their order
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        Self { records }
    }

    /// Reads the CSV file at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening player statistics at {}", path.display());

        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;

        info!(
            rows = table.len(),
            "Loaded player statistics from {}",
            path.display()
        );
        Ok(table)
    }

    /// Reads CSV data with a header row from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let records = reader
            .deserialize::<PlayerRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in file order
    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    /// Iterates rows in file order
    pub fn iter(&self) -> std::slice::Iter<'_, PlayerRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a PlayerRecord;
    type IntoIter = std::slice::Iter<'a, PlayerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VnlError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Player,Country,Age,Attack,Block,Serve,Set,Dig,Receive,Position
Ishikawa Yuki,JPN,27,13.25,0.75,1.25,0.25,3.75,3.25,OH
Ngapeth Earvin,FRA,32,10.33,0.67,1.17,0.33,4.67,2.67,OH
Yamamoto Tomohiro,JPN,21,0.0,0.0,0.0,0.0,6.83,6.58,L
";

    #[test]
    fn test_from_reader_reads_required_columns() {
        let table = Table::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.records()[0],
            PlayerRecord::new(27, "JPN", "OH", 13.25, 0.75)
        );
        assert_eq!(table.records()[2].position, "L");
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = Table::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.iter().filter(|r| r.country == "JPN").count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Table::from_path("/nonexistent/VNL2023.csv");
        assert!(matches!(result, Err(VnlError::Io(_))));
    }

    #[test]
    fn test_missing_column_is_data_error() {
        let data = "Country,Age,Attack,Position\nFRA,25,10.0,OH\n";
        let result = Table::from_reader(data.as_bytes());
        assert!(matches!(result, Err(VnlError::Data { .. })));
    }

    #[test]
    fn test_non_numeric_score_reports_row() {
        let data = "Country,Age,Attack,Block,Position\nFRA,25,10.0,1.0,OH\nJPN,22,abc,2.0,S\n";
        match Table::from_reader(data.as_bytes()) {
            Err(VnlError::Data { row, .. }) => assert_eq!(row, Some(3)),
            other => panic!("expected data error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let data = "Country,Age,Attack,Block,Position\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
