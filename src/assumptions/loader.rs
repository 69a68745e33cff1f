//! CSV-based survival table loader
//!
//! Reads already-parsed survival expectancy tables from `male.csv` and
//! `female.csv` in a directory, each with an `age,expectancy` header.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use super::SurvivalSource;
use crate::contributor::Gender;
use crate::error::LoadError;

/// Default path to the survival table directory
pub const DEFAULT_SURVIVAL_PATH: &str = "data/survival";

/// Parse field `index` of `record`; a missing field is reported as empty
fn parse_column<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    column: &'static str,
) -> Result<T, LoadError> {
    let value = record.get(index).unwrap_or_default();
    value
        .trim()
        .parse()
        .map_err(|_| LoadError::Parse { column, value: value.to_string() })
}

/// Load an age -> expectancy mapping from any CSV reader
pub fn load_survival_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<HashMap<u32, f64>, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut table = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let age: u32 = parse_column(&record, 0, "age")?;
        let expectancy: f64 = parse_column(&record, 1, "expectancy")?;
        table.insert(age, expectancy);
    }

    Ok(table)
}

/// Survival tables stored as CSV files in one directory
#[derive(Debug, Clone)]
pub struct CsvSurvivalSource {
    dir: PathBuf,
}

impl CsvSurvivalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_location() -> Self {
        Self::new(DEFAULT_SURVIVAL_PATH)
    }

    /// File holding the table for `gender`
    pub fn path_for(&self, gender: Gender) -> PathBuf {
        self.dir.join(format!("{}.csv", gender.as_str()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SurvivalSource for CsvSurvivalSource {
    fn load(&self, gender: Gender) -> Result<HashMap<u32, f64>, LoadError> {
        let file = File::open(self.path_for(gender))?;
        load_survival_from_reader(file)
    }
}
