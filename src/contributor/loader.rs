//! Load contributors and their monthly contributions from CSV
//!
//! One row per contribution month:
//! `ContributorId,BirthDate,Gender,Month,Salary`. `BirthDate` may be left
//! empty; `Month` is either `YYYY-MM` or a full `YYYY-MM-DD` date. Rows of the
//! same contributor must appear in chronological order.

use std::collections::HashMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::Reader;

use super::{Contributor, ContributorId};
use crate::assumptions::SurvivalTables;
use crate::error::LoadError;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ContributorId")]
    contributor_id: u64,
    #[serde(rename = "BirthDate")]
    birth_date: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Salary")]
    salary: f64,
}

/// Rows of one contributor, in file order
struct PendingContributor {
    id: ContributorId,
    birth_date: Option<NaiveDate>,
    gender: String,

    /// Year of the first row, which fixes the rule
    start_year: i32,
    contributions: Vec<(NaiveDate, f64)>,
}

impl PendingContributor {
    fn build(self, tables: &SurvivalTables) -> Result<Contributor, LoadError> {
        let mut contributor = Contributor::from_label(
            self.id,
            self.birth_date,
            &self.gender,
            self.start_year,
            tables,
        )?;
        for (date, salary) in self.contributions {
            contributor.add_contribution(date, salary);
        }
        Ok(contributor)
    }
}

fn parse_birth_date(value: &str) -> Result<Option<NaiveDate>, LoadError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| LoadError::Parse { column: "BirthDate", value: value.to_string() })
}

fn parse_month(value: &str) -> Result<NaiveDate, LoadError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d"))
        .map_err(|_| LoadError::Parse { column: "Month", value: value.to_string() })
}

/// Load contributors from any reader (e.g., string buffer, file)
///
/// Contributors are returned in the order their first row appears. Birth
/// date and gender come from that first row, and the rule is chosen from the
/// year of the first contribution.
pub fn load_contributors_from_reader<R: std::io::Read>(
    reader: R,
    tables: &SurvivalTables,
) -> Result<Vec<Contributor>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut pending: Vec<PendingContributor> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let month = parse_month(&row.month)?;
        if !row.salary.is_finite() || row.salary <= 0.0 {
            return Err(LoadError::Parse { column: "Salary", value: row.salary.to_string() });
        }

        let slot = match index.get(&row.contributor_id) {
            Some(&slot) => slot,
            None => {
                pending.push(PendingContributor {
                    id: ContributorId(row.contributor_id),
                    birth_date: parse_birth_date(&row.birth_date)?,
                    gender: row.gender.clone(),
                    start_year: month.year(),
                    contributions: Vec::new(),
                });
                index.insert(row.contributor_id, pending.len() - 1);
                pending.len() - 1
            }
        };
        pending[slot].contributions.push((month, row.salary));
    }

    pending.into_iter().map(|p| p.build(tables)).collect()
}

/// Load contributors from a CSV file
pub fn load_contributors<P: AsRef<Path>>(
    path: P,
    tables: &SurvivalTables,
) -> Result<Vec<Contributor>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_contributors_from_reader(file, tables)
}
