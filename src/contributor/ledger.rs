//! Append-only monthly contribution history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ContributorId;
use crate::calendar::whole_years_between;
use crate::error::{Result, RetirementError};

/// A single monthly contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Month of the contribution (day kept as recorded)
    pub date: NaiveDate,

    /// Salary the contribution was paid on
    pub salary: f64,

    /// Owning contributor, kept for traceability only
    pub contributor_id: ContributorId,
}

impl ContributionRecord {
    pub fn new(date: NaiveDate, salary: f64, contributor_id: ContributorId) -> Self {
        Self { date, salary, contributor_id }
    }
}

/// Contribution records in insertion order
///
/// Insertion order is assumed to be chronological; nothing here re-sorts or
/// validates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionLedger {
    records: Vec<ContributionRecord>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ContributionRecord) {
        self.records.push(record);
    }

    /// Number of recorded months
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&ContributionRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&ContributionRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContributionRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ContributionRecord] {
        &self.records
    }

    /// Whole years between the first and last contribution (0 when empty)
    pub fn span_years(&self) -> i32 {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => whole_years_between(first.date, last.date),
            _ => 0,
        }
    }

    /// Average salary over the last `n` contributions
    ///
    /// # Errors
    /// `InvalidContributionCount` when `n` is zero or exceeds [`count`](Self::count).
    pub fn tail_average(&self, n: usize) -> Result<f64> {
        if n == 0 || n > self.records.len() {
            return Err(RetirementError::InvalidContributionCount {
                requested: n,
                available: self.records.len(),
            });
        }
        let total: f64 = self.records[self.records.len() - n..]
            .iter()
            .map(|r| r.salary)
            .sum();
        Ok(total / n as f64)
    }

    /// Average salary over every contribution
    pub fn average(&self) -> Result<f64> {
        self.tail_average(self.records.len())
    }
}

impl<'a> IntoIterator for &'a ContributionLedger {
    type Item = &'a ContributionRecord;
    type IntoIter = std::slice::Iter<'a, ContributionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::add_months;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn monthly_ledger(start: NaiveDate, salaries: &[f64]) -> ContributionLedger {
        let mut ledger = ContributionLedger::new();
        for (i, &salary) in salaries.iter().enumerate() {
            let date = add_months(start, i as u32).unwrap();
            ledger.append(ContributionRecord::new(date, salary, ContributorId(1)));
        }
        ledger
    }

    fn jan(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
    }

    #[test]
    fn test_tail_average_flat_salary() {
        let ledger = monthly_ledger(jan(2000), &[5000.0; 40]);

        for n in 1..=40 {
            assert_relative_eq!(ledger.tail_average(n).unwrap(), 5000.0);
        }
        assert_eq!(
            ledger.tail_average(0),
            Err(RetirementError::InvalidContributionCount { requested: 0, available: 40 })
        );
        assert_eq!(
            ledger.tail_average(41),
            Err(RetirementError::InvalidContributionCount { requested: 41, available: 40 })
        );
    }

    #[test]
    fn test_tail_average_uses_latest_records() {
        let ledger = monthly_ledger(jan(2000), &[1000.0, 2000.0, 3000.0, 4000.0]);

        assert_relative_eq!(ledger.tail_average(2).unwrap(), 3500.0);
        assert_relative_eq!(ledger.average().unwrap(), 2500.0);
        // Queries never reorder or drop records
        assert_eq!(ledger.count(), 4);
        assert_eq!(ledger.first().unwrap().salary, 1000.0);
    }

    #[test]
    fn test_span_years() {
        assert_eq!(ContributionLedger::new().span_years(), 0);

        // 2018-01 .. 2021-01 inclusive
        let ledger = monthly_ledger(jan(2018), &[2500.0; 37]);
        assert_eq!(ledger.last().unwrap().date, jan(2021));
        assert_eq!(ledger.span_years(), 3);

        // One month short of the anniversary
        let ledger = monthly_ledger(jan(2018), &[2500.0; 36]);
        assert_eq!(ledger.span_years(), 2);
    }

    #[test]
    fn test_empty_average_fails() {
        let ledger = ContributionLedger::new();
        assert!(ledger.average().is_err());
    }

    proptest! {
        #[test]
        fn tail_average_stays_within_salary_bounds(
            salaries in prop::collection::vec(1.0f64..50_000.0, 1..120),
            pick in 0usize..1000,
        ) {
            let ledger = monthly_ledger(jan(1990), &salaries);
            let n = pick % salaries.len() + 1;
            let avg = ledger.tail_average(n).unwrap();
            let tail = &salaries[salaries.len() - n..];
            let lo = tail.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = tail.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(avg >= lo - 1e-9 && avg <= hi + 1e-9);
        }
    }
}
