//! Employment state tracking for a simulated career

use std::ops::AddAssign;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Two-state employment process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmploymentState {
    /// Contributing at the current salary
    #[default]
    Employed,
    /// No contribution this month
    Unemployed,
}

impl EmploymentState {
    pub fn is_employed(&self) -> bool {
        matches!(self, EmploymentState::Employed)
    }
}

/// One simulated month, as observed at the start of the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMonth {
    pub date: NaiveDate,
    pub state: EmploymentState,

    /// Salary in effect (contributed only when employed)
    pub salary: f64,
}

/// Month counts by employment state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerStats {
    pub employed_months: u32,
    pub unemployed_months: u32,
}

impl CareerStats {
    pub fn record(&mut self, state: EmploymentState) {
        match state {
            EmploymentState::Employed => self.employed_months += 1,
            EmploymentState::Unemployed => self.unemployed_months += 1,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.employed_months + self.unemployed_months
    }

    /// Share of simulated months spent unemployed (0 when nothing was simulated)
    pub fn unemployment_rate(&self) -> f64 {
        match self.total_months() {
            0 => 0.0,
            total => self.unemployed_months as f64 / total as f64,
        }
    }
}

impl AddAssign for CareerStats {
    fn add_assign(&mut self, other: Self) {
        self.employed_months += other.employed_months;
        self.unemployed_months += other.unemployed_months;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = CareerStats::default();
        assert_eq!(stats.unemployment_rate(), 0.0);

        for _ in 0..9 {
            stats.record(EmploymentState::Employed);
        }
        stats.record(EmploymentState::Unemployed);

        let mut total = CareerStats::default();
        total += stats;
        total += stats;
        assert_eq!(total.total_months(), 20);
        assert!((total.unemployment_rate() - 0.1).abs() < 1e-12);
    }
}
