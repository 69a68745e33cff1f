//! Pre-reform rule (careers starting up to 1998)

use chrono::NaiveDate;

use super::{by_gender, Regime, RetirementRule};
use crate::contributor::Contributor;
use crate::error::{Result, RetirementError};

pub const MALE_RETIREMENT_AGE: i32 = 50;
pub const FEMALE_RETIREMENT_AGE: i32 = 45;
pub const MALE_CONTRIBUTION_YEARS: i32 = 35;
pub const FEMALE_CONTRIBUTION_YEARS: i32 = 30;

/// Number of most recent salaries averaged into the benefit
pub const BENEFIT_WINDOW_MONTHS: usize = 36;

/// Which threshold decides eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreReformBasis {
    /// Minimum retirement age (50 male / 45 female)
    Age,
    /// Minimum contribution time (35 male / 30 female years)
    ContributionTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreReformRule {
    basis: PreReformBasis,
}

impl PreReformRule {
    pub fn age_based() -> Self {
        Self { basis: PreReformBasis::Age }
    }

    pub fn contribution_time_based() -> Self {
        Self { basis: PreReformBasis::ContributionTime }
    }

    /// Age-based when the birth date is known, contribution-time-based otherwise
    pub fn for_birth_date(birth_date: Option<NaiveDate>) -> Self {
        match birth_date {
            Some(_) => Self::age_based(),
            None => Self::contribution_time_based(),
        }
    }

    pub fn basis(&self) -> PreReformBasis {
        self.basis
    }
}

impl RetirementRule for PreReformRule {
    fn regime(&self) -> Regime {
        Regime::PreReform
    }

    /// Clamped at zero once the threshold is reached
    fn remaining_years(&self, contributor: &Contributor, as_of: NaiveDate) -> Result<i32> {
        let gender = contributor.gender();
        let remaining = match self.basis {
            PreReformBasis::Age => {
                let threshold = by_gender(gender, MALE_RETIREMENT_AGE, FEMALE_RETIREMENT_AGE);
                threshold - contributor.age_at(as_of)?
            }
            PreReformBasis::ContributionTime => {
                let threshold =
                    by_gender(gender, MALE_CONTRIBUTION_YEARS, FEMALE_CONTRIBUTION_YEARS);
                let years_contributed = (contributor.ledger().count() / 12) as i32;
                threshold - years_contributed
            }
        };
        Ok(remaining.max(0))
    }

    fn benefit_value(&self, contributor: &Contributor, _as_of: NaiveDate) -> Result<f64> {
        let ledger = contributor.ledger();
        if ledger.count() < BENEFIT_WINDOW_MONTHS {
            return Err(RetirementError::InsufficientHistory {
                required: BENEFIT_WINDOW_MONTHS,
                available: ledger.count(),
            });
        }
        ledger.tail_average(BENEFIT_WINDOW_MONTHS)
    }
}
