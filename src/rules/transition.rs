//! Transition rule (careers starting 1999 to 2019)

use std::sync::Arc;

use chrono::NaiveDate;

use super::{by_gender, Regime, RetirementRule};
use crate::assumptions::SurvivalTable;
use crate::contributor::Contributor;
use crate::error::Result;

pub const MINIMUM_AGE: i32 = 55;
pub const MINIMUM_CONTRIBUTION_YEARS: i32 = 25;

/// Extra years added to both thresholds for men
pub const MALE_BONUS_YEARS: i32 = 5;

/// Contribution rate applied to contribution years in the previdenciary factor
pub const CONTRIBUTION_RATE: f64 = 0.31;

/// Transition rule backed by the survival table for the contributor's gender
#[derive(Debug, Clone)]
pub struct TransitionRule {
    survival: Arc<SurvivalTable>,
}

impl TransitionRule {
    pub fn new(survival: Arc<SurvivalTable>) -> Self {
        Self { survival }
    }

    pub fn survival_table(&self) -> &SurvivalTable {
        &self.survival
    }

    /// `(Tc * a / Es) * (1 + Id + Tc * a)`
    ///
    /// Tc is whole years between first and last contribution, a is
    /// [`CONTRIBUTION_RATE`], Es the survival expectancy at age Id.
    ///
    /// # Errors
    /// `SurvivalNotFound` when the table has no entry for the current age.
    pub fn previdenciary_factor(&self, contributor: &Contributor, as_of: NaiveDate) -> Result<f64> {
        let age = contributor.age_at(as_of)?;
        let expectancy = self.survival.lookup(age)?;
        let weighted_years = contributor.ledger().span_years() as f64 * CONTRIBUTION_RATE;
        Ok(weighted_years / expectancy * (1.0 + age as f64 + weighted_years))
    }
}

impl RetirementRule for TransitionRule {
    fn regime(&self) -> Regime {
        Regime::Transition
    }

    /// Larger of the age and contribution-time shortfalls; not clamped at zero
    fn remaining_years(&self, contributor: &Contributor, as_of: NaiveDate) -> Result<i32> {
        let bonus = by_gender(contributor.gender(), MALE_BONUS_YEARS, 0);
        let by_age = MINIMUM_AGE + bonus - contributor.age_at(as_of)?;
        let contributed_years = (contributor.ledger().count() / 12) as i32;
        let by_contribution = MINIMUM_CONTRIBUTION_YEARS + bonus - contributed_years;
        Ok(by_age.max(by_contribution))
    }

    fn benefit_value(&self, contributor: &Contributor, as_of: NaiveDate) -> Result<f64> {
        let average_salary = contributor.ledger().average()?;
        Ok(average_salary * self.previdenciary_factor(contributor, as_of)?)
    }
}
