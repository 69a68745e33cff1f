//! Retirement eligibility and benefit rules for the three regulatory regimes
//!
//! Each contributor carries exactly one rule, chosen from the year of their
//! first contribution:
//! - **Pre-reform** (careers starting up to 1998): age or contribution-time
//!   threshold, benefit is the average of the last 36 salaries
//! - **Transition** (1999 to 2019): age and contribution-time thresholds with
//!   a male bonus, benefit scaled by the survival-based previdenciary factor
//! - **Points-based** (2020 onward): age plus contribution years scored against
//!   a points threshold, benefit scaled by a linear factor
//!
//! Rules hold no contributor state; everything is read from the contributor
//! (and, for the transition rule, its survival table) at call time.

mod pre_reform;
mod transition;
mod points;

pub use pre_reform::{PreReformBasis, PreReformRule};
pub use transition::TransitionRule;
pub use points::PointsBasedRule;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assumptions::SurvivalTables;
use crate::contributor::{Contributor, ContributorId, Gender};
use crate::error::Result;

/// Last career-start year governed by the pre-reform regime
pub const PRE_REFORM_LAST_START_YEAR: i32 = 1998;

/// Last career-start year governed by the transition regime
pub const TRANSITION_LAST_START_YEAR: i32 = 2019;

/// Eligibility and benefit computation for one regime
///
/// Implementations must be pure reads of the contributor; `as_of` is the
/// valuation date used for the contributor's age.
pub trait RetirementRule: fmt::Debug + Send + Sync {
    /// Regime this rule implements
    fn regime(&self) -> Regime;

    /// Years until the contributor becomes eligible
    fn remaining_years(&self, contributor: &Contributor, as_of: NaiveDate) -> Result<i32>;

    /// Monthly benefit value the contributor would receive
    fn benefit_value(&self, contributor: &Contributor, as_of: NaiveDate) -> Result<f64>;
}

/// Regulatory regime tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    PreReform,
    Transition,
    PointsBased,
}

impl Regime {
    /// Regime governing a career that started in `year`
    pub fn for_career_start(year: i32) -> Self {
        if year <= PRE_REFORM_LAST_START_YEAR {
            Regime::PreReform
        } else if year <= TRANSITION_LAST_START_YEAR {
            Regime::Transition
        } else {
            Regime::PointsBased
        }
    }

    /// Build the rule for this regime
    ///
    /// The pre-reform rule is age-based when the birth date is known and
    /// contribution-time-based otherwise. The transition rule keeps a shared
    /// handle to the survival table for `gender`.
    pub fn rule(
        self,
        birth_date: Option<NaiveDate>,
        gender: Gender,
        tables: &SurvivalTables,
    ) -> Box<dyn RetirementRule> {
        match self {
            Regime::PreReform => Box::new(PreReformRule::for_birth_date(birth_date)),
            Regime::Transition => {
                Box::new(TransitionRule::new(tables.for_gender(gender).clone()))
            }
            Regime::PointsBased => Box::new(PointsBasedRule::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::PreReform => "pre-reform",
            Regime::Transition => "transition",
            Regime::PointsBased => "points-based",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eligibility result for one contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementAssessment {
    pub contributor_id: ContributorId,
    pub regime: Regime,
    pub as_of: NaiveDate,
    pub remaining_years: i32,
    pub benefit_value: f64,
}

/// Male/female pick used by every rule's constants
fn by_gender<T>(gender: Gender, male: T, female: T) -> T {
    match gender {
        Gender::Male => male,
        Gender::Female => female,
    }
}
