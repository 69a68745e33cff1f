//! Contributor identity and contribution ownership

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ledger::{ContributionLedger, ContributionRecord};
use crate::assumptions::SurvivalTables;
use crate::calendar::whole_years_between;
use crate::error::{Result, RetirementError};
use crate::rules::{Regime, RetirementAssessment, RetirementRule};

/// Gender of the contributor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Gender::Male)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = RetirementError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(RetirementError::InvalidGender(s.to_string())),
        }
    }
}

/// Identifier linking contribution records back to their contributor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContributorId(pub u64);

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A social-security contributor
///
/// Owns its contribution ledger exclusively and carries the retirement rule
/// selected when it was created. The rule never changes afterwards.
#[derive(Debug)]
pub struct Contributor {
    id: ContributorId,
    birth_date: Option<NaiveDate>,
    gender: Gender,
    ledger: ContributionLedger,
    rule: Box<dyn RetirementRule>,
}

impl Contributor {
    /// Create a contributor with an explicitly chosen rule
    pub fn new(
        id: ContributorId,
        birth_date: Option<NaiveDate>,
        gender: Gender,
        rule: Box<dyn RetirementRule>,
    ) -> Self {
        Self {
            id,
            birth_date,
            gender,
            ledger: ContributionLedger::new(),
            rule,
        }
    }

    /// Create a contributor whose rule is selected by the year their career started
    pub fn for_career_start(
        id: ContributorId,
        birth_date: Option<NaiveDate>,
        gender: Gender,
        career_start_year: i32,
        tables: &SurvivalTables,
    ) -> Self {
        let regime = Regime::for_career_start(career_start_year);
        log::debug!(
            "contributor {} starting {} assigned {} rule",
            id, career_start_year, regime
        );
        let rule = regime.rule(birth_date, gender, tables);
        Self::new(id, birth_date, gender, rule)
    }

    /// Like [`for_career_start`](Self::for_career_start) but with a textual gender
    ///
    /// # Errors
    /// `InvalidGender` unless the label is male/m or female/f (any case).
    pub fn from_label(
        id: ContributorId,
        birth_date: Option<NaiveDate>,
        gender: &str,
        career_start_year: i32,
        tables: &SurvivalTables,
    ) -> Result<Self> {
        let gender = gender.parse()?;
        Ok(Self::for_career_start(id, birth_date, gender, career_start_year, tables))
    }

    pub fn id(&self) -> ContributorId {
        self.id
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn ledger(&self) -> &ContributionLedger {
        &self.ledger
    }

    pub fn rule(&self) -> &dyn RetirementRule {
        self.rule.as_ref()
    }

    pub fn regime(&self) -> Regime {
        self.rule.regime()
    }

    /// Record a monthly contribution owned by this contributor
    pub fn add_contribution(&mut self, date: NaiveDate, salary: f64) {
        self.ledger.append(ContributionRecord::new(date, salary, self.id));
    }

    pub fn first_contribution(&self) -> Option<&ContributionRecord> {
        self.ledger.first()
    }

    /// Calendar year of the first contribution
    pub fn career_start_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.ledger.first().map(|r| r.date.year())
    }

    /// Whole-year age at `as_of`
    ///
    /// # Errors
    /// `MissingBirthDate` when the contributor was created without one.
    pub fn age_at(&self, as_of: NaiveDate) -> Result<i32> {
        self.birth_date
            .map(|born| whole_years_between(born, as_of))
            .ok_or(RetirementError::MissingBirthDate(self.regime()))
    }

    pub fn remaining_years_to_retirement(&self, as_of: NaiveDate) -> Result<i32> {
        self.rule.remaining_years(self, as_of)
    }

    pub fn benefit_value(&self, as_of: NaiveDate) -> Result<f64> {
        self.rule.benefit_value(self, as_of)
    }

    /// Both eligibility numbers for this contributor at `as_of`
    pub fn assess(&self, as_of: NaiveDate) -> Result<RetirementAssessment> {
        Ok(RetirementAssessment {
            contributor_id: self.id,
            regime: self.regime(),
            as_of,
            remaining_years: self.remaining_years_to_retirement(as_of)?,
            benefit_value: self.benefit_value(as_of)?,
        })
    }
}

impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let born = self
            .birth_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        write!(
            f,
            "Contributor {} ({}, born {}, {} rule, {} months)",
            self.id,
            self.gender,
            born,
            self.regime(),
            self.ledger.count()
        )
    }
}
