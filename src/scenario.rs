//! Scenario runner for batches of simulated careers
//!
//! Loads survival tables once, then generates and assesses as many careers as
//! requested. Careers are processed one after another; an assessment failure
//! is recorded on that career's outcome and the batch continues.

use chrono::NaiveDate;
use serde::Serialize;

use crate::assumptions::SurvivalTables;
use crate::career::{CareerConfig, CareerSimulator, CareerStats, SimulatedCareer};
use crate::contributor::{ContributorId, Gender};
use crate::error::{ErrorKind, LoadError, Result};
use crate::rules::{Regime, RetirementAssessment};

/// Summary of one simulated career and its assessment
#[derive(Debug, Clone, Serialize)]
pub struct CareerOutcome {
    pub contributor_id: ContributorId,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub career_start: NaiveDate,
    pub regime: Regime,
    pub months_contributed: usize,
    pub stats: CareerStats,

    /// Present when both eligibility numbers could be computed
    pub assessment: Option<RetirementAssessment>,

    /// Years to retirement, kept even when only the benefit failed
    pub remaining_years: Option<i32>,

    /// Why the assessment failed, otherwise `None`
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl CareerOutcome {
    fn from_career(career: &SimulatedCareer, as_of: NaiveDate) -> Self {
        let contributor = &career.contributor;
        let remaining_years = contributor.remaining_years_to_retirement(as_of).ok();
        let (assessment, failure) = match contributor.assess(as_of) {
            Ok(assessment) => (Some(assessment), None),
            Err(e) => {
                log::debug!("contributor {} not assessed: {}", contributor.id(), e);
                (None, Some(e))
            }
        };

        Self {
            contributor_id: contributor.id(),
            gender: contributor.gender(),
            birth_date: contributor.birth_date(),
            career_start: career.career_start,
            regime: contributor.regime(),
            months_contributed: contributor.ledger().count(),
            stats: career.stats,
            assessment,
            remaining_years,
            error_kind: failure.as_ref().map(|e| e.kind()),
            error: failure.map(|e| e.to_string()),
        }
    }
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let mut runner = ScenarioRunner::from_csv(CareerConfig::default(), 42)?;
/// let outcomes = runner.run(100, calendar::today())?;
/// println!("unemployed share: {:.3}", unemployment_rate(&outcomes));
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    tables: SurvivalTables,
    simulator: CareerSimulator,
}

impl ScenarioRunner {
    pub fn new(tables: SurvivalTables, config: CareerConfig, seed: u64) -> Result<Self> {
        Ok(Self {
            tables,
            simulator: CareerSimulator::new(config, seed)?,
        })
    }

    /// Create runner by loading survival tables from the default CSV location
    pub fn from_csv(config: CareerConfig, seed: u64) -> std::result::Result<Self, LoadError> {
        Ok(Self::new(SurvivalTables::from_csv()?, config, seed)?)
    }

    /// Create runner from a specific survival table directory
    pub fn from_csv_path(
        path: &std::path::Path,
        config: CareerConfig,
        seed: u64,
    ) -> std::result::Result<Self, LoadError> {
        Ok(Self::new(SurvivalTables::from_csv_path(path)?, config, seed)?)
    }

    /// Generate and assess a single career
    pub fn run_one(&mut self, as_of: NaiveDate) -> Result<CareerOutcome> {
        let career = self.simulator.generate(&self.tables)?;
        Ok(CareerOutcome::from_career(&career, as_of))
    }

    /// Generate and assess `count` careers in sequence
    pub fn run(&mut self, count: usize, as_of: NaiveDate) -> Result<Vec<CareerOutcome>> {
        (0..count).map(|_| self.run_one(as_of)).collect()
    }

    pub fn tables(&self) -> &SurvivalTables {
        &self.tables
    }

    pub fn config(&self) -> &CareerConfig {
        self.simulator.config()
    }
}

/// Share of all simulated months spent unemployed across `outcomes`
pub fn unemployment_rate(outcomes: &[CareerOutcome]) -> f64 {
    let mut total = CareerStats::default();
    for outcome in outcomes {
        total += outcome.stats;
    }
    total.unemployment_rate()
}
