//! INSS Retirement - eligibility and benefit engine for social-security contributors
//!
//! This library provides:
//! - Contributors with append-only monthly contribution ledgers
//! - Survival expectancy tables by gender
//! - Retirement rules for the pre-reform, transition and points-based regimes
//! - A stochastic career simulator producing realistic contribution histories
//! - A scenario runner assessing batches of simulated careers

pub mod error;
pub mod calendar;
pub mod contributor;
pub mod assumptions;
pub mod rules;
pub mod career;
pub mod scenario;

// Re-export commonly used types
pub use error::{ErrorKind, LoadError, RetirementError};
pub use contributor::{Contributor, ContributorId, ContributionLedger, ContributionRecord, Gender};
pub use assumptions::{SurvivalTable, SurvivalTables, SurvivalSource, CsvSurvivalSource};
pub use rules::{Regime, RetirementAssessment, RetirementRule};
pub use career::{CareerConfig, CareerSimulator};
pub use scenario::ScenarioRunner;
