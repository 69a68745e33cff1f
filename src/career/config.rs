//! Career simulation parameters

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result, RetirementError};

/// Parameters of the synthetic career generator
///
/// Defaults reproduce the reference calibration: births 1950-2010, careers
/// starting between 16 and 25, monthly steps until the end of 2024.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerConfig {
    /// Earliest birth year drawn (inclusive)
    pub birth_year_min: i32,

    /// Latest birth year drawn (inclusive)
    pub birth_year_max: i32,

    /// Youngest career-start age drawn (inclusive)
    pub career_start_age_min: u32,

    /// Oldest career-start age drawn (inclusive)
    pub career_start_age_max: u32,

    /// Simulation stops at December 31st of this year
    pub horizon_year: i32,

    /// Initial salary is uniform on [min, max]
    pub initial_salary_min: f64,
    pub initial_salary_max: f64,

    /// Standard deviation of the normal salary shock
    pub salary_std_dev: f64,

    /// Monthly probability an employed contributor loses their job
    pub job_loss_probability: f64,

    /// Monthly probability an employed contributor gets a raise of |N(0, sd)|
    pub raise_probability: f64,

    /// Monthly probability an unemployed contributor finds a job
    pub reemployment_probability: f64,

    /// Salary never drops below this after a re-employment adjustment
    pub salary_floor: f64,
}

impl Default for CareerConfig {
    fn default() -> Self {
        Self {
            birth_year_min: 1950,
            birth_year_max: 2010,
            career_start_age_min: 16,
            career_start_age_max: 25,
            horizon_year: 2024,
            initial_salary_min: 1000.0,
            initial_salary_max: 10_000.0,
            salary_std_dev: 500.0,
            job_loss_probability: 0.005,
            raise_probability: 0.01,
            reemployment_probability: 0.05,
            salary_floor: 1.0,
        }
    }
}

impl CareerConfig {
    /// Load a config from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> std::result::Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Last simulated instant: December 31st of the horizon year
    pub fn horizon(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.horizon_year, 12, 31).ok_or_else(|| {
            RetirementError::InvalidConfig(format!("horizon year {} out of range", self.horizon_year))
        })
    }

    /// Long-run share of months spent unemployed implied by the transition probabilities
    pub fn stationary_unemployment(&self) -> f64 {
        let total = self.job_loss_probability + self.reemployment_probability;
        if total > 0.0 {
            self.job_loss_probability / total
        } else {
            0.0
        }
    }

    /// Check ranges and probabilities
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: String) -> Result<()> {
            Err(RetirementError::InvalidConfig(msg))
        }

        if self.birth_year_min > self.birth_year_max {
            return invalid(format!(
                "birth year range {}..={} is empty",
                self.birth_year_min, self.birth_year_max
            ));
        }
        if self.career_start_age_min > self.career_start_age_max {
            return invalid(format!(
                "career start age range {}..={} is empty",
                self.career_start_age_min, self.career_start_age_max
            ));
        }
        if !(self.initial_salary_min > 0.0 && self.initial_salary_min <= self.initial_salary_max)
            || !self.initial_salary_max.is_finite()
        {
            return invalid(format!(
                "initial salary range {}..={} must be positive and non-empty",
                self.initial_salary_min, self.initial_salary_max
            ));
        }
        if !self.salary_std_dev.is_finite() || self.salary_std_dev < 0.0 {
            return invalid(format!("salary std dev {} must be >= 0", self.salary_std_dev));
        }
        if !(self.salary_floor.is_finite() && self.salary_floor > 0.0) {
            return invalid(format!("salary floor {} must be > 0", self.salary_floor));
        }
        for (name, p) in [
            ("job loss", self.job_loss_probability),
            ("raise", self.raise_probability),
            ("re-employment", self.reemployment_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{} probability {} outside [0, 1]", name, p));
            }
        }
        self.horizon()?;
        Ok(())
    }
}
