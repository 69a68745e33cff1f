//! Synthetic contributor and monthly career generation

use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};

use super::config::CareerConfig;
use super::state::{CareerMonth, CareerStats, EmploymentState};
use crate::assumptions::SurvivalTables;
use crate::calendar::{add_months, add_years};
use crate::contributor::{Contributor, ContributorId, Gender};
use crate::error::{Result, RetirementError};

/// Month-by-month employment walk from a career start up to the horizon
///
/// Each item is the state at the start of the month. While employed the
/// month is contributed, then the job may be lost (independently of a
/// possible raise of |N(0, sd)|). While unemployed a new job may be found,
/// moving the salary by a signed N(0, sd) shock floored at `salary_floor`.
/// The sequence is fully determined by the RNG, so a seeded RNG replays it.
pub struct CareerMonths<R: Rng> {
    rng: R,
    salary_shock: Normal<f64>,
    job_loss_probability: f64,
    raise_probability: f64,
    reemployment_probability: f64,
    salary_floor: f64,
    start: NaiveDate,
    step: u32,
    horizon: NaiveDate,
    state: EmploymentState,
    salary: f64,
}

impl<R: Rng> CareerMonths<R> {
    pub fn new(
        config: &CareerConfig,
        start: NaiveDate,
        initial_salary: f64,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let salary_shock = Normal::new(0.0, config.salary_std_dev)
            .map_err(|e| RetirementError::InvalidConfig(format!("salary shock: {}", e)))?;
        Ok(Self {
            rng,
            salary_shock,
            job_loss_probability: config.job_loss_probability,
            raise_probability: config.raise_probability,
            reemployment_probability: config.reemployment_probability,
            salary_floor: config.salary_floor,
            start,
            step: 0,
            horizon: config.horizon()?,
            state: EmploymentState::Employed,
            salary: initial_salary,
        })
    }

    fn current_date(&self) -> Option<NaiveDate> {
        add_months(self.start, self.step).filter(|date| *date < self.horizon)
    }
}

impl CareerMonths<ChaCha20Rng> {
    /// Replayable walk: the initial salary and every transition come from `seed`
    pub fn seeded(config: &CareerConfig, start: NaiveDate, seed: u64) -> Result<Self> {
        // The salary range must be checked before it is sampled
        config.validate()?;
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let salary = rng.random_range(config.initial_salary_min..=config.initial_salary_max);
        Self::new(config, start, salary, rng)
    }
}

impl<R: Rng> Iterator for CareerMonths<R> {
    type Item = CareerMonth;

    fn next(&mut self) -> Option<CareerMonth> {
        let date = self.current_date()?;
        let month = CareerMonth { date, state: self.state, salary: self.salary };

        match self.state {
            EmploymentState::Employed => {
                if self.rng.random_bool(self.job_loss_probability) {
                    self.state = EmploymentState::Unemployed;
                }
                if self.rng.random_bool(self.raise_probability) {
                    self.salary += self.salary_shock.sample(&mut self.rng).abs();
                }
            }
            EmploymentState::Unemployed => {
                if self.rng.random_bool(self.reemployment_probability) {
                    self.state = EmploymentState::Employed;
                    let adjusted = self.salary + self.salary_shock.sample(&mut self.rng);
                    self.salary = adjusted.max(self.salary_floor);
                }
            }
        }

        self.step += 1;
        Some(month)
    }
}

/// A generated contributor with its simulated history
#[derive(Debug)]
pub struct SimulatedCareer {
    pub contributor: Contributor,
    pub career_start: NaiveDate,
    pub stats: CareerStats,
}

/// Generator of synthetic contributors
///
/// Owns only its configuration and a seeded RNG; two simulators built from
/// the same config and seed produce identical careers.
#[derive(Debug, Clone)]
pub struct CareerSimulator {
    config: CareerConfig,
    rng: ChaCha20Rng,
    next_id: u64,
}

impl CareerSimulator {
    pub fn new(config: CareerConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
            next_id: 1,
        })
    }

    pub fn config(&self) -> &CareerConfig {
        &self.config
    }

    /// Draw a birth date with day capped at 28 so every month is valid
    fn draw_birth_date(&mut self) -> Result<NaiveDate> {
        let year = self
            .rng
            .random_range(self.config.birth_year_min..=self.config.birth_year_max);
        let month = self.rng.random_range(1..=12);
        let day = self.rng.random_range(1..=28);
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            RetirementError::InvalidConfig(format!("birth year {} out of range", year))
        })
    }

    /// Generate one contributor and their contribution history
    ///
    /// The rule is fixed from the career-start year before any month is simulated.
    pub fn generate(&mut self, tables: &SurvivalTables) -> Result<SimulatedCareer> {
        let birth_date = self.draw_birth_date()?;
        let gender = if self.rng.random_bool(0.5) { Gender::Male } else { Gender::Female };
        let start_age = self
            .rng
            .random_range(self.config.career_start_age_min..=self.config.career_start_age_max);
        let career_start = add_years(birth_date, start_age).ok_or_else(|| {
            RetirementError::InvalidConfig(format!("career start age {} out of range", start_age))
        })?;

        let id = ContributorId(self.next_id);
        self.next_id += 1;
        let mut contributor =
            Contributor::for_career_start(id, Some(birth_date), gender, career_start.year(), tables);

        let initial_salary = self
            .rng
            .random_range(self.config.initial_salary_min..=self.config.initial_salary_max);
        let mut stats = CareerStats::default();
        for month in CareerMonths::new(&self.config, career_start, initial_salary, &mut self.rng)? {
            stats.record(month.state);
            if month.state.is_employed() {
                contributor.add_contribution(month.date, month.salary);
            }
        }

        log::debug!(
            "generated {}: career start {}, {} employed / {} unemployed months",
            contributor,
            career_start,
            stats.employed_months,
            stats.unemployed_months
        );

        Ok(SimulatedCareer { contributor, career_start, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Regime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_walk_steps_monthly_to_horizon() {
        let config = CareerConfig::default();
        let months: Vec<_> = CareerMonths::seeded(&config, ymd(2020, 3, 15), 7).unwrap().collect();

        // 2020-03-15 .. 2024-12-15 inclusive
        assert_eq!(months.len(), 58);
        assert_eq!(months[0].state, EmploymentState::Employed);
        assert_eq!(months[1].date, ymd(2020, 4, 15));
        assert_eq!(months.last().unwrap().date, ymd(2024, 12, 15));
        assert!(months[0].salary >= 1000.0 && months[0].salary <= 10_000.0);
    }

    #[test]
    fn test_walk_is_replayable_from_seed() {
        let config = CareerConfig::default();
        let first: Vec<_> = CareerMonths::seeded(&config, ymd(1990, 1, 1), 99).unwrap().collect();
        let second: Vec<_> = CareerMonths::seeded(&config, ymd(1990, 1, 1), 99).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_start_after_horizon_is_empty() {
        let config = CareerConfig::default();
        let mut months = CareerMonths::seeded(&config, ymd(2031, 6, 1), 1).unwrap();
        assert!(months.next().is_none());
    }

    #[test]
    fn test_raises_never_cut_salary_while_employed() {
        let config = CareerConfig { raise_probability: 0.5, ..Default::default() };
        let months: Vec<_> = CareerMonths::seeded(&config, ymd(1970, 1, 1), 3).unwrap().collect();

        for pair in months.windows(2) {
            if pair[0].state.is_employed() && pair[1].state.is_employed() {
                assert!(pair[1].salary >= pair[0].salary);
            }
        }
    }

    #[test]
    fn test_salary_floor_holds() {
        let config = CareerConfig {
            initial_salary_min: 5.0,
            initial_salary_max: 5.0,
            salary_std_dev: 5_000.0,
            job_loss_probability: 0.5,
            reemployment_probability: 0.5,
            salary_floor: 2.0,
            ..Default::default()
        };
        let months: Vec<_> = CareerMonths::seeded(&config, ymd(1960, 1, 1), 11).unwrap().collect();
        assert!(months.iter().all(|m| m.salary >= 2.0));
    }

    #[test]
    fn test_simulator_is_deterministic() {
        let tables = SurvivalTables::empty();
        let mut a = CareerSimulator::new(CareerConfig::default(), 2024).unwrap();
        let mut b = CareerSimulator::new(CareerConfig::default(), 2024).unwrap();

        for _ in 0..5 {
            let x = a.generate(&tables).unwrap();
            let y = b.generate(&tables).unwrap();
            assert_eq!(x.contributor.birth_date(), y.contributor.birth_date());
            assert_eq!(x.contributor.gender(), y.contributor.gender());
            assert_eq!(x.contributor.ledger(), y.contributor.ledger());
            assert_eq!(x.stats, y.stats);
        }
    }

    #[test]
    fn test_generated_contributor_shape() {
        let tables = SurvivalTables::empty();
        let mut simulator = CareerSimulator::new(CareerConfig::default(), 5).unwrap();

        for expected_id in 1..=200u64 {
            let career = simulator.generate(&tables).unwrap();
            let c = &career.contributor;
            let born = c.birth_date().unwrap();

            assert_eq!(c.id(), ContributorId(expected_id));
            assert!((1950..=2010).contains(&born.year()));
            assert!(born.day() <= 28);

            let start_age = career.career_start.year() - born.year();
            assert!((16..=25).contains(&start_age));
            assert_eq!(c.regime(), Regime::for_career_start(career.career_start.year()));

            assert_eq!(c.ledger().count() as u32, career.stats.employed_months);
            if let Some(first) = c.ledger().first() {
                assert_eq!(first.date, career.career_start);
            }
            assert!(c.ledger().iter().all(|r| r.salary > 0.0 && r.date < ymd(2024, 12, 31)));
        }
    }

    #[test]
    fn test_unemployment_share_near_stationary() {
        let tables = SurvivalTables::empty();
        let config = CareerConfig::default();
        let expected = config.stationary_unemployment();
        let mut simulator = CareerSimulator::new(config, 42).unwrap();

        let mut total = CareerStats::default();
        for _ in 0..10_000 {
            total += simulator.generate(&tables).unwrap().stats;
        }

        // Careers all start employed, which pulls the share slightly below
        // the stationary value of about 9%.
        let share = total.unemployment_rate();
        assert!(
            share > expected - 0.03 && share < expected + 0.02,
            "unemployed share {share:.4} too far from {expected:.4}"
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CareerConfig { job_loss_probability: -0.1, ..Default::default() };
        assert!(CareerSimulator::new(config, 1).is_err());
    }

    #[test]
    fn test_walk_rejects_invalid_config() {
        let config = CareerConfig { job_loss_probability: 1.5, ..Default::default() };
        let result = CareerMonths::seeded(&config, ymd(2000, 1, 1), 1);
        assert!(matches!(result, Err(RetirementError::InvalidConfig(_))));

        let config = CareerConfig {
            initial_salary_min: 5_000.0,
            initial_salary_max: 1_000.0,
            ..Default::default()
        };
        let result = CareerMonths::seeded(&config, ymd(2000, 1, 1), 1);
        assert!(matches!(result, Err(RetirementError::InvalidConfig(_))));

        let config = CareerConfig { reemployment_probability: -0.2, ..Default::default() };
        let rng = ChaCha20Rng::seed_from_u64(1);
        let result = CareerMonths::new(&config, ymd(2000, 1, 1), 2_000.0, rng);
        assert!(matches!(result, Err(RetirementError::InvalidConfig(_))));
    }
}
