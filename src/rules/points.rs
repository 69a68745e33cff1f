//! Points-based rule (careers starting 2020 onward)

use chrono::NaiveDate;

use super::{by_gender, Regime, RetirementRule};
use crate::contributor::Contributor;
use crate::error::Result;

pub const MALE_MINIMUM_AGE: i32 = 65;
pub const FEMALE_MINIMUM_AGE: i32 = 62;
pub const MALE_MINIMUM_POINTS: i32 = 105;
pub const FEMALE_MINIMUM_POINTS: i32 = 100;
pub const MALE_MINIMUM_CONTRIBUTION_YEARS: i32 = 20;
pub const FEMALE_MINIMUM_CONTRIBUTION_YEARS: i32 = 15;

/// Factor paid at exactly the minimum contribution time
pub const BASE_FACTOR: f64 = 0.6;

/// Factor increment per contribution year above the minimum
pub const FACTOR_PER_EXTRA_YEAR: f64 = 0.02;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsBasedRule;

impl PointsBasedRule {
    pub fn new() -> Self {
        Self
    }

    /// `0.6 + 0.02 * (contribution years - minimum contribution years)`
    pub fn previdenciary_factor(&self, contributor: &Contributor) -> f64 {
        let minimum = by_gender(
            contributor.gender(),
            MALE_MINIMUM_CONTRIBUTION_YEARS,
            FEMALE_MINIMUM_CONTRIBUTION_YEARS,
        );
        let contribution_years = contributor.ledger().span_years();
        BASE_FACTOR + FACTOR_PER_EXTRA_YEAR * (contribution_years - minimum) as f64
    }
}

impl RetirementRule for PointsBasedRule {
    fn regime(&self) -> Regime {
        Regime::PointsBased
    }

    /// Larger of the age and points shortfalls; not clamped at zero
    fn remaining_years(&self, contributor: &Contributor, as_of: NaiveDate) -> Result<i32> {
        let gender = contributor.gender();
        let age = contributor.age_at(as_of)?;
        let by_age = by_gender(gender, MALE_MINIMUM_AGE, FEMALE_MINIMUM_AGE) - age;
        let points = contributor.ledger().span_years() + age;
        let by_points = by_gender(gender, MALE_MINIMUM_POINTS, FEMALE_MINIMUM_POINTS) - points;
        Ok(by_age.max(by_points))
    }

    fn benefit_value(&self, contributor: &Contributor, _as_of: NaiveDate) -> Result<f64> {
        let average_salary = contributor.ledger().average()?;
        Ok(average_salary * self.previdenciary_factor(contributor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributor::{ContributorId, Gender};
    use crate::error::RetirementError;
    use crate::rules::testing::{contribute_monthly, ymd};
    use crate::rules::Regime;
    use approx::assert_relative_eq;

    fn contributor(born: Option<NaiveDate>, gender: Gender) -> Contributor {
        Contributor::new(ContributorId(5), born, gender, Box::new(PointsBasedRule::new()))
    }

    /// Male, age 64, 22 years between first and last contribution
    fn male_at_sixty_four() -> Contributor {
        let mut c = contributor(Some(ymd(1960, 3, 1)), Gender::Male);
        contribute_monthly(&mut c, ymd(2002, 7, 1), 22 * 12 + 1, 4000.0);
        c
    }

    #[test]
    fn test_points_dominate_age() {
        let c = male_at_sixty_four();
        let as_of = ymd(2024, 7, 1);

        assert_eq!(c.ledger().span_years(), 22);
        assert_eq!(c.age_at(as_of).unwrap(), 64);
        // age: 65 - 64 = 1; points: 105 - (22 + 64) = 19
        assert_eq!(c.remaining_years_to_retirement(as_of).unwrap(), 19);
    }

    #[test]
    fn test_benefit_value() {
        let c = male_at_sixty_four();
        assert_eq!(c.rule().regime(), Regime::PointsBased);

        let factor = PointsBasedRule::new().previdenciary_factor(&c);
        assert_relative_eq!(factor, 0.64, epsilon = 1e-12);
        assert_relative_eq!(c.benefit_value(ymd(2024, 7, 1)).unwrap(), 2560.0, epsilon = 1e-9);
    }

    #[test]
    fn test_female_thresholds() {
        let mut c = contributor(Some(ymd(1990, 1, 1)), Gender::Female);
        contribute_monthly(&mut c, ymd(2020, 1, 1), 5 * 12 + 1, 3000.0);

        // age 35: 62 - 35 = 27; points: 100 - (5 + 35) = 60
        assert_eq!(c.remaining_years_to_retirement(ymd(2025, 1, 1)).unwrap(), 60);
        // 0.6 + 0.02 * (5 - 15)
        assert_relative_eq!(
            PointsBasedRule::new().previdenciary_factor(&c),
            0.4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_remaining_years_not_clamped() {
        let mut c = contributor(Some(ymd(1940, 1, 1)), Gender::Male);
        contribute_monthly(&mut c, ymd(1984, 6, 1), 40 * 12 + 1, 2500.0);
        let as_of = ymd(2024, 6, 1);

        assert_eq!(c.ledger().span_years(), 40);
        assert_eq!(c.age_at(as_of).unwrap(), 84);
        // age: 65 - 84 = -19; points: 105 - (40 + 84) = -19
        assert_eq!(c.remaining_years_to_retirement(as_of).unwrap(), -19);
    }

    #[test]
    fn test_requires_birth_date() {
        let c = contributor(None, Gender::Male);
        assert_eq!(
            c.remaining_years_to_retirement(ymd(2024, 1, 1)),
            Err(RetirementError::MissingBirthDate(Regime::PointsBased))
        );
    }
}
