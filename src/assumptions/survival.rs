//! Survival expectancy by age, one table per gender
//!
//! Tables are built once from an already-parsed age -> expectancy mapping and
//! never change afterwards, so a single instance can be shared by every rule
//! evaluation through `Arc`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::contributor::Gender;
use crate::error::{LoadError, Result, RetirementError};

/// Supplies parsed survival expectancy data for one gender
///
/// Implemented by [`CsvSurvivalSource`](super::CsvSurvivalSource) and by any
/// closure `Fn(Gender) -> Result<HashMap<u32, f64>, LoadError>`.
pub trait SurvivalSource {
    fn load(&self, gender: Gender) -> std::result::Result<HashMap<u32, f64>, LoadError>;
}

impl<F> SurvivalSource for F
where
    F: Fn(Gender) -> std::result::Result<HashMap<u32, f64>, LoadError>,
{
    fn load(&self, gender: Gender) -> std::result::Result<HashMap<u32, f64>, LoadError> {
        self(gender)
    }
}

/// Expected remaining years of life by integer age for one gender
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalTable {
    gender: Gender,
    expectancy: BTreeMap<u32, f64>,
}

impl SurvivalTable {
    /// Build a table from age -> expectancy pairs
    ///
    /// # Errors
    /// `InvalidExpectancy` for any non-finite or non-positive value.
    pub fn new<I>(gender: Gender, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut expectancy = BTreeMap::new();
        for (age, value) in entries {
            if !value.is_finite() || value <= 0.0 {
                return Err(RetirementError::InvalidExpectancy { age, value });
            }
            expectancy.insert(age, value);
        }
        Ok(Self { gender, expectancy })
    }

    /// Table with no entries; every lookup fails
    pub fn empty(gender: Gender) -> Self {
        Self { gender, expectancy: BTreeMap::new() }
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn len(&self) -> usize {
        self.expectancy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectancy.is_empty()
    }

    /// Youngest and oldest ages present
    pub fn age_range(&self) -> Option<(u32, u32)> {
        let first = self.expectancy.keys().next()?;
        let last = self.expectancy.keys().next_back()?;
        Some((*first, *last))
    }

    /// Survival expectancy in years at `age`
    ///
    /// # Errors
    /// `SurvivalNotFound` when the table has no entry for `age`.
    pub fn lookup(&self, age: i32) -> Result<f64> {
        let found = u32::try_from(age)
            .ok()
            .and_then(|a| self.expectancy.get(&a).copied());
        match found {
            Some(value) => Ok(value),
            None => {
                log::warn!("no survival expectancy for {} at age {}", self.gender, age);
                Err(RetirementError::SurvivalNotFound { gender: self.gender, age })
            }
        }
    }
}

/// Male and female survival tables, shared read-only
#[derive(Debug, Clone)]
pub struct SurvivalTables {
    male: Arc<SurvivalTable>,
    female: Arc<SurvivalTable>,
}

impl SurvivalTables {
    /// Pair two tables; each must be keyed by its own gender
    pub fn new(male: SurvivalTable, female: SurvivalTable) -> Result<Self> {
        if male.gender() != Gender::Male || female.gender() != Gender::Female {
            return Err(RetirementError::InvalidConfig(
                "survival tables must be supplied as (male, female)".to_string(),
            ));
        }
        Ok(Self { male: Arc::new(male), female: Arc::new(female) })
    }

    /// Build both tables from parsed mappings
    pub fn from_mappings(male: HashMap<u32, f64>, female: HashMap<u32, f64>) -> Result<Self> {
        Self::new(
            SurvivalTable::new(Gender::Male, male)?,
            SurvivalTable::new(Gender::Female, female)?,
        )
    }

    /// Load both tables from a source, once each
    pub fn load<S: SurvivalSource + ?Sized>(
        source: &S,
    ) -> std::result::Result<Self, LoadError> {
        let male = source.load(Gender::Male)?;
        let female = source.load(Gender::Female)?;
        let tables = Self::from_mappings(male, female)?;
        log::debug!(
            "loaded survival tables: {} male ages, {} female ages",
            tables.male.len(),
            tables.female.len()
        );
        Ok(tables)
    }

    /// Tables without entries, for rules that never consult them
    pub fn empty() -> Self {
        Self {
            male: Arc::new(SurvivalTable::empty(Gender::Male)),
            female: Arc::new(SurvivalTable::empty(Gender::Female)),
        }
    }

    pub fn for_gender(&self, gender: Gender) -> &Arc<SurvivalTable> {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }
}
