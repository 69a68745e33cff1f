//! Actuarial assumptions: survival expectancy tables by gender

mod survival;
pub mod loader;

pub use survival::{SurvivalSource, SurvivalTable, SurvivalTables};
pub use loader::{CsvSurvivalSource, DEFAULT_SURVIVAL_PATH};

use std::path::Path;

use crate::error::LoadError;

impl SurvivalTables {
    /// Load both tables from CSV files in the default location (data/survival/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(DEFAULT_SURVIVAL_PATH))
    }

    /// Load both tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Self::load(&CsvSurvivalSource::new(path))
    }
}
