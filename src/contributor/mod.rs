//! Contributor data structures and contribution-history loading

mod data;
mod ledger;
pub mod loader;

pub use data::{Contributor, ContributorId, Gender};
pub use ledger::{ContributionLedger, ContributionRecord};
pub use loader::{load_contributors, load_contributors_from_reader};
