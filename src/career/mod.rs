//! Stochastic career simulation producing synthetic contribution histories

mod config;
mod state;
mod engine;

pub use config::CareerConfig;
pub use state::{CareerMonth, CareerStats, EmploymentState};
pub use engine::{CareerMonths, CareerSimulator, SimulatedCareer};
