//! CSV datasets for the salary-after-tax engine.
//!
//! [`MunicipalityLoader`] reads municipal and church tax percentages, and
//! [`ScenarioLoader`] reads batches of salary scenarios to run through the
//! pipeline.

mod municipalities;
mod scenarios;

pub use municipalities::{MunicipalityLoader, MunicipalityLoaderError, default_municipalities};
pub use scenarios::{SalaryScenario, ScenarioLoader, ScenarioLoaderError};
