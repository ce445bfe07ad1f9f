//! Danish salary-after-tax engine.
//!
//! Turns a gross salary, a tax year and a resolved pair of municipal/church
//! rates into a fully itemized, already rounded annual breakdown. Everything
//! in this crate is pure and synchronous.

pub mod calculations;
pub mod models;

pub use calculations::{SalaryAfterTaxCalculator, compute, salary_after_tax};
pub use models::*;
