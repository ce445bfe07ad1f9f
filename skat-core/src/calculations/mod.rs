//! Calculation logic for the salary-after-tax pipeline.
//!
//! [`salary_after_tax`] holds the pipeline itself, [`deductions`] the
//! capping deduction chain it runs through, and [`common`] the rounding and
//! guarded arithmetic every step shares.

pub mod common;
pub mod deductions;
pub mod salary_after_tax;

pub use deductions::{AppliedDeductions, DeductionChain, NominalDeductions, apply_deductions};
pub use salary_after_tax::{SalaryAfterTaxCalculator, compute, salary_after_tax};
