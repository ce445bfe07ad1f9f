//! The sequential, mutually capping post-AM deduction chain.
//!
//! The four deductions compete for one pool of income. Each one is applied
//! as `min(nominal, remaining)` and the remainder is handed to the next
//! stage in [`DEDUCTION_ORDER`]. Computing them independently and
//! subtracting the sum gives different results whenever income runs out.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, saturating_sub};
use crate::models::{DEDUCTION_ORDER, DeductionStage};

/// Deduction amounts before capping against remaining income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NominalDeductions {
    pub personal_allowance: Decimal,
    pub employment_deduction: Decimal,
    pub job_deduction: Decimal,
    pub other_deductions: Decimal,
}

impl NominalDeductions {
    fn amount(
        &self,
        stage: DeductionStage,
    ) -> Decimal {
        match stage {
            DeductionStage::PersonalAllowance => self.personal_allowance,
            DeductionStage::EmploymentDeduction => self.employment_deduction,
            DeductionStage::JobDeduction => self.job_deduction,
            DeductionStage::OtherDeductions => self.other_deductions,
        }
    }
}

/// Deductions actually taken, plus the income left at the end of the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedDeductions {
    pub personal_allowance: Decimal,
    pub employment_deduction: Decimal,
    pub job_deduction: Decimal,
    pub other_deductions: Decimal,
    pub taxable_income: Decimal,
}

impl AppliedDeductions {
    fn record(
        &mut self,
        stage: DeductionStage,
        amount: Decimal,
    ) {
        let slot = match stage {
            DeductionStage::PersonalAllowance => &mut self.personal_allowance,
            DeductionStage::EmploymentDeduction => &mut self.employment_deduction,
            DeductionStage::JobDeduction => &mut self.job_deduction,
            DeductionStage::OtherDeductions => &mut self.other_deductions,
        };
        *slot = amount;
    }
}

/// Income still available to later deduction stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionChain {
    remaining: Decimal,
}

impl DeductionChain {
    pub fn new(income: Decimal) -> Self {
        Self {
            remaining: non_negative(income),
        }
    }

    /// Takes up to `nominal` from the remaining income and returns the amount
    /// actually taken. Never negative, never more than what is left.
    pub fn take(
        &mut self,
        nominal: Decimal,
    ) -> Decimal {
        let applied = non_negative(nominal).min(self.remaining);
        self.remaining = saturating_sub(self.remaining, applied);
        applied
    }

    pub fn remaining(&self) -> Decimal {
        self.remaining
    }
}

/// Runs every stage of [`DEDUCTION_ORDER`] against `personal_income_after_am`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use skat_core::calculations::deductions::{NominalDeductions, apply_deductions};
///
/// let nominal = NominalDeductions {
///     personal_allowance: dec!(54100),
///     employment_deduction: dec!(8211),
///     job_deduction: dec!(0),
///     other_deductions: dec!(5000),
/// };
///
/// let applied = apply_deductions(dec!(64400), &nominal);
///
/// // Other deductions only get what the earlier stages left behind.
/// assert_eq!(applied.other_deductions, dec!(2089));
/// assert_eq!(applied.taxable_income, dec!(0));
/// ```
pub fn apply_deductions(
    personal_income_after_am: Decimal,
    nominal: &NominalDeductions,
) -> AppliedDeductions {
    let mut chain = DeductionChain::new(personal_income_after_am);
    let mut applied = AppliedDeductions::default();

    for stage in DEDUCTION_ORDER {
        let amount = chain.take(nominal.amount(stage));
        applied.record(stage, amount);
    }

    applied.taxable_income = chain.remaining();
    applied
}
