use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::deduction_stage::{DEDUCTION_ORDER, DeductionStage};
use super::tax_bracket::BracketKind;

/// Granularity every line item is rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingGranularity {
    WholeCurrencyUnit,
}

/// The income figure the progressive bracket thresholds are compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketIncomeBase {
    PersonalIncomeAfterAm,
}

/// How the progressive brackets combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStacking {
    /// Each bracket taxes everything above its own threshold, independently
    /// of the others, and the amounts are summed. This is not the usual
    /// marginal-slice arithmetic and must not be turned into it.
    Cumulative,
}

/// Modelling choices in force for a breakdown, for display next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownAssumptions {
    pub rounding: RoundingGranularity,
    pub bracket_income_base: BracketIncomeBase,
    pub bracket_stacking: BracketStacking,
    pub deduction_order: [DeductionStage; 4],
}

/// The assumptions every breakdown produced by this crate carries.
pub const MODEL_ASSUMPTIONS: BreakdownAssumptions = BreakdownAssumptions {
    rounding: RoundingGranularity::WholeCurrencyUnit,
    bracket_income_base: BracketIncomeBase::PersonalIncomeAfterAm,
    bracket_stacking: BracketStacking::Cumulative,
    deduction_order: DEDUCTION_ORDER,
};

/// Fully itemized annual result of the salary-after-tax pipeline.
///
/// Currency fields are whole units; rates are fractions. Every tax line is
/// rounded before it is summed, so `total_tax` is exactly the sum of the
/// displayed lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAfterTaxBreakdown {
    pub gross_annual: Decimal,

    // Pre-AM deductions
    pub pension: Decimal,
    pub atp: Decimal,

    pub am_base: Decimal,
    pub am_contribution: Decimal,
    pub personal_income_after_am: Decimal,

    // Post-AM deductions, as actually applied
    pub personal_allowance: Decimal,
    pub employment_deduction: Decimal,
    pub job_deduction: Decimal,
    pub other_deductions: Decimal,

    pub taxable_income: Decimal,

    // Tax lines
    pub municipal_tax: Decimal,
    pub church_tax: Decimal,
    pub bundskat: Decimal,
    /// Mellemskat.
    pub middle_bracket_tax: Decimal,
    /// Topskat.
    pub top_bracket_tax: Decimal,
    /// Toptopskat.
    pub top_top_bracket_tax: Decimal,

    pub total_tax: Decimal,
    pub net_annual: Decimal,
    pub net_monthly: Decimal,

    /// Total tax over gross.
    pub effective_tax_rate: Decimal,
    /// Step-function approximation of the rate on the next unit earned.
    pub marginal_tax_rate: Decimal,

    pub assumptions: BreakdownAssumptions,
}

impl SalaryAfterTaxBreakdown {
    /// A breakdown where every amount and rate is zero.
    pub fn zero() -> Self {
        Self {
            gross_annual: Decimal::ZERO,
            pension: Decimal::ZERO,
            atp: Decimal::ZERO,
            am_base: Decimal::ZERO,
            am_contribution: Decimal::ZERO,
            personal_income_after_am: Decimal::ZERO,
            personal_allowance: Decimal::ZERO,
            employment_deduction: Decimal::ZERO,
            job_deduction: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            taxable_income: Decimal::ZERO,
            municipal_tax: Decimal::ZERO,
            church_tax: Decimal::ZERO,
            bundskat: Decimal::ZERO,
            middle_bracket_tax: Decimal::ZERO,
            top_bracket_tax: Decimal::ZERO,
            top_top_bracket_tax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            net_annual: Decimal::ZERO,
            net_monthly: Decimal::ZERO,
            effective_tax_rate: Decimal::ZERO,
            marginal_tax_rate: Decimal::ZERO,
            assumptions: MODEL_ASSUMPTIONS,
        }
    }

    pub fn bracket_tax(
        &self,
        kind: BracketKind,
    ) -> Decimal {
        match kind {
            BracketKind::Middle => self.middle_bracket_tax,
            BracketKind::Top => self.top_bracket_tax,
            BracketKind::TopTop => self.top_top_bracket_tax,
        }
    }

    /// Every tax line making up `total_tax`, labelled for display.
    pub fn tax_lines(&self) -> [(&'static str, Decimal); 7] {
        [
            ("AM-bidrag", self.am_contribution),
            ("Kommuneskat", self.municipal_tax),
            ("Kirkeskat", self.church_tax),
            ("Bundskat", self.bundskat),
            (BracketKind::Middle.label(), self.middle_bracket_tax),
            (BracketKind::Top.label(), self.top_bracket_tax),
            (BracketKind::TopTop.label(), self.top_top_bracket_tax),
        ]
    }

    /// Post-AM deductions as applied, in chain order.
    pub fn deductions(&self) -> [(DeductionStage, Decimal); 4] {
        [
            (DeductionStage::PersonalAllowance, self.personal_allowance),
            (DeductionStage::EmploymentDeduction, self.employment_deduction),
            (DeductionStage::JobDeduction, self.job_deduction),
            (DeductionStage::OtherDeductions, self.other_deductions),
        ]
    }
}
