use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::municipality::LocalTaxRates;
use super::tax_year::TaxYear;

/// Whether a gross amount was entered per month or per year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrossPeriod {
    Monthly,
    #[default]
    Annual,
}

impl GrossPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "annual" | "yearly" | "year" | "y" => Some(Self::Annual),
            _ => None,
        }
    }
}

/// Everything the pipeline needs besides the year configuration.
///
/// Built fresh by the caller for every computation. Values are taken as
/// given; the pipeline itself clamps anything negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAfterTaxInputs {
    pub tax_year: TaxYear,
    pub gross_amount: Decimal,
    pub gross_period: GrossPeriod,

    /// Employee pension contribution as a fraction of gross.
    pub employee_pension_rate: Decimal,

    /// Annual ATP contribution, already computed upstream.
    pub atp_annual_amount: Decimal,

    /// Extra flat annual deductions, applied last in the deduction chain.
    pub other_deductions_annual: Decimal,

    /// Fraction, already resolved from the municipality selection.
    pub municipal_tax_rate: Decimal,

    /// Fraction; only charged when `church_member` is set.
    pub church_tax_rate: Decimal,
    pub church_member: bool,
}

impl SalaryAfterTaxInputs {
    /// Inputs with no pension, ATP or extra deductions, taxed at the year's
    /// average municipal rate.
    pub fn new(
        tax_year: TaxYear,
        gross_amount: Decimal,
        gross_period: GrossPeriod,
    ) -> Self {
        Self {
            tax_year,
            gross_amount,
            gross_period,
            employee_pension_rate: Decimal::ZERO,
            atp_annual_amount: Decimal::ZERO,
            other_deductions_annual: Decimal::ZERO,
            municipal_tax_rate: tax_year.config().default_municipal_rate,
            church_tax_rate: Decimal::ZERO,
            church_member: false,
        }
    }

    /// Replaces the municipal and church rates with a resolved pair.
    pub fn with_local_rates(
        mut self,
        rates: &LocalTaxRates,
        church_member: bool,
    ) -> Self {
        self.municipal_tax_rate = rates.municipal_rate;
        self.church_tax_rate = rates.church_rate;
        self.church_member = church_member;
        self
    }
}

/// The calculator's wire-level input record.
///
/// Numbers arrive as `f64` from hosts that cannot produce decimals. Missing
/// optional fields default to zero / annual / not a member, and a missing
/// municipal rate falls back to the year's average rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAfterTaxRequest {
    #[serde(default)]
    pub year: TaxYear,
    pub gross_amount: f64,
    #[serde(default)]
    pub gross_period: GrossPeriod,
    #[serde(default)]
    pub employee_pension_rate: f64,
    #[serde(default)]
    pub atp_annual_amount: f64,
    #[serde(default)]
    pub other_deductions_annual: f64,
    #[serde(default)]
    pub municipal_tax_rate: Option<f64>,
    #[serde(default)]
    pub church_tax_rate: f64,
    #[serde(default)]
    pub church_member: bool,
}

impl SalaryAfterTaxRequest {
    /// Converts the request into pipeline inputs.
    ///
    /// `NaN`, infinities and magnitudes a `Decimal` cannot hold become zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use skat_core::{GrossPeriod, SalaryAfterTaxRequest, TaxYear};
    ///
    /// let request = SalaryAfterTaxRequest {
    ///     year: TaxYear::Y2026,
    ///     gross_amount: f64::NAN,
    ///     gross_period: GrossPeriod::Monthly,
    ///     employee_pension_rate: 0.25,
    ///     atp_annual_amount: f64::INFINITY,
    ///     other_deductions_annual: 0.0,
    ///     municipal_tax_rate: Some(0.25),
    ///     church_tax_rate: 0.0,
    ///     church_member: false,
    /// };
    ///
    /// let inputs = request.into_inputs();
    /// assert_eq!(inputs.gross_amount, dec!(0));
    /// assert_eq!(inputs.atp_annual_amount, dec!(0));
    /// assert_eq!(inputs.employee_pension_rate, dec!(0.25));
    /// ```
    pub fn into_inputs(self) -> SalaryAfterTaxInputs {
        let municipal_tax_rate = match self.municipal_tax_rate {
            Some(rate) => finite_decimal("municipal_tax_rate", rate),
            None => self.year.config().default_municipal_rate,
        };

        SalaryAfterTaxInputs {
            tax_year: self.year,
            gross_amount: finite_decimal("gross_amount", self.gross_amount),
            gross_period: self.gross_period,
            employee_pension_rate: finite_decimal(
                "employee_pension_rate",
                self.employee_pension_rate,
            ),
            atp_annual_amount: finite_decimal("atp_annual_amount", self.atp_annual_amount),
            other_deductions_annual: finite_decimal(
                "other_deductions_annual",
                self.other_deductions_annual,
            ),
            municipal_tax_rate,
            church_tax_rate: finite_decimal("church_tax_rate", self.church_tax_rate),
            church_member: self.church_member,
        }
    }
}

fn finite_decimal(
    field: &'static str,
    value: f64,
) -> Decimal {
    if !value.is_finite() {
        debug!(field, value, "non-finite input replaced with zero");
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or_else(|| {
        debug!(field, value, "input out of decimal range replaced with zero");
        Decimal::ZERO
    })
}
