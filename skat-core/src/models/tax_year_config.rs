use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tax_bracket::{BracketKind, ProgressiveBracket};

/// A configuration value that breaks the year table's invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearConfigError {
    #[error("{field} must be a fraction between 0 and 1, got {value}")]
    InvalidRate { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("bracket {kind:?} appears out of order")]
    BracketOutOfOrder { kind: BracketKind },
}

/// Every rate, threshold and cap the salary-after-tax pipeline needs for one
/// income year. Rates are fractions (`0.08` is 8 %).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,

    /// AM-bidrag, levied on gross income net of pension and ATP.
    pub am_rate: Decimal,

    /// Bundskat, the flat state rate on taxable income.
    pub bundskat_rate: Decimal,

    /// Personfradrag.
    pub personal_allowance: Decimal,

    /// Beskæftigelsesfradrag: `rate × personal income after AM`, capped.
    pub employment_deduction_rate: Decimal,
    pub employment_deduction_cap: Decimal,

    /// Jobfradrag: `rate × (personal income after AM − threshold)`, capped.
    pub job_deduction_rate: Decimal,
    pub job_deduction_threshold: Decimal,
    pub job_deduction_cap: Decimal,

    /// Mellemskat, topskat and toptopskat, in that order.
    pub brackets: [ProgressiveBracket; 3],

    /// Municipal rate used when no municipality has been selected.
    pub default_municipal_rate: Decimal,
}

/// Income year 2026.
pub(crate) const CONFIG_2026: TaxYearConfig = TaxYearConfig {
    tax_year: 2026,
    am_rate: dec!(0.08),
    bundskat_rate: dec!(0.1201),
    personal_allowance: dec!(54100),
    employment_deduction_rate: dec!(0.1275),
    employment_deduction_cap: dec!(63300),
    job_deduction_rate: dec!(0.045),
    job_deduction_threshold: dec!(235200),
    job_deduction_cap: dec!(3100),
    brackets: [
        ProgressiveBracket {
            kind: BracketKind::Middle,
            threshold: dec!(641200),
            rate: dec!(0.075),
        },
        ProgressiveBracket {
            kind: BracketKind::Top,
            threshold: dec!(777900),
            rate: dec!(0.075),
        },
        ProgressiveBracket {
            kind: BracketKind::TopTop,
            threshold: dec!(2592700),
            rate: dec!(0.05),
        },
    ],
    default_municipal_rate: dec!(0.2505),
};

impl TaxYearConfig {
    /// Returns the bracket of the given kind.
    pub fn bracket(&self, kind: BracketKind) -> &ProgressiveBracket {
        match kind {
            BracketKind::Middle => &self.brackets[0],
            BracketKind::Top => &self.brackets[1],
            BracketKind::TopTop => &self.brackets[2],
        }
    }

    /// Checks the table invariants: rates are fractions in `[0, 1]`,
    /// thresholds and caps are non-negative, and the brackets are stored in
    /// `BracketKind::ALL` order.
    ///
    /// # Example
    ///
    /// ```
    /// use skat_core::TaxYear;
    ///
    /// assert_eq!(TaxYear::Y2026.config().validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), TaxYearConfigError> {
        let rates = [
            ("am_rate", self.am_rate),
            ("bundskat_rate", self.bundskat_rate),
            ("employment_deduction_rate", self.employment_deduction_rate),
            ("job_deduction_rate", self.job_deduction_rate),
            ("default_municipal_rate", self.default_municipal_rate),
        ];
        for (field, value) in rates {
            check_rate(field, value)?;
        }

        let amounts = [
            ("personal_allowance", self.personal_allowance),
            ("employment_deduction_cap", self.employment_deduction_cap),
            ("job_deduction_threshold", self.job_deduction_threshold),
            ("job_deduction_cap", self.job_deduction_cap),
        ];
        for (field, value) in amounts {
            check_amount(field, value)?;
        }

        for (bracket, expected) in self.brackets.iter().zip(BracketKind::ALL) {
            if bracket.kind != expected {
                return Err(TaxYearConfigError::BracketOutOfOrder { kind: bracket.kind });
            }
            check_rate("bracket rate", bracket.rate)?;
            check_amount("bracket threshold", bracket.threshold)?;
        }

        Ok(())
    }
}

fn check_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxYearConfigError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(TaxYearConfigError::InvalidRate { field, value });
    }
    Ok(())
}

fn check_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxYearConfigError> {
    if value < Decimal::ZERO {
        return Err(TaxYearConfigError::NegativeAmount { field, value });
    }
    Ok(())
}
