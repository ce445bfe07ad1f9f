use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tax_year_config::{CONFIG_2026, TaxYearConfig};

/// A year with no configuration in the table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("tax year {0} is not supported (supported: {supported})", supported = TaxYear::supported_list())]
pub struct UnsupportedTaxYear(pub i32);

/// Income years the engine carries a configuration for.
///
/// The set is closed: a `TaxYear` value always has a configuration, so
/// [`TaxYear::config`] cannot fail. Integers coming from outside are checked
/// once, at the `TryFrom<i32>` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TaxYear {
    Y2026,
}

impl TaxYear {
    pub const ALL: &'static [TaxYear] = &[TaxYear::Y2026];

    /// The most recent supported year.
    pub fn latest() -> Self {
        Self::Y2026
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Y2026 => 2026,
        }
    }

    /// Returns the immutable configuration for this year.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use skat_core::TaxYear;
    ///
    /// let config = TaxYear::Y2026.config();
    /// assert_eq!(config.am_rate, dec!(0.08));
    /// ```
    pub fn config(&self) -> &'static TaxYearConfig {
        match self {
            Self::Y2026 => &CONFIG_2026,
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|year| year.as_i32().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for TaxYear {
    fn default() -> Self {
        Self::latest()
    }
}

impl TryFrom<i32> for TaxYear {
    type Error = UnsupportedTaxYear;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_i32() == year)
            .ok_or(UnsupportedTaxYear(year))
    }
}

impl From<TaxYear> for i32 {
    fn from(year: TaxYear) -> Self {
        year.as_i32()
    }
}

impl fmt::Display for TaxYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}
