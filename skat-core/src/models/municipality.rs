use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::tax_year_config::TaxYearConfig;

/// Errors raised while assembling a [`MunicipalityTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MunicipalityTableError {
    #[error("municipality id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("municipality '{id}' has a negative {field} percentage: {value}")]
    NegativeRate {
        id: String,
        field: &'static str,
        value: Decimal,
    },
}

/// Municipal and church tax percentages for one municipality.
///
/// Percentages are stored as published (`24.57` means 24.57 %).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalityTaxRate {
    pub id: String,
    pub name: String,
    pub municipal_tax_percent: Decimal,
    pub church_tax_percent: Decimal,
}

impl MunicipalityTaxRate {
    pub fn municipal_rate(&self) -> Decimal {
        self.municipal_tax_percent / Decimal::ONE_HUNDRED
    }

    pub fn church_rate(&self) -> Decimal {
        self.church_tax_percent / Decimal::ONE_HUNDRED
    }
}

/// Read-only municipality dataset, kept in the order it was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MunicipalityTable {
    entries: Vec<MunicipalityTaxRate>,
}

impl MunicipalityTable {
    /// Builds a table, rejecting duplicate ids and negative percentages.
    pub fn new(entries: Vec<MunicipalityTaxRate>) -> Result<Self, MunicipalityTableError> {
        let mut seen = HashSet::with_capacity(entries.len());

        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(MunicipalityTableError::DuplicateId(entry.id.clone()));
            }
            if entry.municipal_tax_percent < Decimal::ZERO {
                return Err(MunicipalityTableError::NegativeRate {
                    id: entry.id.clone(),
                    field: "municipal",
                    value: entry.municipal_tax_percent,
                });
            }
            if entry.church_tax_percent < Decimal::ZERO {
                return Err(MunicipalityTableError::NegativeRate {
                    id: entry.id.clone(),
                    field: "church",
                    value: entry.church_tax_percent,
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn find(
        &self,
        id: &str,
    ) -> Option<&MunicipalityTaxRate> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MunicipalityTaxRate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the user picked in the municipality selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MunicipalitySelection {
    /// Use the year's average municipal rate and no church tax.
    #[default]
    Average,
    Municipality(String),
}

impl MunicipalitySelection {
    pub const AVERAGE_SENTINEL: &'static str = "average";
}

impl FromStr for MunicipalitySelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::AVERAGE_SENTINEL) {
            Ok(Self::Average)
        } else {
            Ok(Self::Municipality(trimmed.to_string()))
        }
    }
}

impl fmt::Display for MunicipalitySelection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Average => f.write_str(Self::AVERAGE_SENTINEL),
            Self::Municipality(id) => f.write_str(id),
        }
    }
}

/// Municipal and church rates ready to be fed into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalTaxRates {
    /// Fraction, e.g. `0.2505`.
    pub municipal_rate: Decimal,
    /// Fraction; zero unless a municipality was resolved and the taxpayer is
    /// a church member.
    pub church_rate: Decimal,
    /// The municipality that supplied the rates, `None` for the average.
    pub municipality_id: Option<String>,
}

/// Resolves a selection to a municipal/church rate pair.
///
/// An id that is not in `table` is not an error: it falls back to the year's
/// default municipal rate with no church tax, exactly like the average
/// selection. The dataset has no average church rate, so church tax is only
/// ever non-zero for a resolved municipality with `church_member` set.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use skat_core::{MunicipalitySelection, MunicipalityTable, TaxYear, resolve_local_rates};
///
/// let table = MunicipalityTable::default();
/// let rates = resolve_local_rates(
///     &table,
///     &MunicipalitySelection::Average,
///     TaxYear::Y2026.config(),
///     true,
/// );
///
/// assert_eq!(rates.municipal_rate, dec!(0.2505));
/// assert_eq!(rates.church_rate, dec!(0));
/// ```
pub fn resolve_local_rates(
    table: &MunicipalityTable,
    selection: &MunicipalitySelection,
    config: &TaxYearConfig,
    church_member: bool,
) -> LocalTaxRates {
    let found = match selection {
        MunicipalitySelection::Average => None,
        MunicipalitySelection::Municipality(id) => {
            let found = table.find(id);
            if found.is_none() {
                debug!(municipality = %id, "unknown municipality; using average rate");
            }
            found
        }
    };

    match found {
        Some(municipality) => LocalTaxRates {
            municipal_rate: municipality.municipal_rate(),
            church_rate: if church_member {
                municipality.church_rate()
            } else {
                Decimal::ZERO
            },
            municipality_id: Some(municipality.id.clone()),
        },
        None => LocalTaxRates {
            municipal_rate: config.default_municipal_rate,
            church_rate: Decimal::ZERO,
            municipality_id: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxYear;

    fn municipality(
        id: &str,
        municipal: Decimal,
        church: Decimal,
    ) -> MunicipalityTaxRate {
        MunicipalityTaxRate {
            id: id.to_string(),
            name: id.to_uppercase(),
            municipal_tax_percent: municipal,
            church_tax_percent: church,
        }
    }

    fn test_table() -> MunicipalityTable {
        MunicipalityTable::new(vec![
            municipality("koebenhavn", dec!(23.39), dec!(0.80)),
            municipality("frederiksberg", dec!(24.57), dec!(0.50)),
        ])
        .unwrap()
    }

    // =========================================================================
    // MunicipalityTable tests
    // =========================================================================

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = MunicipalityTable::new(vec![
            municipality("aarhus", dec!(24.52), dec!(0.74)),
            municipality("aarhus", dec!(24.52), dec!(0.74)),
        ]);

        assert_eq!(
            result,
            Err(MunicipalityTableError::DuplicateId("aarhus".to_string()))
        );
    }

    #[test]
    fn new_rejects_negative_church_rate() {
        let result = MunicipalityTable::new(vec![municipality("odense", dec!(25.5), dec!(-0.1))]);

        assert_eq!(
            result,
            Err(MunicipalityTableError::NegativeRate {
                id: "odense".to_string(),
                field: "church",
                value: dec!(-0.1),
            })
        );
    }

    #[test]
    fn find_returns_matching_entry() {
        let table = test_table();

        assert_eq!(table.find("frederiksberg").map(|m| m.municipal_tax_percent), Some(dec!(24.57)));
        assert_eq!(table.find("aalborg"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn percentages_convert_to_fractions() {
        let entry = municipality("koebenhavn", dec!(23.39), dec!(0.80));

        assert_eq!(entry.municipal_rate(), dec!(0.2339));
        assert_eq!(entry.church_rate(), dec!(0.008));
    }

    // =========================================================================
    // MunicipalitySelection tests
    // =========================================================================

    #[test]
    fn selection_parses_average_sentinel() {
        assert_eq!("average".parse::<MunicipalitySelection>(), Ok(MunicipalitySelection::Average));
        assert_eq!("Average".parse::<MunicipalitySelection>(), Ok(MunicipalitySelection::Average));
        assert_eq!("  ".parse::<MunicipalitySelection>(), Ok(MunicipalitySelection::Average));
    }

    #[test]
    fn selection_parses_municipality_id() {
        assert_eq!(
            " koebenhavn ".parse::<MunicipalitySelection>(),
            Ok(MunicipalitySelection::Municipality("koebenhavn".to_string()))
        );
    }

    // =========================================================================
    // resolve_local_rates tests
    // =========================================================================

    #[test]
    fn resolve_known_municipality_for_church_member() {
        let rates = resolve_local_rates(
            &test_table(),
            &MunicipalitySelection::Municipality("koebenhavn".to_string()),
            TaxYear::Y2026.config(),
            true,
        );

        assert_eq!(rates.municipal_rate, dec!(0.2339));
        assert_eq!(rates.church_rate, dec!(0.008));
        assert_eq!(rates.municipality_id.as_deref(), Some("koebenhavn"));
    }

    #[test]
    fn resolve_known_municipality_without_membership_has_no_church_rate() {
        let rates = resolve_local_rates(
            &test_table(),
            &MunicipalitySelection::Municipality("koebenhavn".to_string()),
            TaxYear::Y2026.config(),
            false,
        );

        assert_eq!(rates.church_rate, dec!(0));
    }

    #[test]
    fn resolve_unknown_municipality_falls_back_to_average() {
        let rates = resolve_local_rates(
            &test_table(),
            &MunicipalitySelection::Municipality("atlantis".to_string()),
            TaxYear::Y2026.config(),
            true,
        );

        assert_eq!(
            rates,
            LocalTaxRates {
                municipal_rate: dec!(0.2505),
                church_rate: dec!(0),
                municipality_id: None,
            }
        );
    }

    #[test]
    fn resolve_average_never_charges_church_tax() {
        let rates = resolve_local_rates(
            &test_table(),
            &MunicipalitySelection::Average,
            TaxYear::Y2026.config(),
            true,
        );

        assert_eq!(rates.municipal_rate, dec!(0.2505));
        assert_eq!(rates.church_rate, dec!(0));
    }
}
