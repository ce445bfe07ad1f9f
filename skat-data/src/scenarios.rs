use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use skat_core::{
    GrossPeriod, MunicipalitySelection, MunicipalityTable, SalaryAfterTaxInputs, TaxYear,
    UnsupportedTaxYear, resolve_local_rates,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading salary scenarios.
///
/// `row` is the 1-based data row, not counting the header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioLoaderError {
    #[error("CSV parse error: {0}")]
    Parse(String),

    #[error("Row {row}: {source}")]
    UnsupportedYear {
        row: usize,
        source: UnsupportedTaxYear,
    },

    #[error("Row {row}: unknown gross period '{value}' (expected 'monthly' or 'annual')")]
    InvalidPeriod { row: usize, value: String },
}

impl From<csv::Error> for ScenarioLoaderError {
    fn from(err: csv::Error) -> Self {
        ScenarioLoaderError::Parse(err.to_string())
    }
}

/// A single record from the scenarios CSV file.
#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    label: String,
    year: i32,
    gross_amount: Decimal,
    #[serde(default)]
    gross_period: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pension_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    atp_annual: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    other_deductions: Option<Decimal>,
    #[serde(default)]
    municipality: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    church_member: Option<bool>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(flag) => match flag.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid flag '{other}'"))),
        },
    }
}

/// One salary scenario from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryScenario {
    pub label: String,
    pub tax_year: TaxYear,
    pub gross_amount: Decimal,
    pub gross_period: GrossPeriod,
    pub pension_rate: Decimal,
    pub atp_annual: Decimal,
    pub other_deductions: Decimal,
    pub municipality: MunicipalitySelection,
    pub church_member: bool,
}

impl SalaryScenario {
    fn from_record(
        row: usize,
        record: ScenarioRecord,
    ) -> Result<Self, ScenarioLoaderError> {
        let tax_year = TaxYear::try_from(record.year)
            .map_err(|source| ScenarioLoaderError::UnsupportedYear { row, source })?;

        let gross_period = match record.gross_period.as_deref().map(str::trim) {
            None | Some("") => GrossPeriod::default(),
            Some(value) => GrossPeriod::parse(value).ok_or_else(|| {
                ScenarioLoaderError::InvalidPeriod {
                    row,
                    value: value.to_string(),
                }
            })?,
        };

        let municipality = record
            .municipality
            .as_deref()
            .unwrap_or_default()
            .parse::<MunicipalitySelection>()
            .unwrap_or_default();

        Ok(Self {
            label: record.label,
            tax_year,
            gross_amount: record.gross_amount,
            gross_period,
            pension_rate: record.pension_rate.unwrap_or_default(),
            atp_annual: record.atp_annual.unwrap_or_default(),
            other_deductions: record.other_deductions.unwrap_or_default(),
            municipality,
            church_member: record.church_member.unwrap_or_default(),
        })
    }

    /// Builds pipeline inputs, resolving the municipality against `table`.
    pub fn to_inputs(
        &self,
        table: &MunicipalityTable,
    ) -> SalaryAfterTaxInputs {
        let rates = resolve_local_rates(
            table,
            &self.municipality,
            self.tax_year.config(),
            self.church_member,
        );

        let mut inputs =
            SalaryAfterTaxInputs::new(self.tax_year, self.gross_amount, self.gross_period)
                .with_local_rates(&rates, self.church_member);
        inputs.employee_pension_rate = self.pension_rate;
        inputs.atp_annual_amount = self.atp_annual;
        inputs.other_deductions_annual = self.other_deductions;
        inputs
    }
}

/// Loader for salary scenarios from CSV files.
///
/// The CSV format is:
/// - `label`: Free text shown next to the result
/// - `year`: Income year (e.g., 2026)
/// - `gross_amount`: Gross salary
/// - `gross_period`: `monthly` or `annual` (default annual)
/// - `pension_rate`: Employee pension as a fraction (default 0)
/// - `atp_annual`: Annual ATP (default 0)
/// - `other_deductions`: Extra annual deductions (default 0)
/// - `municipality`: Municipality id or `average` (default average)
/// - `church_member`: `true`/`false` (default false)
///
/// Only `label`, `year` and `gross_amount` are required; the other columns
/// may be empty or absent.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SalaryScenario>, ScenarioLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut scenarios = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: ScenarioRecord = result?;
            scenarios.push(SalaryScenario::from_record(index + 1, record)?);
        }

        info!(scenarios = scenarios.len(), "loaded salary scenarios");
        Ok(scenarios)
    }
}
