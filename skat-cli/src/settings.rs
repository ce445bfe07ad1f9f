//! Optional TOML settings file.
//!
//! Every key is optional. Command-line flags win over settings, and settings
//! win over the built-in defaults.
//!
//! ```toml
//! year = 2026
//! municipality = "koebenhavn"
//! pension_rate = 0.05
//! atp = 1188
//! church_member = true
//! output = "json"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use skat_core::{MunicipalitySelection, TaxYear};
use tracing::debug;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub year: Option<i32>,
    pub municipality: Option<String>,
    pub pension_rate: Option<Decimal>,
    pub atp: Option<Decimal>,
    pub church_member: Option<bool>,
    pub output: Option<OutputFormat>,
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads settings from `path`, or returns the defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// The flag if given, else the configured year, else the latest one.
    pub fn tax_year(
        &self,
        flag: Option<i32>,
    ) -> Result<TaxYear> {
        match flag.or(self.year) {
            Some(year) => Ok(TaxYear::try_from(year)?),
            None => Ok(TaxYear::latest()),
        }
    }

    pub fn municipality(
        &self,
        flag: Option<&str>,
    ) -> MunicipalitySelection {
        flag.or(self.municipality.as_deref())
            .unwrap_or_default()
            .parse()
            .unwrap_or_default()
    }

    pub fn pension_rate(
        &self,
        flag: Option<Decimal>,
    ) -> Decimal {
        flag.or(self.pension_rate).unwrap_or_default()
    }

    pub fn atp(
        &self,
        flag: Option<Decimal>,
    ) -> Decimal {
        flag.or(self.atp).unwrap_or_default()
    }

    /// `--church` and `--no-church` both override the setting.
    pub fn church_member(
        &self,
        church: bool,
        no_church: bool,
    ) -> bool {
        if church {
            true
        } else if no_church {
            false
        } else {
            self.church_member.unwrap_or(false)
        }
    }

    pub fn output(
        &self,
        json: bool,
    ) -> OutputFormat {
        if json {
            OutputFormat::Json
        } else {
            self.output.unwrap_or_default()
        }
    }
}
