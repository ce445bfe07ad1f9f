use std::io::Read;

use skat_core::{MunicipalityTable, MunicipalityTableError, MunicipalityTaxRate};
use thiserror::Error;
use tracing::{info, warn};

const EMBEDDED_MUNICIPALITIES: &str = include_str!("../data/municipalities.csv");

/// Errors that can occur when loading municipality data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MunicipalityLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid municipality table: {0}")]
    Table(#[from] MunicipalityTableError),
}

impl From<csv::Error> for MunicipalityLoaderError {
    fn from(err: csv::Error) -> Self {
        MunicipalityLoaderError::CsvParse(err.to_string())
    }
}

/// Loader for municipality tax rates from CSV files.
///
/// The CSV format is:
/// - `id`: Stable lookup key (e.g., `koebenhavn`)
/// - `name`: Display name
/// - `municipal_tax_percent`: Kommuneskat in percent (e.g., `23.39`)
/// - `church_tax_percent`: Kirkeskat in percent (e.g., `0.80`)
pub struct MunicipalityLoader;

impl MunicipalityLoader {
    /// Parse municipality records from a CSV reader.
    ///
    /// Cells are trimmed. Rows with an empty id are skipped.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<MunicipalityTaxRate>, MunicipalityLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: MunicipalityTaxRate = result?;
            if record.id.is_empty() {
                warn!(row = index + 1, name = %record.name, "skipping municipality without id");
                continue;
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Parse a CSV reader and build a validated [`MunicipalityTable`].
    pub fn load<R: Read>(reader: R) -> Result<MunicipalityTable, MunicipalityLoaderError> {
        let records = Self::parse(reader)?;
        let table = MunicipalityTable::new(records)?;
        info!(municipalities = table.len(), "loaded municipality table");
        Ok(table)
    }
}

/// The municipality dataset compiled into the crate.
///
/// Indicative percentages for a sample of municipalities, enough to exercise
/// the lookup. Pass a file through [`MunicipalityLoader::load`] for a
/// complete list.
pub fn default_municipalities() -> Result<MunicipalityTable, MunicipalityLoaderError> {
    MunicipalityLoader::load(EMBEDDED_MUNICIPALITIES.as_bytes())
}
