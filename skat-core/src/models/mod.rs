mod breakdown;
mod deduction_stage;
mod municipality;
mod salary_inputs;
mod tax_bracket;
mod tax_year;
mod tax_year_config;

pub use breakdown::{
    BracketIncomeBase, BracketStacking, BreakdownAssumptions, MODEL_ASSUMPTIONS,
    RoundingGranularity, SalaryAfterTaxBreakdown,
};
pub use deduction_stage::{DEDUCTION_ORDER, DeductionStage};
pub use municipality::{
    LocalTaxRates, MunicipalitySelection, MunicipalityTable, MunicipalityTableError,
    MunicipalityTaxRate, resolve_local_rates,
};
pub use salary_inputs::{GrossPeriod, SalaryAfterTaxInputs, SalaryAfterTaxRequest};
pub use tax_bracket::{BracketKind, ProgressiveBracket};
pub use tax_year::{TaxYear, UnsupportedTaxYear};
pub use tax_year_config::{TaxYearConfig, TaxYearConfigError};
