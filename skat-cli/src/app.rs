//! Command execution.
//!
//! Every command builds its output as a `String` so it can be tested without
//! touching stdout; [`run`] does the printing.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use skat_core::{
    GrossPeriod, MunicipalitySelection, MunicipalityTable, SalaryAfterTaxInputs,
    SalaryAfterTaxRequest, TaxYear, resolve_local_rates, salary_after_tax,
};
use skat_data::{MunicipalityLoader, ScenarioLoader, default_municipalities};
use tracing::{debug, info};

use crate::cli::{BatchArgs, CalculateArgs, Cli, Command, MunicipalitiesArgs};
use crate::output::{self, ScenarioResult};
use crate::settings::{OutputFormat, Settings};

/// Runs the parsed command and prints its output.
pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let table = load_municipalities(cli.municipalities.as_deref())?;

    let out = match &cli.command {
        Command::Calculate(args) => calculate(args, &settings, &table)?,
        Command::Batch(args) => batch(args, &settings, &table)?,
        Command::Municipalities(args) => municipalities(args, &table)?,
        Command::Years => years()?,
    };

    println!("{out}");
    Ok(())
}

/// Loads the municipality CSV at `path`, or the built-in dataset.
pub fn load_municipalities(path: Option<&Path>) -> Result<MunicipalityTable> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            MunicipalityLoader::load(file)
                .with_context(|| format!("Failed to load municipalities: {}", path.display()))
        }
        None => default_municipalities().context("Failed to load built-in municipalities"),
    }
}

/// Lists `--file` when given, otherwise the active table.
pub fn municipalities(
    args: &MunicipalitiesArgs,
    table: &MunicipalityTable,
) -> Result<String> {
    match &args.file {
        Some(path) => {
            let listed = load_municipalities(Some(path.as_path()))?;
            Ok(output::municipalities_table(&listed))
        }
        None => Ok(output::municipalities_table(table)),
    }
}

/// Builds pipeline inputs from flags, falling back to settings.
pub fn inputs_from_args(
    args: &CalculateArgs,
    settings: &Settings,
    table: &MunicipalityTable,
) -> Result<(SalaryAfterTaxInputs, MunicipalitySelection)> {
    let tax_year = settings.tax_year(args.year)?;
    let period = if args.monthly {
        GrossPeriod::Monthly
    } else {
        GrossPeriod::Annual
    };
    let gross = args
        .gross
        .context("--gross is required unless --request is given")?;

    let selection = settings.municipality(args.municipality.as_deref());
    let church_member = settings.church_member(args.church, args.no_church);
    let rates = resolve_local_rates(table, &selection, tax_year.config(), church_member);
    let selection = match rates.municipality_id {
        Some(_) => selection,
        None => MunicipalitySelection::Average,
    };

    let mut inputs = SalaryAfterTaxInputs::new(tax_year, gross, period)
        .with_local_rates(&rates, church_member);
    inputs.employee_pension_rate = settings.pension_rate(args.pension_rate);
    inputs.atp_annual_amount = settings.atp(args.atp);
    inputs.other_deductions_annual = args.other_deductions.unwrap_or_default();

    Ok((inputs, selection))
}

/// Reads a JSON request file.
pub fn inputs_from_request(path: &Path) -> Result<SalaryAfterTaxInputs> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request: {}", path.display()))?;
    let request: SalaryAfterTaxRequest = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse request: {}", path.display()))?;
    Ok(request.into_inputs())
}

pub fn calculate(
    args: &CalculateArgs,
    settings: &Settings,
    table: &MunicipalityTable,
) -> Result<String> {
    let (inputs, municipality) = match &args.request {
        Some(path) => (inputs_from_request(path)?, "request".to_string()),
        None => {
            let (inputs, selection) = inputs_from_args(args, settings, table)?;
            (inputs, selection.to_string())
        }
    };

    debug!(?inputs, "calculating salary after tax");
    let breakdown = salary_after_tax(&inputs);

    match settings.output(args.json) {
        OutputFormat::Json => output::to_json(&breakdown).context("Failed to serialize breakdown"),
        OutputFormat::Table => Ok(output::breakdown_table(
            inputs.tax_year,
            &municipality,
            &breakdown,
        )),
    }
}

pub fn batch(
    args: &BatchArgs,
    settings: &Settings,
    table: &MunicipalityTable,
) -> Result<String> {
    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;
    let scenarios = ScenarioLoader::parse(file)
        .with_context(|| format!("Failed to parse scenarios: {}", args.file.display()))?;

    let breakdowns: Vec<_> = scenarios
        .iter()
        .map(|scenario| salary_after_tax(&scenario.to_inputs(table)))
        .collect();
    let results: Vec<ScenarioResult<'_>> = scenarios
        .iter()
        .zip(&breakdowns)
        .map(|(scenario, breakdown)| ScenarioResult {
            label: &scenario.label,
            breakdown,
        })
        .collect();

    info!(scenarios = results.len(), "computed batch");

    match settings.output(args.json) {
        OutputFormat::Json => output::to_json(&results).context("Failed to serialize results"),
        OutputFormat::Table => Ok(output::batch_table(&results)),
    }
}

/// Lists every supported year after checking its configuration.
pub fn years() -> Result<String> {
    for year in TaxYear::ALL {
        year.config()
            .validate()
            .with_context(|| format!("Configuration for {} is invalid", year.as_i32()))?;
    }
    Ok(output::years_table(TaxYear::ALL))
}
